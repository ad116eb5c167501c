pub mod errors;
pub mod mapper;
pub mod matcher;
pub mod parser;
pub mod store;
pub mod types;

use std::collections::{HashMap, HashSet};
use types::{RoleMapping, UserMapping};

/// One published version of the mapping file.
/// Immutable after construction; a reload publishes a new snapshot.
#[derive(Debug, Default)]
pub struct Snapshot {
    /// lookup key -> user mapping (key is the userid or lower-cased ARN, see `store`)
    pub users: HashMap<String, UserMapping>,
    /// lookup key -> role mapping
    pub roles: HashMap<String, RoleMapping>,
    /// Allowed AWS account ids
    pub accounts: HashSet<String>,
    /// Incremented on every publication
    pub generation: u64,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.roles.is_empty() && self.accounts.is_empty()
    }

    /// Compare mapping data, ignoring the generation counter.
    pub fn same_mappings(&self, other: &Snapshot) -> bool {
        self.users == other.users && self.roles == other.roles && self.accounts == other.accounts
    }
}
