//! iam-mapper - dynamic AWS IAM to Kubernetes identity mapping
//!
//! Watches an operator-maintained mapping file, publishes each parsed version
//! as an immutable snapshot and resolves verified IAM identities to
//! Kubernetes usernames and groups.

pub mod errors;
pub mod mapping;
pub mod settings;
pub mod watcher;

pub use mapping::mapper::DynamicFileMapper;
pub use mapping::store::MappingStore;
pub use mapping::types::{Identity, IdentityMapping, MappingDocument, RoleMapping, UserMapping};
