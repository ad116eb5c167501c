use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use sha2::{Digest, Sha256};

use crate::errors::MapperError;
use crate::mapping::errors::MappingError;
use crate::mapping::matcher;
use crate::mapping::parser;
use crate::mapping::types::{Identity, IdentityMapping, MappingDocument, RoleMapping, UserMapping};
use crate::mapping::Snapshot;
use crate::settings::MappingSettings;
use crate::watcher::DynamicFileHandler;

/// Prefix of keys synthesized for strict-mode entries that carry no `userid`.
/// Neither ARNs (`arn:`) nor IAM unique ids (`AIDA`, `AROA`, ...) start with it.
pub const SYNTHETIC_KEY_PREFIX: &str = "synthetic-userid:";

/// File-backed store of user, role and account mappings.
///
/// All three collections live in one [`Snapshot`] behind one lock, so a
/// reader sees either the previous or the next file version in full.
#[derive(Debug)]
pub struct MappingStore {
    path: PathBuf,
    userid_strict: bool,
    current: RwLock<Arc<Snapshot>>,
}

impl MappingStore {
    pub fn new(settings: &MappingSettings) -> Result<Self, MappingError> {
        if settings.dynamic_file_path.as_os_str().is_empty() {
            return Err(MappingError::MissingPath);
        }
        Ok(Self {
            path: settings.dynamic_file_path.clone(),
            userid_strict: settings.userid_strict,
            current: RwLock::new(Arc::new(Snapshot::default())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn userid_strict(&self) -> bool {
        self.userid_strict
    }

    /// Current snapshot. Holding the returned `Arc` keeps that version alive
    /// regardless of later reloads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build lookup tables from `document` and publish them atomically.
    pub fn replace(&self, document: MappingDocument) {
        let mut users = HashMap::with_capacity(document.users.len());
        for user in document.users {
            let Some(key) = self.key_for(&user.user_id, &user.user_arn) else {
                tracing::warn!(username = %user.username, "Skipping user mapping without userarn");
                continue;
            };
            if let Some(previous) = users.insert(key, user) {
                tracing::warn!(username = %previous.username, "Duplicate user mapping key, later entry wins");
            }
        }

        let mut roles = HashMap::with_capacity(document.roles.len());
        for role in document.roles {
            let Some(key) = self.key_for(&role.user_id, &role.role_arn) else {
                tracing::warn!(username = %role.username, "Skipping role mapping without rolearn");
                continue;
            };
            if let Some(previous) = roles.insert(key, role) {
                tracing::warn!(username = %previous.username, "Duplicate role mapping key, later entry wins");
            }
        }

        let accounts: HashSet<String> = document.accounts.into_iter().collect();

        let (user_count, role_count, account_count) = (users.len(), roles.len(), accounts.len());
        let generation = self.publish(users, roles, accounts);
        tracing::info!(
            path = %self.path.display(),
            generation,
            users = user_count,
            roles = role_count,
            accounts = account_count,
            "Loaded dynamic mapping file"
        );
    }

    /// Publish an empty snapshot.
    pub fn clear(&self) {
        let generation = self.publish(HashMap::new(), HashMap::new(), HashSet::new());
        tracing::info!(path = %self.path.display(), generation, "Cleared dynamic mappings");
    }

    fn publish(
        &self,
        users: HashMap<String, UserMapping>,
        roles: HashMap<String, RoleMapping>,
        accounts: HashSet<String>,
    ) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let generation = guard.generation + 1;
        *guard = Arc::new(Snapshot {
            users,
            roles,
            accounts,
            generation,
        });
        generation
    }

    /// Parse `contents` and replace the current snapshot. On error the
    /// current snapshot is left untouched.
    pub fn load(&self, contents: &[u8]) -> Result<(), MappingError> {
        let document = parser::parse(contents)?;
        self.replace(document);
        Ok(())
    }

    pub fn lookup_user(&self, key: &str) -> Result<UserMapping, MappingError> {
        self.snapshot()
            .users
            .get(key)
            .cloned()
            .ok_or(MappingError::NotMapped)
    }

    pub fn lookup_role(&self, key: &str) -> Result<RoleMapping, MappingError> {
        self.snapshot()
            .roles
            .get(key)
            .cloned()
            .ok_or(MappingError::NotMapped)
    }

    pub fn has_account(&self, id: &str) -> bool {
        self.snapshot().accounts.contains(id)
    }

    /// Resolve `identity` against the current snapshot.
    pub fn resolve(&self, identity: &Identity) -> Result<IdentityMapping, MappingError> {
        matcher::resolve(identity, &self.snapshot(), self.userid_strict)
    }

    /// Lookup key for an entry under this store's mode. `None` when the entry
    /// has nothing to key on.
    fn key_for(&self, user_id: &str, arn: &str) -> Option<String> {
        if self.userid_strict {
            if !user_id.is_empty() {
                return Some(user_id.to_string());
            }
            return Some(synthetic_key(arn));
        }
        if arn.is_empty() {
            return None;
        }
        Some(arn.to_lowercase())
    }
}

/// Deterministic key for a strict-mode entry without `userid`, derived from
/// the lower-cased ARN so that reloading the same document yields the same key.
pub fn synthetic_key(arn: &str) -> String {
    let digest = Sha256::digest(arn.to_lowercase().as_bytes());
    format!("{SYNTHETIC_KEY_PREFIX}{digest:x}")
}

impl DynamicFileHandler for MappingStore {
    fn on_load(&self, contents: &[u8]) -> Result<(), MapperError> {
        self.load(contents).map_err(MapperError::from)
    }

    fn on_delete(&self) -> Result<(), MapperError> {
        self.clear();
        Ok(())
    }
}
