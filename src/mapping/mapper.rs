use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::mapping::errors::MappingError;
use crate::mapping::store::MappingStore;
use crate::mapping::types::{Identity, IdentityMapping};
use crate::settings::MappingSettings;
use crate::watcher::{self, WatchOptions};

/// Mapper backed by a dynamically reloaded mapping file.
///
/// This is the handle the webhook layer keeps: `start` binds the store to its
/// file, `map` and `is_account_allowed` serve requests.
#[derive(Debug, Clone)]
pub struct DynamicFileMapper {
    store: Arc<MappingStore>,
}

impl DynamicFileMapper {
    pub fn new(settings: &MappingSettings) -> Result<Self, MappingError> {
        Ok(Self {
            store: Arc::new(MappingStore::new(settings)?),
        })
    }

    pub fn name(&self) -> &'static str {
        "DynamicFile"
    }

    /// Start watching the mapping file on a background task. The task stops
    /// when `token` is cancelled.
    pub fn start(&self, token: CancellationToken, options: WatchOptions) -> JoinHandle<()> {
        watcher::start_watching(
            self.store.path().to_path_buf(),
            self.store.clone(),
            token,
            options,
        )
    }

    pub fn map(&self, identity: &Identity) -> Result<IdentityMapping, MappingError> {
        self.store.resolve(identity)
    }

    pub fn is_account_allowed(&self, account_id: &str) -> bool {
        self.store.has_account(account_id)
    }

    pub fn store(&self) -> &Arc<MappingStore> {
        &self.store
    }
}
