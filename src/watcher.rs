//! Polling watcher for a single mapping file.
//!
//! The watcher re-reads the watched path on every tick and compares a SHA-256
//! digest of its contents with the last delivered version. Because it goes
//! through the directory entry on each tick, editors that save by writing a
//! temporary file and renaming it over the original are picked up like an
//! in-place write.
//!
//! # Transitions
//!
//! - absent -> present: `on_load(contents)`
//! - present, digest changed: `on_load(contents)` once the new contents have
//!   been stable for the debounce window
//! - present -> absent: `on_delete()`
//!
//! # Usage
//!
//! ```rust,ignore
//! let token = CancellationToken::new();
//! let handle = start_watching(path, store.clone(), token.clone(), WatchOptions::default());
//! // ...
//! token.cancel();
//! handle.await?;
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::MapperError;
use crate::settings::WatcherSettings;

/// Receiver of file transitions observed by the watcher.
pub trait DynamicFileHandler: Send + Sync {
    /// Called with the full contents after the file was created or changed.
    fn on_load(&self, contents: &[u8]) -> Result<(), MapperError>;

    /// Called after the file was removed.
    fn on_delete(&self) -> Result<(), MapperError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// How often the path is checked
    pub poll_interval: Duration,
    /// How long new contents must stay unchanged before they are delivered
    pub debounce: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            debounce: Duration::from_millis(200),
        }
    }
}

impl From<&WatcherSettings> for WatchOptions {
    fn from(settings: &WatcherSettings) -> Self {
        Self {
            poll_interval: Duration::from_millis(settings.poll_interval_ms).max(MIN_POLL_INTERVAL),
            debounce: Duration::from_millis(settings.debounce_ms),
        }
    }
}

/// Lower bound for the poll interval; `tokio::time::interval` rejects zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

type ContentHash = [u8; 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observed {
    Absent,
    Delivered(ContentHash),
}

enum Settled {
    Stable(Vec<u8>),
    Changed,
    Cancelled,
}

/// Spawn [`watch`] on the current tokio runtime and return immediately.
pub fn start_watching(
    path: PathBuf,
    handler: Arc<dyn DynamicFileHandler>,
    token: CancellationToken,
    options: WatchOptions,
) -> JoinHandle<()> {
    tokio::spawn(watch(path, handler, token, options))
}

/// Watch `path` until `token` is cancelled.
///
/// No callback is issued once cancellation has been observed, including for
/// a change that was already read but not yet delivered.
pub async fn watch(
    path: PathBuf,
    handler: Arc<dyn DynamicFileHandler>,
    token: CancellationToken,
    options: WatchOptions,
) {
    let mut ticker = tokio::time::interval(options.poll_interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut observed = Observed::Absent;
    let mut last_error: Option<String> = None;

    info!(path = %path.display(), ?options, "Watching dynamic mapping file");

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let contents = match read_if_exists(&path).await {
            Ok(contents) => {
                last_error = None;
                contents
            }
            Err(e) => {
                report_read_error(&path, &e, &mut last_error);
                continue;
            }
        };

        let Some(contents) = contents else {
            if observed != Observed::Absent {
                observed = Observed::Absent;
                if token.is_cancelled() {
                    break;
                }
                info!(path = %path.display(), "Dynamic mapping file removed");
                if let Err(e) = handler.on_delete() {
                    warn!(path = %path.display(), error = %e, "Failed to handle file deletion");
                }
            }
            continue;
        };

        let hash = content_hash(&contents);
        if observed == Observed::Delivered(hash) {
            continue;
        }

        let contents = match settle(&path, contents, &token, options.debounce).await {
            Settled::Stable(contents) => contents,
            Settled::Changed => continue,
            Settled::Cancelled => break,
        };
        if token.is_cancelled() {
            break;
        }

        let hash = content_hash(&contents);
        if observed == Observed::Delivered(hash) {
            continue;
        }
        observed = Observed::Delivered(hash);

        debug!(path = %path.display(), bytes = contents.len(), "Delivering dynamic mapping file");
        if let Err(e) = handler.on_load(&contents) {
            // The rejected version is remembered; the next edit retries.
            warn!(path = %path.display(), error = %e, "Failed to load dynamic mapping file");
        }
    }

    info!(path = %path.display(), "Stopped watching dynamic mapping file");
}

/// Wait until the contents stop changing for one debounce window.
async fn settle(
    path: &Path,
    mut contents: Vec<u8>,
    token: &CancellationToken,
    debounce: Duration,
) -> Settled {
    if debounce.is_zero() {
        return Settled::Stable(contents);
    }
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => return Settled::Cancelled,
            _ = tokio::time::sleep(debounce) => {}
        }
        match read_if_exists(path).await {
            Ok(Some(next)) if next == contents => return Settled::Stable(contents),
            Ok(Some(next)) => contents = next,
            // Removal or a read failure is picked up by the next tick.
            Ok(None) | Err(_) => return Settled::Changed,
        }
    }
}

async fn read_if_exists(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn content_hash(contents: &[u8]) -> ContentHash {
    Sha256::digest(contents).into()
}

/// Log a read failure at warn level the first time it shows up and at debug
/// level while it repeats.
fn report_read_error(path: &Path, error: &std::io::Error, last_error: &mut Option<String>) {
    let message = error.to_string();
    if last_error.as_deref() == Some(message.as_str()) {
        debug!(path = %path.display(), error = %message, "Dynamic mapping file still unreadable");
    } else {
        warn!(path = %path.display(), error = %message, "Failed to read dynamic mapping file, will retry");
        *last_error = Some(message);
    }
}
