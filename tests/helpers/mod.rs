pub mod fixtures;

use std::path::Path;
use std::time::{Duration, Instant};

use iam_mapper::settings::MappingSettings;
use iam_mapper::watcher::WatchOptions;

pub use fixtures::{ORIG_FILE_CONTENT, UPDATED_FILE_CONTENT};

pub fn mapping_settings(path: &Path, userid_strict: bool) -> MappingSettings {
    MappingSettings {
        dynamic_file_path: path.to_path_buf(),
        userid_strict,
    }
}

pub fn fast_watch() -> WatchOptions {
    WatchOptions {
        poll_interval: Duration::from_millis(25),
        debounce: Duration::from_millis(10),
    }
}

/// Poll `condition` until it holds or five seconds pass.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
