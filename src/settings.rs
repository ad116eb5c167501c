use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::MapperError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub mapping: MappingSettings,
    pub watcher: WatcherSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingSettings {
    /// Path of the JSON mapping file (`mapRoles` / `mapUsers` / `mapAccounts`)
    pub dynamic_file_path: PathBuf,
    /// Key mappings by IAM unique id instead of ARN and bind ARN-bearing
    /// entries to that ARN
    #[serde(default)]
    pub userid_strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherSettings {
    pub poll_interval_ms: u64,
    pub debounce_ms: u64,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            dynamic_file_path: PathBuf::from("/etc/iam-mapper/mapping.json"),
            userid_strict: false,
        }
    }
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            debounce_ms: 200,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self, MapperError> {
        let mut builder = config::Config::builder()
            .set_default(
                "mapping.dynamic_file_path",
                MappingSettings::default()
                    .dynamic_file_path
                    .to_string_lossy()
                    .to_string(),
            )?
            .set_default("mapping.userid_strict", MappingSettings::default().userid_strict)?
            .set_default("watcher.poll_interval_ms", WatcherSettings::default().poll_interval_ms)?
            .set_default("watcher.debounce_ms", WatcherSettings::default().debounce_ms)?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: IAM_MAPPER__MAPPING__USERID_STRICT=true, etc.
        builder = builder.add_source(
            config::Environment::with_prefix("IAM_MAPPER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let mut s: Settings = cfg.try_deserialize()?;

        if s.mapping.dynamic_file_path.is_relative() {
            s.mapping.dynamic_file_path = std::env::current_dir()?.join(&s.mapping.dynamic_file_path);
        }

        Ok(s)
    }
}
