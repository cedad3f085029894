use std::{path::Path, sync::OnceLock};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ConfigError;

pub type SharedConfig = RwLock<Config>;

// this will be initialized by the app itself
pub static CONFIG: OnceLock<SharedConfig> = OnceLock::new();

/// How many results a search asks the service for.
///
/// Matches the cap the reference backend applies server-side.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Base URL of the remote catalog service (e.g. `http://localhost:5000`).
    pub base_url: String,

    /// Result cap carried on every search query.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Attempts to read a previous `Config` from disk.
    pub async fn from_disk(path: &Path) -> Result<Self, ConfigError> {
        // read the config from disk
        let s = tokio::fs::read_to_string(path)
            .await
            .map_err(ConfigError::ReadFailed)?;

        // parse with `toml` crate
        let conf: Self = toml::from_str(s.as_str()).map_err(ConfigError::ParseFailed)?;

        Ok(conf)
    }

    /// Use this EXACTLY ONCE to initialize the config.
    ///
    /// The app should be the only one calling this.
    pub fn init_config(config: Config) {
        if CONFIG.set(RwLock::new(config)).is_err() {
            tracing::error!(
                "attempted to init the config, but the config is already initialized."
            );
        }
    }

    /// Grabs the config for reading.
    ///
    /// Note that while you're reading the config, others cannot write to it.
    /// DO NOT HOLD ONTO IT FOR A LONG TIME.
    pub async fn read() -> RwLockReadGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .read()
            .await
    }

    pub async fn write() -> RwLockWriteGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .write()
            .await
    }
}
