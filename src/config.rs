use crate::client::ClientSettings;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

pub const ENV_PREFIX: &str = "LIFTLOG_";

/// Process configuration: defaults overridden by `LIFTLOG_*` environment
/// variables (a `.env` file is loaded first by the binary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub loglevel: String,
    /// e.g. `sqlite://liftlog.db`; unset keeps the store in memory only.
    pub database_url: Option<String>,
    pub cloud_bridge_url: Option<Url>,
    pub cloud_user_id: Option<i64>,
    pub api_base_url: Option<Url>,
    pub local_storage_dir: PathBuf,
    pub cloud_timeout_ms: u64,
    pub cloud_save_timeout_ms: u64,
    pub exercises_cache_secs: u64,
    pub workouts_cache_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            database_url: None,
            cloud_bridge_url: None,
            cloud_user_id: None,
            api_base_url: None,
            local_storage_dir: PathBuf::from(".liftlog"),
            cloud_timeout_ms: 2_000,
            cloud_save_timeout_ms: 3_000,
            exercises_cache_secs: 30,
            workouts_cache_secs: 10,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            cloud_bridge_url: self.cloud_bridge_url.clone(),
            cloud_user_id: self.cloud_user_id,
            api_base_url: self.api_base_url.clone(),
            local_storage_dir: self.local_storage_dir.clone(),
            cloud_timeout: Duration::from_millis(self.cloud_timeout_ms),
            cloud_save_timeout: Duration::from_millis(self.cloud_save_timeout_ms),
            exercises_ttl: Duration::from_secs(self.exercises_cache_secs),
            workouts_ttl: Duration::from_secs(self.workouts_cache_secs),
        }
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid LIFTLOG_* configuration"));
