//! Client-side data manager and its storage backends.
//!
//! The manager talks to exactly one backend, picked at startup:
//! - the host's cloud key/value store, reached through an HTTP bridge
//! - the server's HTTP API
//! - a local directory of JSON files
//!
//! Saving a workout to the cloud falls back to the API once on a bridge
//! timeout or error.

pub mod api;
pub mod cache;
pub mod cloud;
pub mod kv_repo;
pub mod manager;
pub mod storage;

pub use api::ApiClient;
pub use cache::TtlCache;
pub use cloud::CloudStorage;
pub use kv_repo::KvRepository;
pub use manager::{Backend, BackendKind, DataManager};
pub use storage::{KvStorage, LocalStorage};

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub cloud_bridge_url: Option<Url>,
    pub cloud_user_id: Option<i64>,
    pub api_base_url: Option<Url>,
    pub local_storage_dir: PathBuf,
    /// Bound on every single bridge call.
    pub cloud_timeout: Duration,
    /// Bound on persisting the workout list to a key/value backend.
    pub cloud_save_timeout: Duration,
    pub exercises_ttl: Duration,
    pub workouts_ttl: Duration,
}

/// Make `join` append to the last path segment instead of replacing it.
pub(crate) fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl Default for ClientSettings {
    fn default() -> Self {
        crate::config::Config::default().client_settings()
    }
}
