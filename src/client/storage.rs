use crate::error::LiftError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// String key/value store holding JSON documents. Strings are stored bare
/// and read back either way.
pub trait KvStorage: Send + Sync {
    fn get_raw(&self, key: &str) -> impl Future<Output = Result<Option<String>, LiftError>> + Send;

    fn set_raw(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), LiftError>> + Send;

    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), LiftError>> + Send;

    fn get_item<T>(&self, key: &str) -> impl Future<Output = Result<Option<T>, LiftError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let Some(raw) = self.get_raw(key).await? else {
                return Ok(None);
            };
            match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                // strings may be stored bare, without JSON quotes
                Err(e) => serde_json::from_value(Value::String(raw))
                    .map(Some)
                    .map_err(|_| e.into()),
            }
        }
    }

    fn set_item<T>(&self, key: &str, value: &T) -> impl Future<Output = Result<(), LiftError>> + Send
    where
        T: Serialize + Sync,
    {
        async move {
            let raw = match serde_json::to_value(value)? {
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.set_raw(key, raw).await
        }
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KvStorage for LocalStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, LiftError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), LiftError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        debug!(path = %path.display(), bytes = value.len(), "writing local item");
        tokio::fs::write(path, value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), LiftError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
