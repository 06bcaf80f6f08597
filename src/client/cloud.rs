use crate::client::as_directory;
use crate::client::storage::KvStorage;
use crate::error::LiftError;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Cloud key/value storage of the host application, reached through its
/// HTTP messaging bridge.
///
/// Bridge protocol (all bodies JSON):
/// - `GET  ready` -> 2xx when the host storage is usable
/// - `POST getItem {key}` -> `{value, error}`
/// - `POST setItem {key, value}` -> `{ok, error}`
/// - `POST removeItem {key}` -> `{ok, error}`
/// - `POST getItems {keys}` -> `{values, error}`
/// - `POST getKeys {}` -> `{keys, error}`
#[derive(Debug, Clone)]
pub struct CloudStorage {
    client: reqwest::Client,
    bridge: Url,
    user_id: Option<i64>,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct BridgeValue {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BridgeAck {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BridgeValues {
    #[serde(default)]
    values: HashMap<String, String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BridgeKeys {
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

fn bridge_error(error: Option<String>) -> Result<(), LiftError> {
    match error {
        Some(e) => Err(LiftError::Cloud(e)),
        None => Ok(()),
    }
}

impl CloudStorage {
    pub fn new(
        client: reqwest::Client,
        bridge: Url,
        user_id: Option<i64>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            bridge: as_directory(bridge),
            user_id,
            timeout,
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    fn user_prefix(&self) -> Option<String> {
        self.user_id.map(|id| format!("user_{id}_"))
    }

    /// Keys are scoped per user when the bridge reported one.
    pub fn user_key(&self, key: &str) -> String {
        match self.user_prefix() {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }

    fn strip_user_key(&self, key: &str) -> String {
        match self.user_prefix() {
            Some(prefix) => key.strip_prefix(prefix.as_str()).unwrap_or(key).to_string(),
            None => key.to_string(),
        }
    }

    /// Environment detection: the bridge answers its readiness probe in time.
    pub async fn is_available(&self) -> bool {
        let Ok(url) = self.bridge.join("ready") else {
            return false;
        };
        let probe = self.client.get(url).send();
        match tokio::time::timeout(self.timeout, probe).await {
            Ok(Ok(resp)) if resp.status().is_success() => {
                info!(bridge = %self.bridge, user_id = ?self.user_id, "cloud storage available");
                true
            }
            Ok(Ok(resp)) => {
                info!(status = %resp.status(), "cloud storage bridge not ready");
                false
            }
            Ok(Err(e)) => {
                info!(error = %e, "cloud storage bridge unreachable");
                false
            }
            Err(_) => {
                info!("cloud storage readiness probe timed out");
                false
            }
        }
    }

    async fn call<R: DeserializeOwned>(&self, op: &'static str, body: Value) -> Result<R, LiftError> {
        let url = self.bridge.join(op)?;
        let request = async {
            let resp = self
                .client
                .post(url)
                .json(&body)
                .send()
                .await?
                .error_for_status()?;
            resp.json::<R>().await
        };
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(parsed)) => Ok(parsed),
            Ok(Err(e)) if e.is_connect() => {
                warn!(op, error = %e, "cloud storage bridge unreachable");
                Err(LiftError::CloudUnavailable)
            }
            Ok(Err(e)) => {
                error!(op, error = %e, "cloud storage call failed");
                Err(LiftError::Cloud(e.to_string()))
            }
            Err(_) => {
                error!(
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "cloud storage call timed out"
                );
                Err(LiftError::CloudTimeout { op })
            }
        }
    }

    /// Several items at once, keyed by the unscoped key. Values that are not
    /// valid JSON are returned as raw strings.
    pub async fn get_items(&self, keys: &[&str]) -> Result<HashMap<String, Value>, LiftError> {
        let scoped: Vec<String> = keys.iter().map(|k| self.user_key(k)).collect();
        let resp: BridgeValues = self.call("getItems", json!({ "keys": scoped })).await?;
        bridge_error(resp.error)?;
        Ok(resp
            .values
            .into_iter()
            .map(|(key, raw)| {
                let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
                (self.strip_user_key(&key), value)
            })
            .collect())
    }

    /// Keys owned by the current user, without the user prefix.
    pub async fn keys(&self) -> Result<Vec<String>, LiftError> {
        let resp: BridgeKeys = self.call("getKeys", json!({})).await?;
        bridge_error(resp.error)?;
        let prefix = self.user_prefix();
        Ok(resp
            .keys
            .into_iter()
            .filter_map(|key| match prefix.as_deref() {
                Some(p) => key.strip_prefix(p).map(str::to_string),
                None => Some(key),
            })
            .collect())
    }
}

impl KvStorage for CloudStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, LiftError> {
        let key = self.user_key(key);
        debug!(key = %key, "getting item from cloud storage");
        let resp: BridgeValue = self.call("getItem", json!({ "key": key })).await?;
        bridge_error(resp.error)?;
        Ok(resp.value.filter(|v| !v.is_empty()))
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), LiftError> {
        let key = self.user_key(key);
        debug!(key = %key, chars = value.chars().count(), "setting item in cloud storage");
        let resp: BridgeAck = self
            .call("setItem", json!({ "key": key, "value": value }))
            .await?;
        bridge_error(resp.error)
    }

    async fn remove_item(&self, key: &str) -> Result<(), LiftError> {
        let key = self.user_key(key);
        let resp: BridgeAck = self.call("removeItem", json!({ "key": key })).await?;
        bridge_error(resp.error)
    }
}
