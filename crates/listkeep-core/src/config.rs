use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{CoreError, CoreErrorKind, CoreResult};
use crate::persistence::StorageKeys;

pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub namespace: String,
    pub page_size: usize,
    pub notification_ttl_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            namespace: "shophub".to_string(),
            page_size: 12,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
        }
    }
}

impl CatalogConfig {
    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        parse_config("catalog", raw)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(&self.namespace)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListConfig {
    pub namespace: String,
    pub page_size: usize,
    pub notification_ttl_ms: u64,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            namespace: "taskmaster".to_string(),
            page_size: 50,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
        }
    }
}

impl TaskListConfig {
    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        parse_config("task list", raw)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(&self.namespace)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Simulated delivery latency.
    pub submit_delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2_000,
        }
    }
}

impl ContactConfig {
    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        parse_config("contact", raw)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

fn parse_config<T: serde::de::DeserializeOwned>(name: &str, raw: &str) -> CoreResult<T> {
    serde_json::from_str(raw).map_err(|error| CoreError {
        kind: CoreErrorKind::ParseFailure,
        message: format!("invalid {name} config: {error}"),
    })
}
