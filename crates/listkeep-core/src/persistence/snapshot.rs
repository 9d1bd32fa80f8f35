use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{CoreError, CoreErrorKind};
use crate::persistence::{KeyValueStore, PersistenceResult};

/// Reads and decodes the JSON snapshot under `key`. Missing keys, read
/// failures and malformed JSON all yield `None`.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            tracing::warn!(
                key,
                kind = ?error.kind,
                message = %error.message,
                "failed to read persisted snapshot; using defaults"
            );
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(
                key,
                error = %error,
                "discarding malformed persisted snapshot"
            );
            None
        }
    }
}

pub fn save_snapshot<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> PersistenceResult<()> {
    let encoded = serde_json::to_string(value).map_err(|error| CoreError {
        kind: CoreErrorKind::ParseFailure,
        message: format!("failed to encode snapshot for '{key}': {error}"),
    })?;
    store.set(key, &encoded)
}
