use crate::models::{CoreResult, Theme};
use crate::persistence::{KeyValueStore, StorageKeys};

/// Stored theme for one app namespace; anything unreadable means `light`.
pub fn load_theme(store: &dyn KeyValueStore, keys: &StorageKeys) -> Theme {
    let key = keys.theme();
    match store.get(&key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, value = %raw, "ignoring unknown theme preference");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(error) => {
            tracing::warn!(
                key = %key,
                kind = ?error.kind,
                message = %error.message,
                "failed to read theme preference"
            );
            Theme::default()
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, keys: &StorageKeys, theme: Theme) -> CoreResult<()> {
    store.set(&keys.theme(), theme.as_str())
}

/// Flips the stored theme and returns the new value.
pub fn toggle_theme(store: &dyn KeyValueStore, keys: &StorageKeys) -> CoreResult<Theme> {
    let next = load_theme(store, keys).toggled();
    save_theme(store, keys, next)?;
    tracing::info!(namespace = keys.namespace(), theme = next.as_str(), "theme changed");
    Ok(next)
}
