use crate::models::CoreError;

pub mod in_memory;
pub mod snapshot;

pub use in_memory::InMemoryKeyValueStore;
pub use snapshot::{load_snapshot, save_snapshot};

pub type PersistenceResult<T> = Result<T, CoreError>;

pub trait MigrationStore: Send + Sync {
    fn current_version(&self) -> PersistenceResult<i64>;

    fn apply_migration(&self, target_version: i64) -> PersistenceResult<()>;
}

/// String-keyed store of whole serialized values. Writers always replace
/// the complete value for a key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;

    fn remove(&self, key: &str) -> PersistenceResult<()>;
}

/// Keys of one app, namespaced so several apps can share a store.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn wishlist(&self) -> String {
        format!("{}_wishlist", self.namespace)
    }

    pub fn tasks(&self) -> String {
        format!("{}_tasks", self.namespace)
    }

    pub fn theme(&self) -> String {
        format!("{}_theme", self.namespace)
    }
}
