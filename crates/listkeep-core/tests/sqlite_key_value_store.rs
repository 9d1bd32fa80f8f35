use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use listkeep_core::catalog::CatalogManager;
use listkeep_core::config::{CatalogConfig, TaskListConfig};
use listkeep_core::models::{CoreErrorKind, ProductId, TaskDraft, Theme};
use listkeep_core::persistence::{KeyValueStore, MigrationStore, StorageKeys};
use listkeep_core::preferences::{load_theme, toggle_theme};
use listkeep_core::sqlite::{SqliteKeyValueStore, current_schema_version};
use listkeep_core::tasks::{ManualClock, TaskListManager};
use time::macros::datetime;

fn test_db_path(test_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("listkeep-{test_name}-{nanos}.sqlite3"))
}

#[test]
fn planned_migrations_include_versions_after_requested_version() {
    let store = SqliteKeyValueStore::new(test_db_path("planned"));
    let planned = store.planned_migrations(0);

    assert!(!planned.is_empty());
    assert_eq!(planned[0].version, 1);
    assert!(store.planned_migrations(current_schema_version()).is_empty());
}

#[test]
fn open_applies_every_migration() {
    let path = test_db_path("open");
    let store = SqliteKeyValueStore::open(&path).unwrap();

    assert_eq!(store.current_version().unwrap(), current_schema_version());
    assert_eq!(store.database_path(), path.as_path());

    // Reopening an up-to-date database is a no-op.
    let reopened = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(reopened.current_version().unwrap(), current_schema_version());
}

#[test]
fn applying_undefined_migration_fails_with_storage_error() {
    let store = SqliteKeyValueStore::new(test_db_path("undefined"));
    let error = store
        .apply_migration(current_schema_version() + 1)
        .unwrap_err();

    assert_eq!(error.kind, CoreErrorKind::StorageFailure);
    assert!(error.message.starts_with("sqlite apply_migration failed"));
}

#[test]
fn key_value_operations_require_a_migrated_schema() {
    let store = SqliteKeyValueStore::new(test_db_path("unmigrated"));
    let error = store.get("any").unwrap_err();

    assert_eq!(error.kind, CoreErrorKind::StorageFailure);
    assert!(error.message.contains("not initialized"));
}

#[test]
fn set_get_and_remove_round_trip() {
    let store = SqliteKeyValueStore::open(test_db_path("roundtrip")).unwrap();

    assert_eq!(store.get("shop_wishlist").unwrap(), None);
    store.set("shop_wishlist", "[1,2]").unwrap();
    store.set("shop_wishlist", "[2]").unwrap();
    assert_eq!(store.get("shop_wishlist").unwrap().as_deref(), Some("[2]"));

    store.remove("shop_wishlist").unwrap();
    assert_eq!(store.get("shop_wishlist").unwrap(), None);
    store.remove("shop_wishlist").unwrap();
}

#[test]
fn rolling_back_to_zero_drops_entries() {
    let store = SqliteKeyValueStore::open(test_db_path("rollback")).unwrap();
    store.set("todo_tasks", "[]").unwrap();

    store.apply_migration(0).unwrap();
    assert_eq!(store.current_version().unwrap(), 0);

    store.migrate_to_latest().unwrap();
    assert_eq!(store.get("todo_tasks").unwrap(), None);
}

#[test]
fn wishlist_survives_a_new_session() {
    let path = test_db_path("wishlist");
    let config = CatalogConfig::default();

    let store = Arc::new(SqliteKeyValueStore::open(&path).unwrap());
    let mut first = CatalogManager::with_seed_catalog(store, &config);
    first.initialize();
    first.toggle_wishlist(ProductId(9)).unwrap();
    first.toggle_wishlist(ProductId(4)).unwrap();

    let store = Arc::new(SqliteKeyValueStore::open(&path).unwrap());
    let mut second = CatalogManager::with_seed_catalog(store, &config);
    second.initialize();
    assert_eq!(second.wishlist(), &[ProductId(9), ProductId(4)]);
}

#[test]
fn task_list_and_theme_share_one_database() {
    let path = test_db_path("shared");
    let store = Arc::new(SqliteKeyValueStore::open(&path).unwrap());
    let clock = Arc::new(ManualClock::new(datetime!(2024-03-01 09:00 UTC)));
    let config = TaskListConfig::default();

    let mut manager = TaskListManager::new(store.clone(), &config, clock.clone());
    manager.initialize();
    let task = manager.add_task(TaskDraft::new("Renew library card")).unwrap();

    let keys = StorageKeys::new("taskmaster");
    assert_eq!(toggle_theme(store.as_ref(), &keys).unwrap(), Theme::Dark);

    let reopened = Arc::new(SqliteKeyValueStore::open(&path).unwrap());
    let mut reloaded = TaskListManager::new(reopened.clone(), &config, clock);
    reloaded.initialize();
    assert_eq!(reloaded.tasks(), &[task]);
    assert_eq!(load_theme(reopened.as_ref(), &keys), Theme::Dark);
}
