use std::sync::Arc;

use listkeep_core::collection::{DisplayState, ViewSignal};
use listkeep_core::config::TaskListConfig;
use listkeep_core::models::{
    CoreError, CoreErrorKind, Severity, StatusFilter, TaskDraft, TaskFilterDimension, TaskId,
    TaskPatch, TaskSortKey, TaskStats,
};
use listkeep_core::persistence::{InMemoryKeyValueStore, KeyValueStore, PersistenceResult};
use listkeep_core::tasks::{ManualClock, TaskListManager, TaskSignal};
use time::Duration;
use time::macros::datetime;

fn config(page_size: usize) -> TaskListConfig {
    TaskListConfig {
        namespace: "todo".to_string(),
        page_size,
        ..TaskListConfig::default()
    }
}

fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(datetime!(2024-03-01 09:00 UTC)))
}

fn manager_over(
    store: Arc<InMemoryKeyValueStore>,
    clock: Arc<ManualClock>,
    page_size: usize,
) -> TaskListManager {
    let mut manager = TaskListManager::new(store, &config(page_size), clock);
    manager.initialize();
    manager.drain_signals();
    manager
}

fn titles<'a>(tasks: impl Iterator<Item = &'a listkeep_core::models::Task>) -> Vec<String> {
    tasks.map(|task| task.title.clone()).collect()
}

fn notifications(signals: Vec<TaskSignal>) -> Vec<(String, Severity)> {
    signals
        .into_iter()
        .filter_map(|signal| match signal {
            ViewSignal::Notify(notification) => {
                Some((notification.message, notification.severity))
            }
            ViewSignal::Render(_) => None,
        })
        .collect()
}

#[test]
fn added_task_moves_between_status_filters_when_toggled() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store, start_clock(), 50);

    let task = manager
        .add_task(TaskDraft::new("Buy milk").with_category("shopping"))
        .unwrap();
    assert_eq!(manager.tasks().len(), 1);

    manager.set_filter(TaskFilterDimension::Status, "active");
    assert_eq!(titles(manager.filtered_tasks()), vec!["Buy milk"]);

    assert!(manager.toggle_completed(&task.id).unwrap());
    assert_eq!(manager.filtered_tasks().len(), 0);
    assert_eq!(manager.display(), DisplayState::Empty);

    manager.set_filter(TaskFilterDimension::Status, "completed");
    assert_eq!(titles(manager.filtered_tasks()), vec!["Buy milk"]);
}

#[test]
fn new_tasks_are_trimmed_defaulted_and_placed_first() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 50);

    let first = manager.add_task(TaskDraft::new("  Write report  ")).unwrap();
    clock.advance(Duration::seconds(1));
    let second = manager
        .add_task(TaskDraft::new("Call plumber").with_category("  Home "))
        .unwrap();

    assert_eq!(first.title, "Write report");
    assert_eq!(first.category, "personal");
    assert_eq!(second.category, "home");
    assert!(!first.completed);
    assert_eq!(first.created_at, datetime!(2024-03-01 09:00 UTC));
    assert_eq!(titles(manager.tasks().iter()), vec!["Call plumber", "Write report"]);

    let signals = notifications(manager.drain_signals());
    assert_eq!(
        signals,
        vec![
            ("Task added successfully!".to_string(), Severity::Success),
            ("Task added successfully!".to_string(), Severity::Success),
        ]
    );
}

#[test]
fn tasks_added_in_the_same_millisecond_get_distinct_ids() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store, start_clock(), 50);

    let first = manager.add_task(TaskDraft::new("one")).unwrap();
    let second = manager.add_task(TaskDraft::new("two")).unwrap();

    assert_eq!(first.id, TaskId("1709283600000".to_string()));
    assert_ne!(first.id, second.id);
}

#[test]
fn blank_title_is_rejected_without_mutation() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store.clone(), start_clock(), 50);

    let error = manager.add_task(TaskDraft::new("   ")).unwrap_err();

    assert_eq!(error.kind, CoreErrorKind::InvalidInput);
    assert!(manager.tasks().is_empty());
    assert!(manager.drain_signals().is_empty());
    assert_eq!(store.get("todo_tasks").unwrap(), None);
}

#[test]
fn update_applies_patch_and_stamps_updated_at() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 50);
    let due = datetime!(2024-03-05 17:00 UTC);
    let task = manager
        .add_task(TaskDraft::new("Draft slides").with_due_at(due))
        .unwrap();

    clock.advance(Duration::minutes(30));
    let updated = manager
        .update_task(
            &task.id,
            TaskPatch {
                title: Some("Final slides".to_string()),
                due_at: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "Final slides");
    assert_eq!(updated.category, "personal");
    assert_eq!(updated.due_at, None);
    assert_eq!(updated.created_at, task.created_at);
    assert_eq!(updated.updated_at, datetime!(2024-03-01 09:30 UTC));
    assert_eq!(manager.task(&task.id), Some(&updated));
}

#[test]
fn unknown_ids_fail_without_side_effects() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store, start_clock(), 50);
    manager.add_task(TaskDraft::new("keep me")).unwrap();
    manager.drain_signals();
    let before = manager.tasks().to_vec();
    let missing = TaskId("42".to_string());

    let update = manager.update_task(&missing, TaskPatch::default()).unwrap_err();
    let delete = manager.delete_task(&missing).unwrap_err();
    let toggle = manager.toggle_completed(&missing).unwrap_err();

    for error in [update, delete, toggle] {
        assert_eq!(error.kind, CoreErrorKind::InvalidInput);
        assert!(error.message.contains("42"));
    }
    assert_eq!(manager.tasks(), before.as_slice());
    assert!(manager.drain_signals().is_empty());
}

#[test]
fn blank_title_patch_is_rejected() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store, start_clock(), 50);
    let task = manager.add_task(TaskDraft::new("Water plants")).unwrap();

    let error = manager
        .update_task(
            &task.id,
            TaskPatch {
                title: Some("  ".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();

    assert_eq!(error.kind, CoreErrorKind::InvalidInput);
    assert_eq!(manager.task(&task.id).unwrap().title, "Water plants");
}

#[test]
fn mutations_persist_and_reload_in_a_new_session() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store.clone(), clock.clone(), 50);

    let milk = manager.add_task(TaskDraft::new("Buy milk")).unwrap();
    clock.advance(Duration::seconds(5));
    let bread = manager
        .add_task(TaskDraft::new("Buy bread").with_due_at(datetime!(2024-03-02 08:00 UTC)))
        .unwrap();
    manager.toggle_completed(&milk.id).unwrap();
    manager.delete_task(&bread.id).unwrap();

    let reloaded = manager_over(store, clock, 50);
    assert_eq!(reloaded.tasks(), manager.tasks());
    assert!(reloaded.task(&milk.id).unwrap().completed);
    assert!(reloaded.task(&bread.id).is_none());
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let store = Arc::new(InMemoryKeyValueStore::new().with_entry("todo_tasks", "[{\"id\":"));
    let mut manager = manager_over(store.clone(), start_clock(), 50);

    assert!(manager.tasks().is_empty());
    manager.add_task(TaskDraft::new("Start over")).unwrap();

    let raw = store.get("todo_tasks").unwrap().unwrap();
    assert!(raw.contains("\"title\":\"Start over\""));
}

#[test]
fn snapshot_without_due_date_field_still_loads() {
    let raw = r#"[{"id":"1","title":"Legacy","category":"work","completed":true,
        "created_at":"2024-02-01T10:00:00Z","updated_at":"2024-02-01T10:00:00Z"}]"#;
    let store = Arc::new(InMemoryKeyValueStore::new().with_entry("todo_tasks", raw));
    let manager = manager_over(store, start_clock(), 50);

    let task = manager.task(&TaskId("1".to_string())).unwrap();
    assert_eq!(task.due_at, None);
    assert!(task.completed);
}

#[test]
fn search_matches_title_and_category_case_insensitively() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store, start_clock(), 50);
    manager
        .add_task(TaskDraft::new("Pay rent").with_category("bills"))
        .unwrap();
    manager
        .add_task(TaskDraft::new("Renew passport").with_category("errands"))
        .unwrap();
    manager
        .add_task(TaskDraft::new("Gym").with_category("health"))
        .unwrap();

    manager.search("REN");
    assert_eq!(titles(manager.filtered_tasks()), vec!["Renew passport", "Pay rent"]);

    manager.search("Health");
    assert_eq!(titles(manager.filtered_tasks()), vec!["Gym"]);

    manager.set_filter(TaskFilterDimension::Status, "completed");
    assert_eq!(manager.filtered_tasks().len(), 0);

    manager.clear_all_filters();
    assert_eq!(manager.filter().status, StatusFilter::All);
    assert_eq!(manager.filtered_tasks().len(), 3);
}

#[test]
fn sort_keys_order_tasks_and_ties_keep_list_order() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 50);
    manager
        .add_task(TaskDraft::new("b-later").with_due_at(datetime!(2024-03-09 09:00 UTC)))
        .unwrap();
    clock.advance(Duration::seconds(1));
    manager.add_task(TaskDraft::new("a-undated")).unwrap();
    clock.advance(Duration::seconds(1));
    manager
        .add_task(TaskDraft::new("C-sooner").with_due_at(datetime!(2024-03-02 09:00 UTC)))
        .unwrap();

    manager.set_sort(TaskSortKey::DueDate);
    assert_eq!(
        titles(manager.visible_page()),
        vec!["C-sooner", "b-later", "a-undated"]
    );

    manager.set_sort(TaskSortKey::Title);
    assert_eq!(
        titles(manager.visible_page()),
        vec!["a-undated", "b-later", "C-sooner"]
    );

    manager.set_sort(TaskSortKey::Default);
    assert_eq!(
        titles(manager.visible_page()),
        vec!["C-sooner", "a-undated", "b-later"]
    );
}

#[test]
fn titles_differing_only_in_case_keep_list_order() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 50);
    for title in ["a", "B", "b"] {
        manager.add_task(TaskDraft::new(title)).unwrap();
        clock.advance(Duration::milliseconds(1));
    }
    assert_eq!(titles(manager.tasks().iter()), vec!["b", "B", "a"]);

    manager.set_sort(TaskSortKey::Title);

    assert_eq!(titles(manager.visible_page()), vec!["a", "b", "B"]);
}

#[test]
fn raw_sort_input_is_coerced_to_a_known_key() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 50);
    for title in ["older", "newer"] {
        manager.add_task(TaskDraft::new(title)).unwrap();
        clock.advance(Duration::milliseconds(1));
    }

    manager.set_sort_raw("title");
    assert_eq!(manager.sort_key(), TaskSortKey::Title);
    assert_eq!(titles(manager.visible_page()), vec!["newer", "older"]);

    manager.set_sort_raw("priority");
    assert_eq!(manager.sort_key(), TaskSortKey::Default);
    assert_eq!(titles(manager.visible_page()), vec!["newer", "older"]);

    manager.set_sort_raw(" due-date ");
    assert_eq!(manager.sort_key(), TaskSortKey::DueDate);
}

#[test]
fn stats_track_completion() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 50);
    assert_eq!(manager.stats(), TaskStats::default());

    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
        ids.push(manager.add_task(TaskDraft::new(title)).unwrap().id);
        clock.advance(Duration::milliseconds(1));
    }
    manager.toggle_completed(&ids[0]).unwrap();

    let stats = manager.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.completion_rate, 33);
    assert_eq!(manager.frame().summary, stats);
}

#[test]
fn toggling_back_to_pending_uses_pending_message() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut manager = manager_over(store, start_clock(), 50);
    let task = manager.add_task(TaskDraft::new("Stretch")).unwrap();
    manager.toggle_completed(&task.id).unwrap();
    manager.drain_signals();

    assert!(!manager.toggle_completed(&task.id).unwrap());
    assert_eq!(
        notifications(manager.drain_signals()),
        vec![("Task marked as pending".to_string(), Severity::Success)]
    );
}

#[test]
fn clear_all_empties_list_and_store() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store.clone(), clock.clone(), 50);
    manager.add_task(TaskDraft::new("one")).unwrap();
    clock.advance(Duration::milliseconds(1));
    manager.add_task(TaskDraft::new("two")).unwrap();

    assert_eq!(manager.clear_all(), 2);
    assert!(manager.tasks().is_empty());
    assert_eq!(manager.display(), DisplayState::Empty);
    assert_eq!(store.get("todo_tasks").unwrap().as_deref(), Some("[]"));
}

#[test]
fn pages_advance_and_deleting_clamps_to_last_page() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let clock = start_clock();
    let mut manager = manager_over(store, clock.clone(), 2);
    let mut ids = Vec::new();
    for title in ["t1", "t2", "t3"] {
        ids.push(manager.add_task(TaskDraft::new(title)).unwrap().id);
        clock.advance(Duration::milliseconds(1));
    }

    assert!(manager.has_more());
    assert!(manager.load_more());
    assert_eq!(titles(manager.visible_page()), vec!["t1"]);
    assert!(!manager.load_more());

    manager.delete_task(&ids[0]).unwrap();
    assert_eq!(manager.pagination().page, 1);
    assert_eq!(titles(manager.visible_page()), vec!["t3", "t2"]);
}

struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> PersistenceResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> PersistenceResult<()> {
        Err(CoreError::new(CoreErrorKind::StorageFailure, "disk full"))
    }

    fn remove(&self, _key: &str) -> PersistenceResult<()> {
        Err(CoreError::new(CoreErrorKind::StorageFailure, "disk full"))
    }
}

#[test]
fn failed_write_keeps_task_and_reports_error_instead_of_success() {
    let mut manager = TaskListManager::new(Arc::new(ReadOnlyStore), &config(50), start_clock());
    manager.initialize();
    manager.drain_signals();

    manager.add_task(TaskDraft::new("Unsaved")).unwrap();

    assert_eq!(manager.tasks().len(), 1);
    assert_eq!(
        notifications(manager.drain_signals()),
        vec![("Could not save your tasks".to_string(), Severity::Error)]
    );
}
