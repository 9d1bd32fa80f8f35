use std::cmp::Ordering;
use std::sync::Arc;

use crate::collection::{
    DerivedView, DisplayState, Listing, Pagination, RenderFrame, SignalQueue, ViewSignal,
};
use crate::config::TaskListConfig;
use crate::models::{
    CoreError, CoreResult, Severity, Task, TaskDraft, TaskFilter, TaskFilterDimension, TaskId,
    TaskPatch, TaskSortKey, TaskStats, normalize_category,
};
use crate::persistence::{KeyValueStore, StorageKeys, load_snapshot, save_snapshot};

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock, next_task_id};

impl Listing for Task {
    type Filter = TaskFilter;
    type SortKey = TaskSortKey;

    fn matches(&self, filter: &Self::Filter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, key: Self::SortKey) -> Ordering {
        key.compare(self, other)
    }
}

pub type TaskFrame = RenderFrame<Task, TaskStats>;
pub type TaskSignal = ViewSignal<Task, TaskStats>;

/// To-do list state. The whole task list is persisted after every mutation.
pub struct TaskListManager {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    clock: Arc<dyn Clock>,
    tasks: Vec<Task>,
    view: DerivedView<Task>,
    signals: SignalQueue<Task, TaskStats>,
}

impl TaskListManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &TaskListConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            keys: config.storage_keys(),
            clock,
            tasks: Vec::new(),
            view: DerivedView::new(config.page_size),
            signals: SignalQueue::new(config.notification_ttl()),
        }
    }

    pub fn with_system_clock(store: Arc<dyn KeyValueStore>, config: &TaskListConfig) -> Self {
        Self::new(store, config, Arc::new(SystemClock))
    }

    /// Loads persisted tasks; a missing or unreadable snapshot starts an
    /// empty list.
    pub fn initialize(&mut self) {
        let key = self.keys.tasks();
        self.tasks = load_snapshot(self.store.as_ref(), &key).unwrap_or_default();
        self.view.rederive(&self.tasks);
        tracing::info!(
            namespace = self.keys.namespace(),
            tasks = self.tasks.len(),
            "task list initialized"
        );
        self.emit_render();
    }

    /// New tasks go to the front of the list.
    pub fn add_task(&mut self, draft: TaskDraft) -> CoreResult<Task> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CoreError::invalid_input("task title must not be empty"));
        }

        let now = self.clock.now();
        let task = Task {
            id: next_task_id(now, &self.tasks),
            title: title.to_string(),
            category: normalize_category(draft.category.as_deref()),
            due_at: draft.due_at,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(0, task.clone());

        tracing::info!(
            namespace = self.keys.namespace(),
            task_id = %task.id,
            category = %task.category,
            "task added"
        );
        self.commit("Task added successfully!");
        Ok(task)
    }

    /// Applies `patch` to task `id` and stamps `updated_at`. Fails without
    /// touching anything when the id is unknown or the new title is blank.
    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> CoreResult<Task> {
        let index = self.index_of(id)?;
        let title = match patch.title.as_deref().map(str::trim) {
            Some("") => return Err(CoreError::invalid_input("task title must not be empty")),
            Some(title) => Some(title.to_string()),
            None => None,
        };

        let now = self.clock.now();
        let task = &mut self.tasks[index];
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(category) = patch.category.as_deref() {
            task.category = normalize_category(Some(category));
        }
        if let Some(due_at) = patch.due_at {
            task.due_at = due_at;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = now;
        let updated = task.clone();

        tracing::info!(namespace = self.keys.namespace(), task_id = %id, "task updated");
        self.commit("Task updated successfully!");
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> CoreResult<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);

        tracing::info!(namespace = self.keys.namespace(), task_id = %id, "task deleted");
        self.commit("Task deleted successfully!");
        Ok(removed)
    }

    /// Flips the completed flag; returns the new value.
    pub fn toggle_completed(&mut self, id: &TaskId) -> CoreResult<bool> {
        let index = self.index_of(id)?;
        let now = self.clock.now();
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        task.updated_at = now;
        let completed = task.completed;

        tracing::info!(
            namespace = self.keys.namespace(),
            task_id = %id,
            completed,
            "task completion toggled"
        );
        self.commit(if completed {
            "Task completed!"
        } else {
            "Task marked as pending"
        });
        Ok(completed)
    }

    /// Removes every task; returns how many were dropped.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.tasks.len();
        self.tasks.clear();

        tracing::info!(namespace = self.keys.namespace(), removed, "task list cleared");
        self.commit("All tasks cleared!");
        removed
    }

    pub fn set_filter(&mut self, dimension: TaskFilterDimension, raw: &str) {
        let mut filter = self.view.filter().clone();
        filter.set(dimension, raw);
        self.view.apply_filter(filter, &self.tasks);
        tracing::debug!(
            namespace = self.keys.namespace(),
            filter = ?self.view.filter(),
            matching = self.view.total_matching(),
            "task filter applied"
        );
        self.emit_render();
    }

    pub fn search(&mut self, text: &str) {
        self.set_filter(TaskFilterDimension::Search, text);
    }

    pub fn clear_all_filters(&mut self) {
        self.view.reset(&self.tasks);
        self.emit_render();
    }

    pub fn set_sort(&mut self, key: TaskSortKey) {
        self.view.apply_sort(key);
        self.emit_render();
    }

    /// Sets the sort from raw control input; unknown keys mean `default`.
    pub fn set_sort_raw(&mut self, raw: &str) {
        self.set_sort(TaskSortKey::coerce(raw));
    }

    pub fn load_more(&mut self) -> bool {
        if !self.view.load_more() {
            return false;
        }
        self.emit_render();
        true
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Authoritative order, newest additions first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filtered_tasks(&self) -> impl ExactSizeIterator<Item = &Task> + '_ {
        self.view.matching()
    }

    pub fn visible_page(&self) -> impl ExactSizeIterator<Item = &Task> + '_ {
        self.view.visible_page()
    }

    pub fn visible_through_page(&self) -> impl ExactSizeIterator<Item = &Task> + '_ {
        self.view.visible_through_page()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn filter(&self) -> &TaskFilter {
        self.view.filter()
    }

    pub fn sort_key(&self) -> TaskSortKey {
        self.view.sort_key()
    }

    pub fn pagination(&self) -> Pagination {
        self.view.pagination()
    }

    pub fn display(&self) -> DisplayState {
        self.view.display()
    }

    pub fn total_matching(&self) -> usize {
        self.view.total_matching()
    }

    pub fn has_more(&self) -> bool {
        self.view.has_more()
    }

    pub fn frame(&self) -> TaskFrame {
        self.view.frame(Task::clone, self.stats())
    }

    pub fn drain_signals(&mut self) -> Vec<TaskSignal> {
        self.signals.drain()
    }

    fn index_of(&self, id: &TaskId) -> CoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| &task.id == id)
            .ok_or_else(|| CoreError::invalid_input(format!("unknown task id '{id}'")))
    }

    /// Persists the whole list, re-derives the view and signals the host.
    fn commit(&mut self, success_message: &str) {
        let persisted = self.persist_tasks();
        self.view.rederive(&self.tasks);
        self.emit_render();
        if persisted {
            self.signals.notify(success_message, Severity::Success);
        }
    }

    fn persist_tasks(&mut self) -> bool {
        let key = self.keys.tasks();
        match save_snapshot(self.store.as_ref(), &key, &self.tasks) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(
                    key = %key,
                    kind = ?error.kind,
                    message = %error.message,
                    "failed to persist task list"
                );
                self.signals.notify("Could not save your tasks", Severity::Error);
                false
            }
        }
    }

    fn emit_render(&mut self) {
        let frame = self.frame();
        self.signals.render(frame);
    }
}
