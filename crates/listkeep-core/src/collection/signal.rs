use std::time::Duration;

use crate::collection::{DisplayState, Pagination};
use crate::models::{Notification, Severity};

/// Everything a renderer needs to redraw one collection.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame<E, S> {
    /// Entries of the current page only.
    pub entries: Vec<E>,
    pub total_matching: usize,
    pub display: DisplayState,
    pub pagination: Pagination,
    pub has_more: bool,
    pub summary: S,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewSignal<E, S> {
    Render(RenderFrame<E, S>),
    Notify(Notification),
}

/// Signals raised by a manager, drained by the host after each call.
///
/// Only the newest render frame is kept while undrained, since it
/// supersedes older ones. Notifications are all kept, in order.
#[derive(Debug)]
pub struct SignalQueue<E, S> {
    pending: Vec<ViewSignal<E, S>>,
    notification_ttl: Duration,
}

impl<E, S> SignalQueue<E, S> {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            pending: Vec::new(),
            notification_ttl,
        }
    }

    pub fn render(&mut self, frame: RenderFrame<E, S>) {
        self.pending.retain(|signal| !matches!(signal, ViewSignal::Render(_)));
        self.pending.push(ViewSignal::Render(frame));
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.pending.push(ViewSignal::Notify(Notification {
            message: message.into(),
            severity,
            dismiss_after: self.notification_ttl,
        }));
    }

    pub fn drain(&mut self) -> Vec<ViewSignal<E, S>> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
