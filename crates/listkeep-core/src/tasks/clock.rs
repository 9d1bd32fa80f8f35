use std::sync::Mutex;

use time::{Duration, OffsetDateTime};

use crate::models::{Task, TaskId};

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

/// Millisecond timestamp of `now` as a string, bumped past any id already
/// present in `existing`.
pub fn next_task_id(now: OffsetDateTime, existing: &[Task]) -> TaskId {
    let mut millis = now.unix_timestamp_nanos() / 1_000_000;
    loop {
        let candidate = millis.to_string();
        if !existing.iter().any(|task| task.id.as_str() == candidate) {
            return TaskId(candidate);
        }
        millis += 1;
    }
}
