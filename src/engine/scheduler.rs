// View Simulator - Scheduler
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Recurring delayed execution, on a tokio runtime or on virtual time.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Work run on every firing.
pub type Task = Arc<dyn Fn() + Send + Sync>;

/// Something that can run a task repeatedly at a fixed interval.
pub trait Scheduler: Send + Sync {
    /// Run `task` every `interval`, first firing one interval from now.
    fn schedule_repeating(&self, interval: Duration, task: Task) -> ScheduleHandle;
}

/// Handle to a recurring schedule. Cancels on [`cancel`](Self::cancel) or drop.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    /// Create a handle that runs `cancel` once, on cancel or drop.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the schedule. Firings already in flight must be ignored by the task.
    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Create a scheduler for the runtime the caller is running on.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        Handle::try_current().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, interval: Duration, task: Task) -> ScheduleHandle {
        let join = self.handle.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                task();
            }
        });
        ScheduleHandle::new(move || join.abort())
    }
}

struct Entry {
    id: u64,
    due: Duration,
    interval: Duration,
    task: Task,
}

#[derive(Default)]
struct VirtualTime {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Scheduler driven by virtual time; nothing fires until [`advance`](Self::advance).
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<VirtualTime>>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VirtualTime> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Elapsed virtual time.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of live schedules.
    pub fn pending(&self) -> usize {
        self.lock().entries.len()
    }

    /// Move virtual time forward, firing every task that falls due, in order.
    /// Returns the number of firings.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            // The lock is released before the task runs so it may cancel itself.
            let task = {
                let mut state = self.lock();
                let next = state
                    .entries
                    .iter_mut()
                    .filter(|e| e.due <= target)
                    .min_by_key(|e| (e.due, e.id));
                match next {
                    Some(entry) => {
                        let due = entry.due;
                        entry.due += entry.interval;
                        let task = Arc::clone(&entry.task);
                        state.now = due;
                        task
                    }
                    None => break,
                }
            };
            task();
            fired += 1;
        }

        self.lock().now = target;
        trace!("Virtual clock advanced to {:?} ({} firings)", target, fired);
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, task: Task) -> ScheduleHandle {
        let interval = interval.max(Duration::from_millis(1));
        let id = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now + interval;
            state.entries.push(Entry {
                id,
                due,
                interval,
                task,
            });
            id
        };

        let weak: Weak<Mutex<VirtualTime>> = Arc::downgrade(&self.inner);
        ScheduleHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
                state.entries.retain(|e| e.id != id);
            }
        })
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.entries.len())
            .finish()
    }
}
