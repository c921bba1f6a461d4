// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic scheduler driven by a virtual clock.
//!
//! Nothing runs until the clock is moved with [`ManualScheduler::advance`],
//! [`ManualScheduler::advance_to`] or [`ManualScheduler::run_until_idle`].
//! Tasks run on the thread that moves the clock, ordered by deadline and then
//! by the order they were scheduled in. A task due at `t` runs once the clock
//! reaches `t`.
//!
//! ```
//! use cadence_runtime::{ManualScheduler, Scheduler};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let runs = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&runs);
//!
//! scheduler
//!     .schedule(Duration::from_millis(300), Box::new(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     }))
//!     .unwrap();
//!
//! assert_eq!(scheduler.advance(Duration::from_millis(299)), 0);
//! assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
//! assert_eq!(runs.load(Ordering::SeqCst), 1);
//! ```

use crate::scheduler::{Scheduler, Task};
use cadence_error::{CadenceError, Result};
use core::fmt;
use core::ops::{Add, Sub};
use core::time::Duration;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A reading of a [`ManualScheduler`] clock, measured from its origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualInstant(Duration);

impl ManualInstant {
    /// The instant a fresh scheduler starts at.
    pub const ORIGIN: Self = Self(Duration::ZERO);

    #[must_use]
    pub const fn from_origin(offset: Duration) -> Self {
        Self(offset)
    }

    #[must_use]
    pub const fn since_origin(self) -> Duration {
        self.0
    }
}

impl Add<Duration> for ManualInstant {
    type Output = ManualInstant;

    fn add(self, duration: Duration) -> Self::Output {
        ManualInstant(self.0.saturating_add(duration))
    }
}

impl Sub<Duration> for ManualInstant {
    type Output = ManualInstant;

    fn sub(self, duration: Duration) -> Self::Output {
        ManualInstant(self.0.saturating_sub(duration))
    }
}

impl Sub<ManualInstant> for ManualInstant {
    type Output = Duration;

    fn sub(self, other: ManualInstant) -> Self::Output {
        self.0.saturating_sub(other.0)
    }
}

/// Identifies one task queued on a [`ManualScheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ManualTaskHandle {
    deadline: ManualInstant,
    id: u64,
}

impl ManualTaskHandle {
    #[must_use]
    pub const fn deadline(&self) -> ManualInstant {
        self.deadline
    }
}

#[derive(Default)]
struct ManualQueue {
    now: ManualInstant,
    next_id: u64,
    tasks: BTreeMap<(ManualInstant, u64), Task>,
}

impl ManualQueue {
    /// Pops the earliest task due at or before `target`, moving the clock to its deadline.
    fn pop_due(&mut self, target: ManualInstant) -> Option<Task> {
        let (&(deadline, _), _) = self.tasks.first_key_value()?;
        if deadline > target {
            return None;
        }

        let (_, task) = self.tasks.pop_first()?;
        self.now = self.now.max(deadline);
        Some(task)
    }
}

/// Virtual-clock scheduler. Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks scheduled while advancing run in the same pass if they fall due
    /// before the target. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.queue.lock().now + by;
        self.run_until(target)
    }

    /// Moves the clock to `target`, running every task that falls due.
    ///
    /// # Errors
    /// Returns [`CadenceError::ClockRegression`] if `target` is earlier than [`now`](Scheduler::now).
    pub fn advance_to(&self, target: ManualInstant) -> Result<usize> {
        let now = self.queue.lock().now;
        if target < now {
            return Err(CadenceError::clock_regression(
                now.since_origin(),
                target.since_origin(),
            ));
        }
        Ok(self.run_until(target))
    }

    /// Runs queued tasks, jumping the clock to each deadline, until the queue is empty.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.lock().pop_due(ManualInstant(Duration::MAX));
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Number of tasks waiting for the clock.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.queue.lock().tasks.len()
    }

    fn run_until(&self, target: ManualInstant) -> usize {
        let mut ran = 0;
        loop {
            // The lock is released before the task runs so it can schedule or cancel.
            let next = {
                let mut queue = self.queue.lock();
                let next = queue.pop_due(target);
                if next.is_none() {
                    queue.now = queue.now.max(target);
                }
                next
            };

            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending_tasks", &queue.tasks.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTaskHandle;

    type Instant = ManualInstant;

    fn schedule(&self, delay: Duration, task: Task) -> Result<Self::Handle> {
        let mut queue = self.queue.lock();
        let deadline = queue.now + delay;
        let id = queue.next_id;
        queue.next_id += 1;
        queue.tasks.insert((deadline, id), task);
        Ok(ManualTaskHandle { deadline, id })
    }

    fn cancel(&self, handle: Self::Handle) {
        self.queue.lock().tasks.remove(&(handle.deadline, handle.id));
    }

    fn now(&self) -> Self::Instant {
        self.queue.lock().now
    }
}
