// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::{CadenceError, Result};
use cadence_runtime::{ManualInstant, ManualScheduler, ManualTaskHandle, Scheduler, Task};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// A [`ManualScheduler`] that accepts a fixed number of tasks, then rejects
/// every later one with [`CadenceError::SchedulingFailed`].
///
/// Clones share the clock and the remaining budget.
#[derive(Clone, Debug)]
pub struct RejectingScheduler {
    inner: ManualScheduler,
    remaining: Arc<Mutex<usize>>,
}

impl RejectingScheduler {
    #[must_use]
    pub fn accepting(budget: usize) -> Self {
        Self {
            inner: ManualScheduler::new(),
            remaining: Arc::new(Mutex::new(budget)),
        }
    }

    /// The virtual clock driving the accepted tasks.
    #[must_use]
    pub fn clock(&self) -> &ManualScheduler {
        &self.inner
    }
}

impl Scheduler for RejectingScheduler {
    type Handle = ManualTaskHandle;

    type Instant = ManualInstant;

    fn schedule(&self, delay: Duration, task: Task) -> Result<Self::Handle> {
        {
            let mut remaining = self.remaining.lock();
            if *remaining == 0 {
                return Err(CadenceError::scheduling_failed("scheduling budget exhausted"));
            }
            *remaining -= 1;
        }
        self.inner.schedule(delay, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        self.inner.cancel(handle);
    }

    fn now(&self) -> Self::Instant {
        self.inner.now()
    }
}
