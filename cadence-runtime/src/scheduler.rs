// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::Result;
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A unit of deferred work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

pub trait Scheduler: Clone + Send + Sync + Debug + 'static {
    /// Handle returned by [`schedule`](Scheduler::schedule), consumed by [`cancel`](Scheduler::cancel).
    type Handle: Send + 'static;

    type Instant: Copy
        + Debug
        + Ord
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    /// Runs `task` once `delay` has elapsed.
    ///
    /// The task never runs synchronously inside this call, even for a zero delay.
    ///
    /// # Errors
    /// Returns an error if the underlying runtime cannot accept the task.
    fn schedule(&self, delay: Duration, task: Task) -> Result<Self::Handle>;

    /// Prevents a scheduled task from running. No-op if it already ran.
    fn cancel(&self, handle: Self::Handle);

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}
