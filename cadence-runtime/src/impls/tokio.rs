// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
use cadence_error::{CadenceError, Result};

#[cfg(feature = "runtime-tokio")]
use crate::scheduler::{Scheduler, Task};

#[cfg(feature = "runtime-tokio")]
// Deadline used when `now + delay` is not representable. Matches tokio's own clamp.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Schedules tasks on the tokio runtime the caller is running in.
///
/// Each scheduled task is a spawned tokio task that sleeps until its deadline, then runs. Delays too
/// large to represent are clamped to a far-future deadline. Time is
/// read through `tokio::time`, so a paused test clock drives it too.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[cfg(feature = "runtime-tokio")]
impl Scheduler for TokioScheduler {
    type Handle = tokio::task::AbortHandle;

    type Instant = tokio::time::Instant;

    fn schedule(&self, delay: Duration, task: Task) -> Result<Self::Handle> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| CadenceError::runtime_unavailable(err.to_string()))?;

        // Fix the deadline now; the spawned task may not be polled until later.
        let now = tokio::time::Instant::now();
        let deadline = now.checked_add(delay).unwrap_or(now + FAR_FUTURE);
        let join = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task();
        });

        Ok(join.abort_handle())
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}
