// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading throttle for callbacks.
//!
//! The wrapper holds a gate that starts open:
//! - When a call arrives and the gate is open:
//!   - Close the gate and schedule it to reopen after `limit`
//!   - Invoke the callback immediately, on the caller's stack
//! - When a call arrives and the gate is closed, drop it
//! - When the reopen task fires, open the gate
//!
//! Dropped calls are never queued or replayed. The callback takes no receiver.
//!
//! # Example
//!
//! ```rust
//! use cadence::ThrottleExt;
//! use cadence_runtime::ManualScheduler;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let scrolls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&scrolls);
//!
//! let on_scroll = (move |_offset: u32| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! })
//! .throttle_with_scheduler(Duration::from_millis(300), scheduler.clone());
//!
//! on_scroll.call(0);
//! on_scroll.call(10);
//! assert_eq!(scrolls.load(Ordering::SeqCst), 1);
//!
//! scheduler.advance(Duration::from_millis(300));
//! on_scroll.call(20);
//! assert_eq!(scrolls.load(Ordering::SeqCst), 2);
//! ```

use crate::logging::{log_warn, trace};
use cadence_error::Result;
use cadence_runtime::Scheduler;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
use cadence_runtime::TokioScheduler;

struct ThrottleState<H> {
    open: bool,
    reopen: Option<H>,
}

struct ThrottleShared<S: Scheduler, A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    limit: Duration,
    scheduler: S,
    state: Mutex<ThrottleState<S::Handle>>,
}

impl<S: Scheduler, A> ThrottleShared<S, A> {
    fn reopen(&self) {
        let mut state = self.state.lock();
        state.open = true;
        state.reopen = None;
        trace!("throttle gate reopened");
    }
}

/// A throttled callback.
///
/// Created by [`throttle`] or [`throttle_with_scheduler`]. Clones are handles
/// to the same instance: they share one gate.
pub struct Throttled<S: Scheduler, A> {
    shared: Arc<ThrottleShared<S, A>>,
}

impl<S, A> Throttled<S, A>
where
    S: Scheduler,
    A: Send + 'static,
{
    /// Invokes the callback now if the gate is open, otherwise drops the call.
    ///
    /// The reopen task is scheduled before the callback runs, so if scheduling
    /// fails the callback is not invoked. The failure is logged and the gate
    /// stays open.
    pub fn call(&self, args: A) {
        if let Err(err) = self.try_call(args) {
            log_warn!("throttle dropped call: {}", err);
        }
    }

    /// Like [`call`](Self::call), but reports scheduler failures.
    ///
    /// A call dropped because the gate is closed is not an error.
    ///
    /// # Errors
    /// Returns the scheduler's error if the reopen task cannot be scheduled. The
    /// gate then stays open and the callback is not invoked.
    pub fn try_call(&self, args: A) -> Result<()> {
        {
            let shared = &self.shared;
            let mut state = shared.state.lock();
            if !state.open {
                trace!("throttle dropped call, gate closed");
                return Ok(());
            }

            let task_shared = Arc::clone(shared);
            let handle = shared
                .scheduler
                .schedule(shared.limit, Box::new(move || task_shared.reopen()))?;
            state.open = false;
            state.reopen = Some(handle);
        }

        // Gate is closed before the callback runs so re-entrant calls are dropped.
        trace!("throttle passing call, gate closed for {:?}", self.shared.limit);
        (self.shared.callback)(args);
        Ok(())
    }

    /// Whether the next call would be passed through.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shared.state.lock().open
    }

    /// The minimum spacing between two invocations.
    #[must_use]
    pub fn limit(&self) -> Duration {
        self.shared.limit
    }
}

impl<S: Scheduler, A> Clone for Throttled<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Scheduler, A> fmt::Debug for Throttled<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Throttled")
            .field("limit", &self.shared.limit)
            .field("scheduler", &self.shared.scheduler)
            .field("open", &state.open)
            .field("reopen_scheduled", &state.reopen.is_some())
            .finish()
    }
}

/// Throttles `callback` to at most once per `limit` on the given scheduler.
pub fn throttle_with_scheduler<S, A, F>(
    callback: F,
    limit: Duration,
    scheduler: S,
) -> Throttled<S, A>
where
    S: Scheduler,
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        shared: Arc::new(ThrottleShared {
            callback: Box::new(callback),
            limit,
            scheduler,
            state: Mutex::new(ThrottleState {
                open: true,
                reopen: None,
            }),
        }),
    }
}

/// Throttles `callback` to at most once per `limit` on the ambient tokio runtime.
///
/// Outside a tokio runtime the reopen task cannot be scheduled, so calls are
/// logged and dropped; use [`Throttled::try_call`] to observe the error instead.
#[cfg(feature = "runtime-tokio")]
pub fn throttle<A, F>(callback: F, limit: Duration) -> Throttled<TokioScheduler, A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    throttle_with_scheduler(callback, limit, TokioScheduler)
}

/// Extension trait providing `throttle_with_scheduler` on callbacks.
pub trait ThrottleExt<A>: Fn(A) + Sized {
    /// Throttles this callback to at most once per `limit` on `scheduler`.
    fn throttle_with_scheduler<S: Scheduler>(self, limit: Duration, scheduler: S)
        -> Throttled<S, A>;
}

impl<F, A> ThrottleExt<A> for F
where
    F: Fn(A) + Send + Sync + 'static,
    A: Send + 'static,
{
    fn throttle_with_scheduler<S: Scheduler>(
        self,
        limit: Duration,
        scheduler: S,
    ) -> Throttled<S, A> {
        throttle_with_scheduler(self, limit, scheduler)
    }
}

/// Extension trait for throttling on the default tokio scheduler.
#[cfg(feature = "runtime-tokio")]
pub trait ThrottleWithDefaultSchedulerExt<A>: Fn(A) + Sized {
    /// Throttles this callback to at most once per `limit` using [`TokioScheduler`].
    fn throttled(self, limit: Duration) -> Throttled<TokioScheduler, A>;
}

#[cfg(feature = "runtime-tokio")]
impl<F, A> ThrottleWithDefaultSchedulerExt<A> for F
where
    F: Fn(A) + Send + Sync + 'static,
    A: Send + 'static,
{
    fn throttled(self, limit: Duration) -> Throttled<TokioScheduler, A> {
        throttle(self, limit)
    }
}
