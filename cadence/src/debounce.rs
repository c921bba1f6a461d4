// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing debounce for callbacks.
//!
//! Every call cancels the invocation scheduled by the previous one and schedules
//! a new one `delay` later. The callback therefore runs once per burst of calls,
//! `delay` after the last call of the burst, with that call's arguments and
//! receiver.
//!
//! # Example
//!
//! ```rust
//! use cadence::debounce_with_scheduler;
//! use cadence_runtime::ManualScheduler;
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let search = debounce_with_scheduler(
//!     move |query: &'static str| sink.lock().unwrap().push(query),
//!     Duration::from_millis(300),
//!     scheduler.clone(),
//! );
//!
//! search.call("r");
//! search.call("ru");
//! search.call("rust");
//! scheduler.advance(Duration::from_millis(300));
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["rust"]);
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

struct DebounceState<H> {
    pending: Option<H>,
    generation: u64,
}

struct DebounceShared<S: Scheduler, A, C> {
    callback: Box<dyn Fn(C, A) + Send + Sync>,
    delay: Duration,
    scheduler: S,
    state: Mutex<DebounceState<S::Handle>>,
}

impl<S: Scheduler, A, C> DebounceShared<S, A, C> {
    fn fire(&self, generation: u64, receiver: C, args: A) {
        {
            let mut state = self.state.lock();
            // A newer call superseded this task after it was already running.
            if state.generation != generation {
                trace!("debounce skipped stale invocation (generation {})", generation);
                return;
            }
            state.pending = None;
        }

        trace!("debounce firing (generation {})", generation);
        (self.callback)(receiver, args);
    }
}

/// A debounced callback.
///
/// Created by [`debounce`], [`debounce_with_scheduler`] or
/// [`debounce_with_receiver`]. Clones are handles to the same instance: they
/// share one pending invocation.
///
/// A scheduled invocation keeps the instance alive, so it still fires if every
/// handle is dropped before the delay elapses.
pub struct Debounced<S: Scheduler, A, C = ()> {
    shared: Arc<DebounceShared<S, A, C>>,
}

impl<S, A, C> Debounced<S, A, C>
where
    S: Scheduler,
    A: Send + 'static,
    C: Send + 'static,
{
    /// Schedules the callback with `receiver` and `args`, replacing any pending invocation.
    ///
    /// Scheduler failures are logged and the call is dropped.
    pub fn call_with(&self, receiver: C, args: A) {
        if let Err(err) = self.try_call_with(receiver, args) {
            log_warn!("debounce dropped call: {}", err);
        }
    }

    /// Like [`call_with`](Self::call_with), but reports scheduler failures.
    ///
    /// The previously pending invocation is cancelled even when scheduling the
    /// new one fails.
    ///
    /// # Errors
    /// Returns the scheduler's error if the delayed invocation cannot be scheduled.
    pub fn try_call_with(&self, receiver: C, args: A) -> Result<()> {
        let shared = &self.shared;
        let mut state = shared.state.lock();

        if let Some(previous) = state.pending.take() {
            shared.scheduler.cancel(previous);
            trace!("debounce cancelled generation {}", state.generation);
        }

        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;

        let task_shared = Arc::clone(shared);
        let handle = shared.scheduler.schedule(
            shared.delay,
            Box::new(move || task_shared.fire(generation, receiver, args)),
        )?;
        state.pending = Some(handle);

        trace!(
            "debounce scheduled generation {} in {:?}",
            generation,
            shared.delay
        );
        Ok(())
    }

    /// Whether an invocation is waiting for the quiet period to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }

    /// The quiet period that must follow the last call before the callback runs.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.shared.delay
    }
}

impl<S, A> Debounced<S, A>
where
    S: Scheduler,
    A: Send + 'static,
{
    /// Schedules the callback with `args`, replacing any pending invocation.
    pub fn call(&self, args: A) {
        self.call_with((), args);
    }

    /// Like [`call`](Self::call), but reports scheduler failures.
    ///
    /// # Errors
    /// Returns the scheduler's error if the delayed invocation cannot be scheduled.
    pub fn try_call(&self, args: A) -> Result<()> {
        self.try_call_with((), args)
    }
}

impl<S: Scheduler, A, C> Clone for Debounced<S, A, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Scheduler, A, C> fmt::Debug for Debounced<S, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Debounced")
            .field("delay", &self.shared.delay)
            .field("scheduler", &self.shared.scheduler)
            .field("pending", &state.pending.is_some())
            .field("generation", &state.generation)
            .finish()
    }
}

/// Debounces `callback` by `delay` on the given scheduler.
pub fn debounce_with_scheduler<S, A, F>(
    callback: F,
    delay: Duration,
    scheduler: S,
) -> Debounced<S, A>
where
    S: Scheduler,
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    debounce_with_receiver(move |(): (), args: A| callback(args), delay, scheduler)
}

/// Debounces a callback that also receives the caller's receiver context.
///
/// The receiver passed to the last [`Debounced::call_with`] of a burst is the
/// one the callback sees.
pub fn debounce_with_receiver<S, A, C, F>(
    callback: F,
    delay: Duration,
    scheduler: S,
) -> Debounced<S, A, C>
where
    S: Scheduler,
    A: Send + 'static,
    C: Send + 'static,
    F: Fn(C, A) + Send + Sync + 'static,
{
    Debounced {
        shared: Arc::new(DebounceShared {
            callback: Box::new(callback),
            delay,
            scheduler,
            state: Mutex::new(DebounceState {
                pending: None,
                generation: 0,
            }),
        }),
    }
}

/// Debounces `callback` by `delay` on the ambient tokio runtime.
///
/// Calls made outside a tokio runtime are logged and dropped; use
/// [`Debounced::try_call`] to observe the error instead.
#[cfg(feature = "runtime-tokio")]
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debounced<TokioScheduler, A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    debounce_with_scheduler(callback, delay, TokioScheduler)
}

/// Extension trait providing `debounce_with_scheduler` on callbacks.
pub trait DebounceExt<A>: Fn(A) + Sized {
    /// Debounces this callback by `delay` on `scheduler`.
    ///
    /// ```rust
    /// use cadence::DebounceExt;
    /// use cadence_runtime::ManualScheduler;
    /// use std::time::Duration;
    ///
    /// let scheduler = ManualScheduler::new();
    /// let save = (|draft: String| drop(draft))
    ///     .debounce_with_scheduler(Duration::from_millis(500), scheduler.clone());
    ///
    /// save.call("hello".to_string());
    /// assert!(save.is_pending());
    /// ```
    fn debounce_with_scheduler<S: Scheduler>(self, delay: Duration, scheduler: S)
        -> Debounced<S, A>;
}

impl<F, A> DebounceExt<A> for F
where
    F: Fn(A) + Send + Sync + 'static,
    A: Send + 'static,
{
    fn debounce_with_scheduler<S: Scheduler>(
        self,
        delay: Duration,
        scheduler: S,
    ) -> Debounced<S, A> {
        debounce_with_scheduler(self, delay, scheduler)
    }
}

/// Extension trait for debouncing on the default tokio scheduler.
#[cfg(feature = "runtime-tokio")]
pub trait DebounceWithDefaultSchedulerExt<A>: Fn(A) + Sized {
    /// Debounces this callback by `delay` using [`TokioScheduler`].
    fn debounced(self, delay: Duration) -> Debounced<TokioScheduler, A>;
}

#[cfg(feature = "runtime-tokio")]
impl<F, A> DebounceWithDefaultSchedulerExt<A> for F
where
    F: Fn(A) + Send + Sync + 'static,
    A: Send + 'static,
{
    fn debounced(self, delay: Duration) -> Debounced<TokioScheduler, A> {
        debounce(self, delay)
    }
}
