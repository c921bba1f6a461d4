// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_runtime::Scheduler;
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall<T, I> {
    pub value: T,
    pub at: I,
}

/// Records invocations of the callbacks it hands out. Clones share one log.
#[derive(Debug)]
pub struct CallRecorder<T, I> {
    calls: Arc<Mutex<Vec<RecordedCall<T, I>>>>,
}

impl<T, I> CallRecorder<T, I>
where
    T: Send + 'static,
    I: Send + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A callback that records its argument stamped with `scheduler.now()`.
    pub fn callback<S>(&self, scheduler: S) -> impl Fn(T) + Send + Sync + 'static
    where
        S: Scheduler<Instant = I>,
    {
        let calls = Arc::clone(&self.calls);
        move |value: T| {
            let at = scheduler.now();
            calls.lock().push(RecordedCall { value, at });
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall<T, I>>
    where
        T: Clone,
        I: Clone,
    {
        self.calls.lock().clone()
    }

    #[must_use]
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.calls.lock().iter().map(|call| call.value.clone()).collect()
    }

    #[must_use]
    pub fn times(&self) -> Vec<I>
    where
        I: Copy,
    {
        self.calls.lock().iter().map(|call| call.at).collect()
    }
}

impl<C, A, I> CallRecorder<(C, A), I>
where
    C: Send + 'static,
    A: Send + 'static,
    I: Send + 'static,
{
    /// A receiver-taking callback that records `(receiver, args)`.
    pub fn receiver_callback<S>(&self, scheduler: S) -> impl Fn(C, A) + Send + Sync + 'static
    where
        S: Scheduler<Instant = I>,
    {
        let record = self.callback(scheduler);
        move |receiver: C, args: A| record((receiver, args))
    }
}

impl<T, I> Clone for CallRecorder<T, I> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T, I> Default for CallRecorder<T, I>
where
    T: Send + 'static,
    I: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
