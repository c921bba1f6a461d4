// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the cadence workspace
//!
//! Debounced and throttled callbacks are fire-and-forget, so the only failures
//! that surface through this crate come from the scheduler sitting underneath
//! a wrapper: a runtime that is not reachable, a virtual clock asked to go
//! backwards, or a custom scheduler refusing a task.
//!
//! # Examples
//!
//! ```
//! use cadence_error::{CadenceError, Result};
//!
//! fn schedule_reopen() -> Result<()> {
//!     Err(CadenceError::runtime_unavailable("no reactor running"))
//! }
//!
//! assert!(schedule_reopen().is_err());
//! ```

use std::time::Duration;

/// Root error type for all cadence operations
#[derive(Debug, thiserror::Error)]
pub enum CadenceError {
    /// The scheduler could not reach the runtime it spawns delayed tasks on
    ///
    /// Typically raised by the tokio scheduler when a wrapper is invoked
    /// outside of a tokio runtime context.
    #[error("Scheduler runtime unavailable: {context}")]
    RuntimeUnavailable {
        /// Details about why the runtime could not be reached
        context: String,
    },

    /// A virtual clock was asked to move to an instant before its current time
    #[error("Clock cannot move backwards: now is {now:?}, requested {target:?}")]
    ClockRegression {
        /// Current clock reading, measured from the clock's origin
        now: Duration,
        /// Requested reading, measured from the clock's origin
        target: Duration,
    },

    /// A scheduler rejected a delayed task
    ///
    /// Reserved for custom `Scheduler` implementations.
    #[error("Failed to schedule task: {context}")]
    SchedulingFailed {
        /// Description of the rejection
        context: String,
    },
}

impl CadenceError {
    /// Create a runtime unavailable error with the given context
    pub fn runtime_unavailable(context: impl Into<String>) -> Self {
        Self::RuntimeUnavailable {
            context: context.into(),
        }
    }

    /// Create a clock regression error
    #[must_use]
    pub const fn clock_regression(now: Duration, target: Duration) -> Self {
        Self::ClockRegression { now, target }
    }

    /// Create a scheduling failure with the given context
    pub fn scheduling_failed(context: impl Into<String>) -> Self {
        Self::SchedulingFailed {
            context: context.into(),
        }
    }

    /// Check if retrying the same call later could succeed
    ///
    /// A runtime may come up later; a backwards clock request never becomes valid.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RuntimeUnavailable { .. } | Self::SchedulingFailed { .. }
        )
    }
}

/// Specialized Result type for cadence operations
///
/// ```
/// use cadence_error::Result;
///
/// fn ready() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, CadenceError>;
