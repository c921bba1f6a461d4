// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce and throttle wrappers for callbacks.
//!
//! Each factory takes a callback and returns a wrapper whose `call` method
//! forwards to the callback under a timing rule. Delayed work goes through the
//! [`Scheduler`] trait, so wrappers run on tokio or on a virtual clock.
//!
//! # Overview
//!
//! - **[`Debounced`]** - Fires once, `delay` after the last call of a burst, with that call's arguments
//! - **[`Throttled`]** - Fires immediately, then drops calls until `limit` has elapsed
//! - **[`DebounceExt`] / [`ThrottleExt`]** - `.debounce_with_scheduler(..)` / `.throttle_with_scheduler(..)` on closures
//! - **`DebounceWithDefaultSchedulerExt` / `ThrottleWithDefaultSchedulerExt`** - `.debounced(..)` / `.throttled(..)` on tokio
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - [`TokioScheduler`](cadence_runtime::TokioScheduler) and the
//!   scheduler-less factories [`debounce()`] and [`throttle()`]
//! - [`ManualScheduler`](cadence_runtime::ManualScheduler) is always available
//!
//! Enable the `tracing` feature to emit scheduling events through `tracing`.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let search = (|query: String| println!("searching for {query}"))
//!     .debounced(Duration::from_millis(300));
//! let report = (|offset: u32| println!("scrolled to {offset}"))
//!     .throttled(Duration::from_millis(100));
//!
//! search.call("ru".to_string());
//! search.call("rust".to_string()); // only this one is searched, 300ms from now
//!
//! report.call(0); // runs now
//! report.call(40); // dropped
//! # }
//! ```

mod debounce;
mod logging;
mod throttle;

pub mod prelude;

pub use cadence_error::{CadenceError, Result};
pub use cadence_runtime::Scheduler;

pub use debounce::{debounce_with_receiver, debounce_with_scheduler, DebounceExt, Debounced};
pub use throttle::{throttle_with_scheduler, ThrottleExt, Throttled};

#[cfg(feature = "runtime-tokio")]
pub use debounce::{debounce, DebounceWithDefaultSchedulerExt};
#[cfg(feature = "runtime-tokio")]
pub use throttle::{throttle, ThrottleWithDefaultSchedulerExt};
