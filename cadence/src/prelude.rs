// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the commonly used traits and types.
//!
//! ```ignore
//! use cadence::prelude::*;
//!
//! let save = save_draft.debounced(Duration::from_millis(500));
//! let scroll = on_scroll.throttle_with_scheduler(Duration::from_millis(100), scheduler);
//! ```
//!
//! # Contents
//!
//! - [`DebounceExt`] / [`ThrottleExt`] - Wrap a closure on an explicit scheduler
//! - `DebounceWithDefaultSchedulerExt` / `ThrottleWithDefaultSchedulerExt` - Wrap a closure on tokio
//! - [`Debounced`] / [`Throttled`] - The wrappers
//! - [`Scheduler`] - Delayed-task abstraction

pub use crate::debounce::{DebounceExt, Debounced};
pub use crate::throttle::{ThrottleExt, Throttled};
pub use cadence_runtime::Scheduler;

#[cfg(feature = "runtime-tokio")]
pub use crate::debounce::DebounceWithDefaultSchedulerExt;
#[cfg(feature = "runtime-tokio")]
pub use crate::throttle::ThrottleWithDefaultSchedulerExt;
