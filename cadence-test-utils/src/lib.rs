// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the cadence workspace.
//!
//! Intended for development and testing only.
//!
//! # Key Types
//!
//! ## `CallRecorder<T, I>`
//!
//! Hands out callbacks that record every invocation together with the
//! scheduler's clock reading at that moment:
//!
//! ```rust
//! use cadence_runtime::{ManualScheduler, Scheduler};
//! use cadence_test_utils::CallRecorder;
//!
//! let scheduler = ManualScheduler::new();
//! let recorder = CallRecorder::new();
//! let callback = recorder.callback(scheduler.clone());
//!
//! callback("first");
//! assert_eq!(recorder.values(), vec!["first"]);
//! assert_eq!(recorder.times(), vec![scheduler.now()]);
//! ```
//!
//! ## Fixtures
//!
//! - [`test_data`] - search-as-you-type queries and receiver fixtures
//! - [`RejectingScheduler`] - a virtual clock that refuses tasks once its budget is spent
//!
//! ## Helpers
//!
//! - [`helpers::settle`] / [`helpers::advance_and_settle`] - drive tokio's paused clock
//!   and let woken tasks run

pub mod call_recorder;
pub mod helpers;
pub mod rejecting_scheduler;
pub mod test_data;

pub use call_recorder::{CallRecorder, RecordedCall};
pub use rejecting_scheduler::RejectingScheduler;
pub use test_data::{SearchBox, SearchQuery};
