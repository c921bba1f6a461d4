// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scheduler abstraction for the cadence wrappers.
//!
//! A [`Scheduler`](scheduler::Scheduler) runs a boxed task once a delay has
//! elapsed and hands back a handle that can cancel it. Two implementations ship:
//!
//! - [`TokioScheduler`](impls::tokio::TokioScheduler) (feature `runtime-tokio`, default)
//! - [`ManualScheduler`](impls::manual::ManualScheduler), a virtual clock that only
//!   moves when told to

pub mod impls;
pub mod scheduler;

pub use impls::manual::{ManualInstant, ManualScheduler, ManualTaskHandle};
#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioScheduler;
pub use scheduler::{Scheduler, Task};
