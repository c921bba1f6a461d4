// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::{throttle_with_scheduler, CadenceError, ThrottleExt, Throttled};
use cadence_runtime::{ManualInstant, ManualScheduler};
use cadence_test_utils::helpers::ms;
use cadence_test_utils::{CallRecorder, RejectingScheduler};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

fn at(millis: u64) -> ManualInstant {
    ManualInstant::from_origin(ms(millis))
}

#[test]
fn test_throttle_drops_calls_inside_window() -> anyhow::Result<()> {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        ms(300),
        scheduler.clone(),
    );

    // Act
    for t in [0, 50, 100, 250, 400] {
        scheduler.advance_to(at(t))?;
        scroll.call(t);
    }

    // Assert
    assert_eq!(recorder.values(), vec![0, 400]);
    assert_eq!(recorder.times(), vec![at(0), at(400)]);

    Ok(())
}

#[test]
fn test_throttle_gate_reopens_exactly_at_limit() -> anyhow::Result<()> {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        ms(300),
        scheduler.clone(),
    );

    // Act
    scroll.call(0);
    scheduler.advance_to(at(299))?;
    scroll.call(299);
    scheduler.advance_to(at(300))?;
    scroll.call(300);

    // Assert
    assert_eq!(recorder.values(), vec![0, 300]);
    assert_eq!(recorder.times(), vec![at(0), at(300)]);

    Ok(())
}

#[test]
fn test_throttle_invokes_synchronously() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        ms(300),
        scheduler.clone(),
    );

    // Act
    scroll.call("first");

    // Assert
    assert_eq!(recorder.values(), vec!["first"]);
    assert_eq!(scheduler.pending_tasks(), 1);
}

#[test]
fn test_throttle_never_replays_dropped_calls() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        ms(300),
        scheduler.clone(),
    );

    // Act
    scroll.call(1);
    scroll.call(2);
    scroll.call(3);
    scheduler.advance(Duration::from_secs(10));

    // Assert
    assert_eq!(recorder.values(), vec![1]);
    assert!(scroll.is_open());
}

#[test]
fn test_throttle_is_open_tracks_gate() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let scroll = throttle_with_scheduler(|_: u32| {}, ms(300), scheduler.clone());

    // Act & Assert
    assert!(scroll.is_open());

    scroll.call(0);
    assert!(!scroll.is_open());

    scheduler.advance(ms(299));
    assert!(!scroll.is_open());

    scheduler.advance(ms(1));
    assert!(scroll.is_open());
}

#[test]
fn test_throttle_reentrant_call_is_dropped() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let record = recorder.callback(scheduler.clone());
    let slot: Arc<OnceLock<Throttled<ManualScheduler, u32>>> = Arc::new(OnceLock::new());
    let inner_slot = Arc::clone(&slot);

    let scroll = throttle_with_scheduler(
        move |n: u32| {
            record(n);
            if let Some(wrapper) = inner_slot.get() {
                wrapper.call(n + 1);
            }
        },
        ms(300),
        scheduler.clone(),
    );
    assert!(slot.set(scroll.clone()).is_ok());

    // Act
    scroll.call(1);
    scheduler.advance(ms(300));

    // Assert
    assert_eq!(recorder.values(), vec![1]);
    assert!(scroll.is_open());
}

#[test]
fn test_throttle_instances_from_same_callback_are_independent() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let callback = Arc::new(recorder.callback(scheduler.clone()));
    let left = {
        let callback = Arc::clone(&callback);
        throttle_with_scheduler(move |v: &'static str| callback(v), ms(300), scheduler.clone())
    };
    let right = {
        let callback = Arc::clone(&callback);
        throttle_with_scheduler(move |v: &'static str| callback(v), ms(300), scheduler.clone())
    };

    // Act
    left.call("left");
    right.call("right");
    left.call("left again");

    // Assert
    assert_eq!(recorder.values(), vec!["left", "right"]);
    assert!(!left.is_open());
    assert!(!right.is_open());
}

#[test]
fn test_throttle_clones_share_gate() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        ms(300),
        scheduler.clone(),
    );
    let clone = scroll.clone();

    // Act
    scroll.call(1);
    clone.call(2);

    // Assert
    assert_eq!(recorder.values(), vec![1]);
    assert!(!clone.is_open());
}

#[test]
fn test_throttle_panicking_callback_does_not_wedge_gate() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let record = recorder.callback(scheduler.clone());
    let scroll = throttle_with_scheduler(
        move |n: u32| {
            assert!(n != 0, "refusing offset zero");
            record(n);
        },
        ms(300),
        scheduler.clone(),
    );

    // Act
    let outcome = catch_unwind(AssertUnwindSafe(|| scroll.call(0)));
    scheduler.advance(ms(300));
    scroll.call(1);

    // Assert
    assert!(outcome.is_err());
    assert_eq!(recorder.values(), vec![1]);
}

#[test]
fn test_throttle_zero_limit_reopens_on_next_advance() {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        Duration::ZERO,
        scheduler.clone(),
    );

    // Act
    scroll.call(0);
    scroll.call(1);
    scheduler.advance(Duration::ZERO);
    scroll.call(2);

    // Assert
    assert_eq!(recorder.values(), vec![0, 2]);
}

#[test]
fn test_throttle_ext_wraps_closure() -> anyhow::Result<()> {
    // Arrange
    let scheduler = ManualScheduler::new();
    let recorder = CallRecorder::new();
    let record = recorder.callback(scheduler.clone());
    let resize = (move |(width, height): (u32, u32)| record(width * height))
        .throttle_with_scheduler(ms(100), scheduler.clone());

    // Act
    resize.try_call((4, 3))?;
    resize.try_call((8, 6))?;
    scheduler.advance(ms(100));
    resize.try_call((2, 5))?;

    // Assert
    assert_eq!(recorder.values(), vec![12, 10]);
    assert_eq!(resize.limit(), ms(100));

    Ok(())
}

#[test]
fn test_throttle_failed_reopen_keeps_gate_open_without_invoking() {
    // Arrange
    let scheduler = RejectingScheduler::accepting(1);
    let recorder = CallRecorder::new();
    let scroll = throttle_with_scheduler(
        recorder.callback(scheduler.clone()),
        ms(300),
        scheduler.clone(),
    );
    let first = scroll.try_call(0_u32);
    scheduler.clock().advance(ms(300));

    // Act
    let second = scroll.try_call(300);
    scroll.call(301);

    // Assert
    assert!(first.is_ok());
    assert!(matches!(second, Err(CadenceError::SchedulingFailed { .. })));
    assert!(scroll.is_open());
    assert_eq!(recorder.values(), vec![0]);
}
