// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::prelude::*;
use cadence::{debounce, CadenceError};
use cadence_runtime::TokioScheduler;
use cadence_test_utils::helpers::{advance_and_settle, ms, settle};
use cadence_test_utils::test_data::{query_r, query_ru, query_rus, query_rust};
use cadence_test_utils::{CallRecorder, SearchQuery};
use std::time::Duration;
use tokio::time::pause;

#[tokio::test]
async fn test_debounce_emits_after_quiet_period() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = CallRecorder::new();
    let search = debounce(recorder.callback(TokioScheduler), ms(500));

    // Act & Assert
    search.try_call(query_rust())?;
    settle().await;
    assert_eq!(recorder.count(), 0);

    advance_and_settle(ms(100)).await;
    assert_eq!(recorder.count(), 0);

    advance_and_settle(ms(399)).await;
    assert_eq!(recorder.count(), 0);

    advance_and_settle(ms(2)).await;
    assert_eq!(recorder.values(), vec![query_rust()]);

    Ok(())
}

#[tokio::test]
async fn test_debounce_resets_on_new_call() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = CallRecorder::new();
    let search = debounce(recorder.callback(TokioScheduler), ms(500));

    // Act & Assert
    search.try_call(query_r())?;
    advance_and_settle(ms(300)).await;
    assert_eq!(recorder.count(), 0);

    search.try_call(query_ru())?;
    advance_and_settle(ms(300)).await;
    assert_eq!(recorder.count(), 0);

    advance_and_settle(ms(201)).await;
    assert_eq!(recorder.values(), vec![query_ru()]);

    Ok(())
}

#[tokio::test]
async fn test_debounce_multiple_resets() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = CallRecorder::new();
    let search = debounce(recorder.callback(TokioScheduler), ms(500));

    // Act
    for query in [query_r(), query_ru(), query_rus(), query_rust()] {
        search.try_call(query)?;
        advance_and_settle(ms(100)).await;
    }
    assert_eq!(recorder.count(), 0);
    advance_and_settle(ms(450)).await;

    // Assert
    assert_eq!(recorder.values(), vec![query_rust()]);
    assert!(!search.is_pending());

    Ok(())
}

#[tokio::test]
async fn test_debounced_ext_uses_tokio_scheduler() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = CallRecorder::new();
    let record = recorder.callback(TokioScheduler);
    let search = (move |query: SearchQuery| record(query.keystrokes)).debounced(ms(200));

    // Act
    search.call(query_rus());
    search.call(query_rust());
    advance_and_settle(ms(201)).await;

    // Assert
    assert_eq!(recorder.values(), vec![4]);

    Ok(())
}

#[test]
fn test_debounce_outside_runtime_reports_error() {
    // Arrange
    let recorder = CallRecorder::<SearchQuery, tokio::time::Instant>::new();
    let search = debounce(recorder.callback(TokioScheduler), ms(100));

    // Act
    let result = search.try_call(query_rust());
    search.call(query_r());

    // Assert
    assert!(matches!(result, Err(CadenceError::RuntimeUnavailable { .. })));
    assert!(!search.is_pending());
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_debounce_unrepresentable_delay_stays_pending() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = CallRecorder::new();
    let search = debounce(recorder.callback(TokioScheduler), Duration::MAX);

    // Act
    search.try_call(query_rust())?;
    advance_and_settle(Duration::from_secs(86_400)).await;

    // Assert
    assert_eq!(recorder.count(), 0);
    assert!(search.is_pending());

    Ok(())
}
