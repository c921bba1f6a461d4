// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::advance;

const SETTLE_YIELDS: usize = 8;

/// Yields enough times for tasks woken by the paused clock to run to completion.
pub async fn settle() {
    for _ in 0..SETTLE_YIELDS {
        yield_now().await;
    }
}

/// Advances tokio's paused clock by `by`, then [`settle`]s.
///
/// Requires `tokio::time::pause()` on a current-thread runtime.
pub async fn advance_and_settle(by: Duration) {
    advance(by).await;
    settle().await;
}

#[must_use]
pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
