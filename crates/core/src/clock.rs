// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! Timer deadlines use the monotonic `now()`; build timestamps use
//! `epoch_ms()`.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn epoch_ms(&self) -> u64;
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn system_epoch_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        system_epoch_ms()
    }
}

struct FakeTime {
    instant: Instant,
    epoch_ms: u64,
}

/// Fake clock for tests: time moves only when advanced. Clones share time.
#[derive(Clone)]
pub struct FakeClock {
    time: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::at_epoch_ms(1_000_000)
    }

    pub fn at_epoch_ms(epoch_ms: u64) -> Self {
        Self { time: Arc::new(Mutex::new(FakeTime { instant: Instant::now(), epoch_ms })) }
    }

    /// Advance both the monotonic and the wall clock
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock();
        time.instant += duration;
        time.epoch_ms += duration.as_millis() as u64;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.time.lock().instant
    }

    fn epoch_ms(&self) -> u64 {
        self.time.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
