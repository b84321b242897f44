// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll cadence and lookup retry policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::build::Build;

/// Default refresh interval while the watched build has not ended.
pub const ACTIVE_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default refresh interval once the watched build has ended. Still polled,
/// since a rebuild of the same commit can supersede it.
pub const ENDED_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// How often a watcher refreshes a build it has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollCadence {
    #[serde(rename = "active_ms", with = "crate::duration_ms")]
    pub active: Duration,
    #[serde(rename = "ended_ms", with = "crate::duration_ms")]
    pub ended: Duration,
}

impl PollCadence {
    pub fn new(active: Duration, ended: Duration) -> Self {
        Self { active, ended }
    }

    /// Poll interval for a build: `ended` once it has an end time,
    /// `active` otherwise.
    pub fn interval_for(&self, build: &Build) -> Duration {
        if build.has_ended() {
            self.ended
        } else {
            self.active
        }
    }
}

impl Default for PollCadence {
    fn default() -> Self {
        Self { active: ACTIVE_POLL_INTERVAL, ended: ENDED_POLL_INTERVAL }
    }
}

/// Bounded exponential backoff for failed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Retries after consecutive failures; 0 disables retrying
    pub max_attempts: u32,
    #[serde(rename = "base_ms", with = "crate::duration_ms")]
    pub base: Duration,
    #[serde(rename = "max_ms", with = "crate::duration_ms")]
    pub max: Duration,
}

impl RetryPolicy {
    /// Delay before retrying after the `attempt`-th consecutive failure
    /// (1-based): `base * 2^(attempt - 1)`, capped at `max`.
    ///
    /// Returns `None` once `attempt` exceeds `max_attempts`.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        let delay = self.base.checked_mul(factor).unwrap_or(self.max);
        Some(delay.min(self.max))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 5, base: Duration::from_secs(1), max: Duration::from_secs(30) }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
