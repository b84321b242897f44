// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Log filter directive: `BW_LOG` (default `warn`)
pub fn log_filter() -> String {
    std::env::var("BW_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "warn".to_string())
}

/// Config file used when `--config` is not given
pub fn config_path() -> Option<PathBuf> {
    std::env::var("BW_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Poll interval override for unfinished builds
pub fn poll_active() -> Option<Duration> {
    duration_ms("BW_POLL_ACTIVE_MS")
}

/// Poll interval override for ended builds
pub fn poll_ended() -> Option<Duration> {
    duration_ms("BW_POLL_ENDED_MS")
}

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.trim().parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
