// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifiers.
//!
//! Every timer belongs to one watcher. The timer ID encodes its purpose and
//! the owning watcher, e.g. `build-poll:wch-...`, so a fired timer can be
//! routed without a side table.

use crate::id::WatcherId;

crate::define_name! {
    /// Unique identifier for a scheduled timer.
    pub struct TimerId;
}

impl TimerId {
    /// Periodic refresh of the watched build.
    pub fn build_poll(watcher: &WatcherId) -> Self {
        TimerKind::BuildPoll(watcher.clone()).to_timer_id()
    }

    /// Backoff retry after a failed lookup.
    pub fn lookup_retry(watcher: &WatcherId) -> Self {
        TimerKind::LookupRetry(watcher.clone()).to_timer_id()
    }

    /// Parse this timer ID into a typed `TimerKind`.
    pub fn kind(&self) -> Option<TimerKind> {
        TimerKind::parse(self.as_str())
    }

    /// The watcher that owns this timer, if the ID is well-formed.
    pub fn watcher_id(&self) -> Option<WatcherId> {
        match self.kind()? {
            TimerKind::BuildPoll(id) | TimerKind::LookupRetry(id) => Some(id),
        }
    }
}

/// Parsed representation of a timer ID for type-safe routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind {
    BuildPoll(WatcherId),
    LookupRetry(WatcherId),
}

impl TimerKind {
    /// Parse a timer ID string. Returns `None` for unrecognized formats.
    pub fn parse(id: &str) -> Option<TimerKind> {
        if let Some(rest) = id.strip_prefix("build-poll:") {
            return parse_watcher(rest).map(TimerKind::BuildPoll);
        }
        if let Some(rest) = id.strip_prefix("lookup-retry:") {
            return parse_watcher(rest).map(TimerKind::LookupRetry);
        }
        None
    }

    /// Format this `TimerKind` back into its canonical `TimerId`.
    pub fn to_timer_id(&self) -> TimerId {
        match self {
            TimerKind::BuildPoll(id) => TimerId::new(format!("build-poll:{id}")),
            TimerKind::LookupRetry(id) => TimerId::new(format!("lookup-retry:{id}")),
        }
    }
}

fn parse_watcher(s: &str) -> Option<WatcherId> {
    if s.is_empty() || s.contains(':') {
        return None;
    }
    Some(WatcherId::from_string(s))
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
