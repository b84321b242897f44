// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events that drive a build watcher.

use serde::{Deserialize, Serialize};

use crate::target::WatchTarget;
use crate::timer::TimerId;

/// Inputs to the watch runtime, processed one at a time.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WatchEvent {
    /// The caller switched to a different repository, commit, or branch
    #[serde(rename = "watch:target")]
    TargetChanged { target: WatchTarget },

    #[serde(rename = "watch:buildable")]
    BuildableChanged { buildable: bool },

    /// The build store changed; the watcher re-reads its entry
    #[serde(rename = "store:updated")]
    StoreUpdated,

    #[serde(rename = "timer:fired")]
    TimerFired { id: TimerId },

    /// The user asked for a build of the watched commit
    #[serde(rename = "build:requested")]
    BuildRequested,
}

impl WatchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WatchEvent::TargetChanged { .. } => "watch:target",
            WatchEvent::BuildableChanged { .. } => "watch:buildable",
            WatchEvent::StoreUpdated => "store:updated",
            WatchEvent::TimerFired { .. } => "timer:fired",
            WatchEvent::BuildRequested => "build:requested",
        }
    }

    /// One-line summary for logs
    pub fn log_summary(&self) -> String {
        match self {
            WatchEvent::TargetChanged { target } => format!("{} {}", self.name(), target.log()),
            WatchEvent::BuildableChanged { buildable } => {
                format!("{} buildable={}", self.name(), buildable)
            }
            WatchEvent::TimerFired { id } => format!("{} id={}", self.name(), id),
            WatchEvent::StoreUpdated | WatchEvent::BuildRequested => self.name().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
