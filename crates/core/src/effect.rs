// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the watcher needs the runtime to perform

use crate::action::BuildAction;
use crate::timer::TimerId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Effects that need to be executed by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Send an action over the dispatch channel
    Dispatch { action: BuildAction },

    /// Arm a one-shot timer, replacing any timer with the same ID
    SetTimer {
        id: TimerId,
        #[serde(with = "crate::duration_ms")]
        duration: Duration,
    },

    /// Cancel a timer (no-op when not armed)
    CancelTimer { id: TimerId },
}

impl Effect {
    /// Effect name for log spans
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Dispatch { .. } => "dispatch",
            Effect::SetTimer { .. } => "set_timer",
            Effect::CancelTimer { .. } => "cancel_timer",
        }
    }

    /// Key-value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Dispatch { action } => {
                let mut fields = vec![("action", action.name().to_string())];
                fields.extend(action.fields());
                fields
            }
            Effect::SetTimer { id, duration } => vec![
                ("timer_id", id.to_string()),
                ("duration_ms", duration.as_millis().to_string()),
            ],
            Effect::CancelTimer { id } => vec![("timer_id", id.to_string())],
        }
    }

    /// Whether to log at info level. Timer bookkeeping is logged at debug.
    pub fn verbose(&self) -> bool {
        matches!(self, Effect::Dispatch { .. })
    }

    /// The dispatched action, if this is a dispatch
    pub fn as_dispatch(&self) -> Option<&BuildAction> {
        match self {
            Effect::Dispatch { action } => Some(action),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
