// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot timer scheduler.
//!
//! Holds deadlines only; the runtime asks it which timers are due and
//! sleeps until the next deadline. Periodic timers are re-armed by whoever
//! handles the fired event.

use bw_core::{TimerId, WatchEvent};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Timer {
    deadline: Instant,
    /// Arm order, breaks ties between equal deadlines
    seq: u64,
}

/// Deadline-ordered timers keyed by ID. At most one timer per ID.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<TimerId, Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer to fire `duration` after `now`, replacing any timer with
    /// the same ID.
    pub fn set_timer(&mut self, id: TimerId, duration: Duration, now: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(id, Timer { deadline: now + duration, seq });
    }

    /// Returns whether a timer was armed under `id`.
    pub fn cancel_timer(&mut self, id: &str) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.timers.contains_key(id)
    }

    pub fn deadline(&self, id: &str) -> Option<Instant> {
        self.timers.get(id).map(|t| t.deadline)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove every timer due at `now` and return their events, earliest
    /// deadline first.
    pub fn fired_timers(&mut self, now: Instant) -> Vec<WatchEvent> {
        let mut due: Vec<(TimerId, Timer)> = Vec::new();
        self.timers.retain(|id, timer| {
            if timer.deadline <= now {
                due.push((id.clone(), *timer));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, t)| (t.deadline, t.seq));
        due.into_iter().map(|(id, _)| WatchEvent::TimerFired { id }).collect()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
