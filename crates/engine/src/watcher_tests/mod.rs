// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::scheduler::Scheduler;
use bw_core::test_support::{failed_build, passed_build, queued_build, running_build, widgets_target};
use bw_core::{Build, Clock, FakeClock, PollCadence, RetryPolicy};

mod dispose;
mod polling;
mod refresh;
mod request;
mod retry;

fn watcher_id() -> WatcherId {
    WatcherId::from_string("wch-test")
}

fn poll_timer() -> TimerId {
    TimerId::build_poll(&watcher_id())
}

fn retry_timer() -> TimerId {
    TimerId::lookup_retry(&watcher_id())
}

fn setup_with(buildable: bool, config: WatchConfig) -> BuildWatcher {
    let (watcher, _) = BuildWatcher::new(watcher_id(), widgets_target(), buildable, config);
    watcher
}

fn setup(buildable: bool) -> BuildWatcher {
    setup_with(buildable, WatchConfig::default())
}

/// Watcher that has already observed `builds` for the default target.
fn observed(buildable: bool, builds: Vec<Build>) -> BuildWatcher {
    let mut watcher = setup(buildable);
    watcher.observe(&loaded(1, builds));
    watcher
}

fn loaded(revision: u64, builds: Vec<Build>) -> StoreEntry {
    StoreEntry { revision, state: EntryState::Loaded(builds) }
}

fn failed(revision: u64, error: &str) -> StoreEntry {
    StoreEntry { revision, state: EntryState::Failed(error.to_string()) }
}

fn dispatched(effects: &[Effect]) -> Vec<BuildAction> {
    effects.iter().filter_map(Effect::as_dispatch).cloned().collect()
}

fn refreshes(effects: &[Effect]) -> usize {
    dispatched(effects).iter().filter(|a| a.is_refresh()).count()
}

/// Timers set by `effects`, in order
fn armed(effects: &[Effect]) -> Vec<(TimerId, Duration)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::SetTimer { id, duration } => Some((id.clone(), *duration)),
            _ => None,
        })
        .collect()
}

fn cancelled(effects: &[Effect]) -> Vec<TimerId> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::CancelTimer { id } => Some(id.clone()),
            _ => None,
        })
        .collect()
}

/// Apply timer effects to a scheduler the way the executor does.
fn apply(scheduler: &mut Scheduler, clock: &FakeClock, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::SetTimer { id, duration } => scheduler.set_timer(id.clone(), *duration, clock.now()),
            Effect::CancelTimer { id } => {
                scheduler.cancel_timer(id.as_str());
            }
            Effect::Dispatch { .. } => {}
        }
    }
}
