// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build status watcher.
//!
//! Tracks the newest build for one watch target. The watcher never performs
//! I/O: every operation returns the effects the runtime must execute.
//!
//! - Changing the target forces a refresh of the new target.
//! - Each newly observed build (re)arms the single poll timer: the active
//!   interval while the build runs, the ended interval once it has ended.
//! - A fired poll timer refreshes whatever the current target is.
//! - Fresh lookup failures arm a backoff retry until attempts run out.

use bw_core::{
    BuildAction, BuildId, BuildKey, BuildLookup, Effect, EntryState, Indicator, StoreEntry,
    TimerId, TimerKind, WatchConfig, WatchTarget, WatcherId,
};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Why a build request was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildRequestError {
    #[error("target is not buildable")]
    NotBuildable,
    #[error("build lookup has not completed")]
    Loading,
    #[error("build #{0} already exists")]
    Exists(BuildId),
    #[error("build lookup failed")]
    LookupFailed,
    #[error("watcher is disposed")]
    Disposed,
}

pub struct BuildWatcher {
    id: WatcherId,
    target: WatchTarget,
    buildable: bool,
    config: WatchConfig,
    lookup: BuildLookup,
    /// Interval of the armed poll timer; `None` until a build is seen
    poll_interval: Option<Duration>,
    retry_armed: bool,
    /// Consecutive failed lookups for the current target
    failures: u32,
    /// Store revision last observed per key, kept across target changes
    seen_revisions: HashMap<BuildKey, u64>,
    disposed: bool,
}

impl BuildWatcher {
    /// Create a watcher along with the initial forced refresh.
    pub fn new(
        id: WatcherId,
        target: WatchTarget,
        buildable: bool,
        config: WatchConfig,
    ) -> (Self, Vec<Effect>) {
        tracing::debug!(watcher = %id, target = %target.log(), buildable, "watcher created");
        let effects = vec![Effect::Dispatch { action: BuildAction::refresh(&target) }];
        let watcher = Self {
            id,
            target,
            buildable,
            config,
            lookup: BuildLookup::Loading,
            poll_interval: None,
            retry_armed: false,
            failures: 0,
            seen_revisions: HashMap::new(),
            disposed: false,
        };
        (watcher, effects)
    }

    pub fn id(&self) -> &WatcherId {
        &self.id
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    pub fn key(&self) -> BuildKey {
        self.target.key()
    }

    pub fn buildable(&self) -> bool {
        self.buildable
    }

    pub fn lookup(&self) -> &BuildLookup {
        &self.lookup
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval
    }

    pub fn is_retry_armed(&self) -> bool {
        self.retry_armed
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn indicator(&self) -> Indicator {
        Indicator::derive(&self.target.repo, &self.lookup, self.buildable)
    }

    fn poll_timer(&self) -> TimerId {
        TimerId::build_poll(&self.id)
    }

    fn retry_timer(&self) -> TimerId {
        TimerId::lookup_retry(&self.id)
    }

    /// Switch to a new target. An identical target is a no-op.
    ///
    /// The poll timer is left armed: it keeps polling the current target.
    pub fn set_target(&mut self, target: WatchTarget) -> Vec<Effect> {
        if self.disposed || target == self.target {
            return vec![];
        }
        tracing::info!(watcher = %self.id, from = %self.target, to = %target, "target changed");

        let mut effects = self.reset_failures();
        self.target = target;
        self.lookup = BuildLookup::Loading;
        effects.push(Effect::Dispatch { action: BuildAction::refresh(&self.target) });
        effects
    }

    /// Update whether a build may be requested. Never refreshes.
    pub fn set_buildable(&mut self, buildable: bool) {
        if !self.disposed {
            self.buildable = buildable;
        }
    }

    /// Derive the current build from the store entry for the current target.
    pub fn observe(&mut self, entry: &StoreEntry) -> Vec<Effect> {
        if self.disposed {
            return vec![];
        }
        let seen = self.seen_revisions.insert(self.target.key(), entry.revision);
        let fresh = seen != Some(entry.revision);

        match &entry.state {
            EntryState::NotLoaded => {
                self.lookup = BuildLookup::Loading;
                vec![]
            }
            EntryState::Failed(error) => {
                if !fresh {
                    return vec![];
                }
                self.on_lookup_failed(error.clone())
            }
            EntryState::Loaded(builds) => {
                let mut effects = self.reset_failures();
                let lookup = BuildLookup::from_builds(Some(builds));
                let previous = std::mem::replace(&mut self.lookup, lookup);
                let rearm = match &self.lookup {
                    BuildLookup::Found(build) if previous.build() != Some(build) => {
                        tracing::debug!(
                            watcher = %self.id,
                            build = %build.id,
                            status = %build.status(),
                            "build changed"
                        );
                        Some(self.config.poll.interval_for(build))
                    }
                    _ => None,
                };
                if let Some(interval) = rearm {
                    effects.extend(self.arm_poll(interval));
                }
                effects
            }
        }
    }

    /// React to one of this watcher's timers firing.
    pub fn on_timer(&mut self, id: &TimerId) -> Vec<Effect> {
        if self.disposed {
            return vec![];
        }
        match id.kind() {
            Some(TimerKind::BuildPoll(owner)) if owner == self.id => {
                // Re-arm first so a failed dispatch cannot stop polling
                let interval = self
                    .lookup
                    .build()
                    .map(|build| self.config.poll.interval_for(build))
                    .or(self.poll_interval)
                    .unwrap_or(self.config.poll.active);
                self.poll_interval = Some(interval);
                vec![
                    Effect::SetTimer { id: self.poll_timer(), duration: interval },
                    Effect::Dispatch { action: BuildAction::refresh(&self.target) },
                ]
            }
            Some(TimerKind::LookupRetry(owner)) if owner == self.id => {
                self.retry_armed = false;
                tracing::debug!(watcher = %self.id, attempts = self.failures, "retrying lookup");
                vec![Effect::Dispatch { action: BuildAction::refresh(&self.target) }]
            }
            _ => {
                tracing::debug!(watcher = %self.id, timer = %id, "ignoring foreign timer");
                vec![]
            }
        }
    }

    /// Whether [`request_build`](Self::request_build) would be accepted.
    pub fn can_request_build(&self) -> bool {
        self.check_build_request().is_ok()
    }

    /// Request a new build for the current target.
    pub fn request_build(&mut self) -> Result<Vec<Effect>, BuildRequestError> {
        self.check_build_request()?;
        tracing::info!(watcher = %self.id, target = %self.target.log(), "requesting build");
        Ok(vec![Effect::Dispatch { action: BuildAction::create(&self.target) }])
    }

    fn check_build_request(&self) -> Result<(), BuildRequestError> {
        if self.disposed {
            return Err(BuildRequestError::Disposed);
        }
        if !self.buildable {
            return Err(BuildRequestError::NotBuildable);
        }
        match &self.lookup {
            BuildLookup::Empty => Ok(()),
            BuildLookup::Loading => Err(BuildRequestError::Loading),
            BuildLookup::Found(build) => Err(BuildRequestError::Exists(build.id)),
            BuildLookup::Failed { .. } => Err(BuildRequestError::LookupFailed),
        }
    }

    /// Cancel every armed timer. Later operations are no-ops.
    pub fn dispose(&mut self) -> Vec<Effect> {
        if self.disposed {
            return vec![];
        }
        self.disposed = true;
        let mut effects = Vec::new();
        if self.poll_interval.take().is_some() {
            effects.push(Effect::CancelTimer { id: self.poll_timer() });
        }
        if std::mem::take(&mut self.retry_armed) {
            effects.push(Effect::CancelTimer { id: self.retry_timer() });
        }
        tracing::debug!(watcher = %self.id, "watcher disposed");
        effects
    }

    fn arm_poll(&mut self, interval: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.poll_interval.is_some() {
            effects.push(Effect::CancelTimer { id: self.poll_timer() });
        }
        self.poll_interval = Some(interval);
        effects.push(Effect::SetTimer { id: self.poll_timer(), duration: interval });
        effects
    }

    fn on_lookup_failed(&mut self, error: String) -> Vec<Effect> {
        self.failures += 1;
        let attempts = self.failures;
        tracing::warn!(watcher = %self.id, target = %self.target.log(), attempts, %error, "build lookup failed");
        self.lookup = BuildLookup::Failed { error, attempts };

        match self.config.retry.delay_for(attempts) {
            Some(delay) => {
                self.retry_armed = true;
                vec![Effect::SetTimer { id: self.retry_timer(), duration: delay }]
            }
            None => {
                tracing::warn!(watcher = %self.id, attempts, "giving up on lookup retries");
                vec![]
            }
        }
    }

    fn reset_failures(&mut self) -> Vec<Effect> {
        self.failures = 0;
        if std::mem::take(&mut self.retry_armed) {
            vec![Effect::CancelTimer { id: self.retry_timer() }]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests/mod.rs"]
mod tests;
