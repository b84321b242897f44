// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process build service.
//!
//! Holds builds per commit and assigns sequential IDs. Builds only move
//! through their lifecycle when told to (`advance_all`, `finish`), which
//! keeps simulations and tests deterministic.

use async_trait::async_trait;
use bw_core::{Branch, Build, BuildId, BuildKey, BuildStatus, Clock, CommitId, Repo, WatchTarget};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::{BuildService, ServiceError};

#[derive(Default)]
struct ServiceState {
    builds: HashMap<BuildKey, Vec<Build>>,
    next_id: u64,
    failing_lookups: u32,
    rejecting_creates: u32,
    lookups: usize,
}

impl ServiceState {
    fn next_id(&mut self) -> BuildId {
        self.next_id += 1;
        BuildId::new(self.next_id)
    }

    fn insert(&mut self, build: Build) {
        self.next_id = self.next_id.max(build.id.as_u64());
        let key = BuildKey::new(build.repo.clone(), build.commit_id.clone());
        let builds = self.builds.entry(key).or_default();
        builds.retain(|b| b.id != build.id);
        builds.push(build);
    }
}

/// Build service backed by memory
#[derive(Clone)]
pub struct MemoryBuildService<C: Clock> {
    state: Arc<Mutex<ServiceState>>,
    clock: C,
}

impl<C: Clock> MemoryBuildService<C> {
    pub fn new(clock: C) -> Self {
        Self { state: Arc::new(Mutex::new(ServiceState::default())), clock }
    }

    /// Add an existing build for a target in the given status.
    pub fn seed(&self, target: &WatchTarget, status: BuildStatus) -> Build {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        let id = state.next_id();
        let mut build =
            Build::queued(id, target.repo.clone(), target.commit_id.clone(), target.branch.clone());
        match status {
            BuildStatus::Queued => {}
            BuildStatus::InProgress => build.started_at_ms = Some(now),
            BuildStatus::Pass | BuildStatus::Failed => {
                build.started_at_ms = Some(now);
                build.ended_at_ms = Some(now);
                build.success = status == BuildStatus::Pass;
                build.failure = status == BuildStatus::Failed;
            }
        }
        state.insert(build.clone());
        build
    }

    /// Add or replace a build as-is.
    pub fn insert(&self, build: Build) {
        self.state.lock().insert(build);
    }

    /// Make the next `n` lookups fail.
    pub fn fail_next_lookups(&self, n: u32) {
        self.state.lock().failing_lookups = n;
    }

    /// Make the next `n` build requests get rejected.
    pub fn reject_next_creates(&self, n: u32) {
        self.state.lock().rejecting_creates = n;
    }

    /// Number of lookups served so far, failed ones included
    pub fn lookups(&self) -> usize {
        self.state.lock().lookups
    }

    /// Move every unfinished build one lifecycle stage forward: queued
    /// builds start, started builds end successfully. Returns how many
    /// builds changed.
    pub fn advance_all(&self) -> usize {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        let mut changed = 0;
        for build in state.builds.values_mut().flatten() {
            if build.status().is_terminal() {
                continue;
            }
            if build.has_started() {
                build.ended_at_ms = Some(now);
                build.success = true;
            } else {
                build.started_at_ms = Some(now);
            }
            changed += 1;
        }
        changed
    }

    /// End a build with the given outcome. Returns the updated build.
    pub fn finish(&self, id: BuildId, success: bool) -> Option<Build> {
        let now = self.clock.epoch_ms();
        let mut state = self.state.lock();
        let build = state.builds.values_mut().flatten().find(|b| b.id == id)?;
        build.started_at_ms.get_or_insert(now);
        build.ended_at_ms = Some(now);
        build.success = success;
        build.failure = !success;
        Some(build.clone())
    }

    /// Builds for a commit, newest first
    pub fn builds(&self, key: &BuildKey) -> Vec<Build> {
        let mut builds = self.state.lock().builds.get(key).cloned().unwrap_or_default();
        builds.sort_by(|a, b| b.id.cmp(&a.id));
        builds
    }
}

#[async_trait]
impl<C: Clock> BuildService for MemoryBuildService<C> {
    async fn newest_builds(&self, key: &BuildKey) -> Result<Vec<Build>, ServiceError> {
        {
            let mut state = self.state.lock();
            state.lookups += 1;
            if state.failing_lookups > 0 {
                state.failing_lookups -= 1;
                return Err(ServiceError::Unavailable(format!("lookup for {key} failed")));
            }
        }
        Ok(self.builds(key))
    }

    async fn create_build(
        &self,
        repo: &Repo,
        commit_id: &CommitId,
        branch: Option<&Branch>,
    ) -> Result<Build, ServiceError> {
        let mut state = self.state.lock();
        if state.rejecting_creates > 0 {
            state.rejecting_creates -= 1;
            return Err(ServiceError::Rejected(format!("no builds accepted for {repo}")));
        }
        let id = state.next_id();
        let build = Build::queued(id, repo.clone(), commit_id.clone(), branch.cloned());
        state.insert(build.clone());
        Ok(build)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
