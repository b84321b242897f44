// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build store: the latest known builds per commit.
//!
//! Watchers only read the store. The backend writes to it as dispatched
//! lookups and creations complete, and every write bumps a version that
//! subscribers are notified of.

use bw_core::{Build, BuildKey, CommitId, EntryState, Repo, StoreEntry};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Read side of the build store
pub trait BuildStore: Clone + Send + Sync + 'static {
    /// Current entry for a commit (`NotLoaded` if never written)
    fn entry(&self, key: &BuildKey) -> StoreEntry;

    /// Builds for a commit, newest first. `None` means not loaded yet,
    /// as opposed to loaded with no builds.
    fn list_newest_by_commit(&self, repo: &Repo, commit_id: &CommitId) -> Option<Vec<Build>> {
        let key = BuildKey { repo: repo.clone(), commit_id: commit_id.clone() };
        self.entry(&key).builds().map(<[Build]>::to_vec)
    }

    /// Change notifications: the value is a store-wide version that
    /// increases on every write.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// In-memory build store shared between a backend and its watchers
#[derive(Clone)]
pub struct MemoryBuildStore {
    entries: Arc<Mutex<HashMap<BuildKey, StoreEntry>>>,
    version: Arc<watch::Sender<u64>>,
}

impl Default for MemoryBuildStore {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { entries: Arc::new(Mutex::new(HashMap::new())), version: Arc::new(tx) }
    }
}

impl MemoryBuildStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of a lookup. Builds are stored newest first.
    pub fn put_builds(&self, key: BuildKey, mut builds: Vec<Build>) {
        builds.sort_by(|a, b| b.id.cmp(&a.id));
        self.write(key, |state| *state = EntryState::Loaded(builds));
    }

    /// Record a failed lookup. Builds loaded earlier are dropped: the
    /// entry reflects the last lookup only.
    pub fn put_failure(&self, key: BuildKey, error: impl Into<String>) {
        let error = error.into();
        self.write(key, |state| *state = EntryState::Failed(error));
    }

    /// Insert or replace one build in its commit's entry.
    pub fn upsert_build(&self, build: Build) {
        let key = BuildKey { repo: build.repo.clone(), commit_id: build.commit_id.clone() };
        self.write(key, |state| {
            let mut builds = match std::mem::replace(state, EntryState::NotLoaded) {
                EntryState::Loaded(builds) => builds,
                EntryState::NotLoaded | EntryState::Failed(_) => Vec::new(),
            };
            match builds.iter_mut().find(|b| b.id == build.id) {
                Some(existing) => *existing = build,
                None => builds.push(build),
            }
            builds.sort_by(|a, b| b.id.cmp(&a.id));
            *state = EntryState::Loaded(builds);
        });
    }

    pub fn is_loaded(&self, key: &BuildKey) -> bool {
        self.entries.lock().get(key).is_some_and(StoreEntry::is_loaded)
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    fn write(&self, key: BuildKey, update: impl FnOnce(&mut EntryState)) {
        {
            let mut entries = self.entries.lock();
            let entry = entries.entry(key).or_default();
            update(&mut entry.state);
            entry.revision += 1;
        }
        // Notify after releasing the lock so subscribers can read immediately
        self.version.send_modify(|v| *v += 1);
    }
}

impl BuildStore for MemoryBuildStore {
    fn entry(&self, key: &BuildKey) -> StoreEntry {
        self.entries.lock().get(key).cloned().unwrap_or_default()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
