// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build lookup results.
//!
//! [`StoreEntry`] is what the build store holds for one commit.
//! [`BuildLookup`] is what a watcher derives from it: whether the lookup is
//! still loading, found nothing, found a build, or failed.

use serde::{Deserialize, Serialize};

use crate::build::{Build, BuildStatus};

/// State of the store's knowledge about one commit's builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum EntryState {
    /// No lookup has completed yet
    NotLoaded,
    /// Builds for the commit, newest first (possibly none)
    Loaded(Vec<Build>),
    /// The last lookup failed
    Failed(String),
}

/// One commit's entry in the build store.
///
/// `revision` increases on every write to the entry, so a reader can tell
/// a fresh result from one it has already seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub revision: u64,
    pub state: EntryState,
}

impl StoreEntry {
    pub fn not_loaded() -> Self {
        Self { revision: 0, state: EntryState::NotLoaded }
    }

    /// Loaded builds, newest first. `None` until a lookup has succeeded.
    pub fn builds(&self) -> Option<&[Build]> {
        match &self.state {
            EntryState::Loaded(builds) => Some(builds),
            EntryState::NotLoaded | EntryState::Failed(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EntryState::Loaded(_))
    }
}

impl Default for StoreEntry {
    fn default() -> Self {
        Self::not_loaded()
    }
}

/// The current build for a watch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BuildLookup {
    /// Lookup has not resolved yet
    Loading,
    /// Lookup resolved and no build exists for the commit
    Empty,
    /// The newest build for the commit
    Found(Build),
    /// Lookup failed `attempts` times in a row
    Failed { error: String, attempts: u32 },
}

impl BuildLookup {
    /// Derive a lookup from a newest-first build list, where `None` means
    /// the list has not been loaded yet.
    pub fn from_builds(builds: Option<&[Build]>) -> Self {
        match builds {
            None => BuildLookup::Loading,
            Some(builds) => match builds.first() {
                Some(newest) => BuildLookup::Found(newest.clone()),
                None => BuildLookup::Empty,
            },
        }
    }

    pub fn build(&self) -> Option<&Build> {
        match self {
            BuildLookup::Found(build) => Some(build),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<BuildStatus> {
        self.build().map(Build::status)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, BuildLookup::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BuildLookup::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BuildLookup::Failed { .. })
    }
}

impl std::fmt::Display for BuildLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildLookup::Loading => f.write_str("loading"),
            BuildLookup::Empty => f.write_str("none"),
            BuildLookup::Found(build) => write!(f, "build #{} {}", build.id, build.status()),
            BuildLookup::Failed { attempts, .. } => write!(f, "failed ({attempts} attempts)"),
        }
    }
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
