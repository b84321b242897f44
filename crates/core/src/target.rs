// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{Branch, CommitId, Repo};

/// The commit whose build status is being watched.
///
/// Two targets are the same only if repository, commit, and branch all
/// match; any difference means the watcher has to look the build up again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchTarget {
    pub repo: Repo,
    pub commit_id: CommitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
}

impl WatchTarget {
    pub fn new(repo: impl Into<Repo>, commit_id: impl Into<CommitId>) -> Self {
        Self { repo: repo.into(), commit_id: commit_id.into(), branch: None }
    }

    pub fn with_branch(mut self, branch: impl Into<Branch>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Store key for this target. Builds are stored per commit, so the
    /// branch is not part of the key.
    pub fn key(&self) -> BuildKey {
        BuildKey { repo: self.repo.clone(), commit_id: self.commit_id.clone() }
    }

    pub fn log(&self) -> String {
        match &self.branch {
            Some(branch) => format!("repo={} commit={} branch={}", self.repo, self.commit_id, branch),
            None => format!("repo={} commit={}", self.repo, self.commit_id),
        }
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repo, self.commit_id)?;
        if let Some(branch) = &self.branch {
            write!(f, " ({})", branch)?;
        }
        Ok(())
    }
}

/// Key under which builds are stored: repository plus commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildKey {
    pub repo: Repo,
    pub commit_id: CommitId,
}

impl BuildKey {
    pub fn new(repo: impl Into<Repo>, commit_id: impl Into<CommitId>) -> Self {
        Self { repo: repo.into(), commit_id: commit_id.into() }
    }
}

impl fmt::Display for BuildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repo, self.commit_id)
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
