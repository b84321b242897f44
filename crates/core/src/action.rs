// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions sent over the dispatch channel to the build backend.

use serde::{Deserialize, Serialize};

use crate::id::{Branch, CommitId, Repo};
use crate::target::WatchTarget;

/// Requests consumed by the build backend.
///
/// Serializes with `{"type": "build:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildAction {
    /// Look up the newest builds for a commit. `force` bypasses any
    /// already-loaded store entry.
    #[serde(rename = "build:want_newest")]
    WantNewestBuildForCommit { repo: Repo, commit_id: CommitId, force: bool },

    /// Enqueue a new build for a commit.
    #[serde(rename = "build:create")]
    CreateBuild {
        repo: Repo,
        commit_id: CommitId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        branch: Option<Branch>,
    },
}

impl BuildAction {
    /// Forced refresh of the newest build for a target.
    pub fn refresh(target: &WatchTarget) -> Self {
        BuildAction::WantNewestBuildForCommit {
            repo: target.repo.clone(),
            commit_id: target.commit_id.clone(),
            force: true,
        }
    }

    /// Build creation request for a target, carrying its branch.
    pub fn create(target: &WatchTarget) -> Self {
        BuildAction::CreateBuild {
            repo: target.repo.clone(),
            commit_id: target.commit_id.clone(),
            branch: target.branch.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildAction::WantNewestBuildForCommit { .. } => "build:want_newest",
            BuildAction::CreateBuild { .. } => "build:create",
        }
    }

    /// Key-value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            BuildAction::WantNewestBuildForCommit { repo, commit_id, force } => vec![
                ("repo", repo.to_string()),
                ("commit", commit_id.to_string()),
                ("force", force.to_string()),
            ],
            BuildAction::CreateBuild { repo, commit_id, branch } => {
                let mut fields = vec![("repo", repo.to_string()), ("commit", commit_id.to_string())];
                if let Some(branch) = branch {
                    fields.push(("branch", branch.to_string()));
                }
                fields
            }
        }
    }

    pub fn is_refresh(&self) -> bool {
        matches!(self, BuildAction::WantNewestBuildForCommit { .. })
    }

    pub fn is_create(&self) -> bool {
        matches!(self, BuildAction::CreateBuild { .. })
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
