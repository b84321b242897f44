// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build records and status classification.
//!
//! A [`Build`] is one execution record for a commit of a repository. Builds
//! are created and advanced by the build service; the watcher only reads
//! them. A build moves from queued to in progress and ends either passed or
//! failed.

use crate::id::{Branch, CommitId, Repo};
use serde::{Deserialize, Serialize};

/// Numeric identifier assigned to a build by the build service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(u64);

impl BuildId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single build of one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    pub repo: Repo,
    pub commit_id: CommitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<u64>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub failure: bool,
}

impl Build {
    /// A freshly created build: not started, not ended, no outcome.
    pub fn queued(id: BuildId, repo: Repo, commit_id: CommitId, branch: Option<Branch>) -> Self {
        Self {
            id,
            repo,
            commit_id,
            branch,
            started_at_ms: None,
            ended_at_ms: None,
            success: false,
            failure: false,
        }
    }

    pub fn status(&self) -> BuildStatus {
        BuildStatus::of(self)
    }

    pub fn has_started(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn has_ended(&self) -> bool {
        self.ended_at_ms.is_some()
    }
}

crate::builder! {
    pub struct BuildBuilder => Build {
        into {
            repo: Repo = "acme/widgets",
            commit_id: CommitId = "abc123",
        }
        set {
            id: BuildId = BuildId::new(1),
            success: bool = false,
            failure: bool = false,
        }
        option {
            branch: Branch = None,
            started_at_ms: u64 = None,
            ended_at_ms: u64 = None,
        }
    }
}

/// Status label of a build, as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Failed,
    Pass,
    InProgress,
    Queued,
}

crate::simple_display! {
    BuildStatus {
        Failed => "failed",
        Pass => "pass",
        InProgress => "in progress",
        Queued => "queued",
    }
}

impl BuildStatus {
    /// Classify a build.
    ///
    /// Checks run in order: failure, success, started-but-not-ended. A build
    /// matching none of them is queued. A build that is flagged failed while
    /// still running classifies as failed.
    pub fn of(build: &Build) -> Self {
        if build.failure {
            BuildStatus::Failed
        } else if build.success {
            BuildStatus::Pass
        } else if build.has_started() && !build.has_ended() {
            BuildStatus::InProgress
        } else {
            BuildStatus::Queued
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BuildStatus::Failed | BuildStatus::Pass)
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
