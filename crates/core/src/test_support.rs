// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Build, BuildId, WatchTarget};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core types.
pub mod strategies {
    use crate::{Build, BuildId, WatchTarget};
    use proptest::prelude::*;

    pub fn arb_target() -> impl Strategy<Value = WatchTarget> {
        ("[a-z]{1,8}/[a-z]{1,8}", "[0-9a-f]{7,40}", proptest::option::of("[a-z]{1,10}")).prop_map(
            |(repo, commit, branch)| {
                let target = WatchTarget::new(repo.as_str(), commit.as_str());
                match branch {
                    Some(branch) => target.with_branch(branch.as_str()),
                    None => target,
                }
            },
        )
    }

    pub fn arb_build() -> impl Strategy<Value = Build> {
        (
            1u64..10_000,
            arb_target(),
            proptest::option::of(0u64..1_000_000),
            proptest::option::of(0u64..1_000_000),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(id, target, started_at_ms, ended_at_ms, success, failure)| Build {
                id: BuildId::new(id),
                repo: target.repo,
                commit_id: target.commit_id,
                branch: target.branch,
                started_at_ms,
                ended_at_ms,
                success,
                failure,
            })
    }
}

// ── Factory functions ─────────────────────────────────────────────────

/// The target used throughout the watcher tests.
pub fn widgets_target() -> WatchTarget {
    WatchTarget::new("acme/widgets", "abc123").with_branch("main")
}

pub fn queued_build(id: u64, target: &WatchTarget) -> Build {
    Build::queued(BuildId::new(id), target.repo.clone(), target.commit_id.clone(), target.branch.clone())
}

pub fn running_build(id: u64, target: &WatchTarget, started_at_ms: u64) -> Build {
    Build { started_at_ms: Some(started_at_ms), ..queued_build(id, target) }
}

pub fn passed_build(id: u64, target: &WatchTarget, ended_at_ms: u64) -> Build {
    Build {
        started_at_ms: Some(ended_at_ms.saturating_sub(1_000)),
        ended_at_ms: Some(ended_at_ms),
        success: true,
        ..queued_build(id, target)
    }
}

pub fn failed_build(id: u64, target: &WatchTarget, ended_at_ms: u64) -> Build {
    Build {
        started_at_ms: Some(ended_at_ms.saturating_sub(1_000)),
        ended_at_ms: Some(ended_at_ms),
        failure: true,
        ..queued_build(id, target)
    }
}
