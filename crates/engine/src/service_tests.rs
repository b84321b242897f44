// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bw_core::test_support::{queued_build, widgets_target};
use bw_core::FakeClock;
use yare::parameterized;

fn service() -> MemoryBuildService<FakeClock> {
    MemoryBuildService::new(FakeClock::new())
}

#[parameterized(
    queued = { BuildStatus::Queued },
    in_progress = { BuildStatus::InProgress },
    pass = { BuildStatus::Pass },
    failed = { BuildStatus::Failed },
)]
fn seed_produces_requested_status(status: BuildStatus) {
    let build = service().seed(&widgets_target(), status);
    assert_eq!(build.status(), status);
}

#[tokio::test]
async fn lookups_return_newest_first() {
    let service = service();
    let target = widgets_target();
    service.seed(&target, BuildStatus::Pass);
    service.seed(&target, BuildStatus::Queued);

    let builds = service.newest_builds(&target.key()).await.unwrap();
    let ids: Vec<u64> = builds.iter().map(|b| b.id.as_u64()).collect();
    assert_eq!(ids, [2, 1]);
}

#[tokio::test]
async fn unknown_commit_has_no_builds() {
    let builds = service().newest_builds(&BuildKey::new("acme/other", "fff")).await.unwrap();
    assert!(builds.is_empty());
}

#[tokio::test]
async fn failing_lookups_are_counted_down() {
    let service = service();
    let key = widgets_target().key();
    service.fail_next_lookups(2);

    assert!(service.newest_builds(&key).await.is_err());
    assert!(service.newest_builds(&key).await.is_err());
    assert!(service.newest_builds(&key).await.is_ok());
    assert_eq!(service.lookups(), 3);
}

#[tokio::test]
async fn created_builds_are_queued_with_next_id() {
    let service = service();
    let target = widgets_target();
    service.insert(queued_build(7, &target));

    let build = service
        .create_build(&target.repo, &target.commit_id, target.branch.as_ref())
        .await
        .unwrap();
    assert_eq!(build.id, BuildId::new(8));
    assert_eq!(build.status(), BuildStatus::Queued);
    assert_eq!(build.branch, target.branch);
    assert_eq!(service.builds(&target.key()).len(), 2);
}

#[tokio::test]
async fn rejected_creates_add_no_build() {
    let service = service();
    let target = widgets_target();
    service.reject_next_creates(1);

    let err = service.create_build(&target.repo, &target.commit_id, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
    assert!(service.builds(&target.key()).is_empty());

    let build = service.create_build(&target.repo, &target.commit_id, None).await.unwrap();
    assert_eq!(build.id, BuildId::new(1));
}

#[test]
fn advance_moves_one_stage_at_a_time() {
    let clock = FakeClock::new();
    let service = MemoryBuildService::new(clock.clone());
    let target = widgets_target();
    let build = service.seed(&target, BuildStatus::Queued);

    assert_eq!(service.advance_all(), 1);
    assert_eq!(service.builds(&target.key())[0].status(), BuildStatus::InProgress);

    clock.advance(std::time::Duration::from_secs(30));
    assert_eq!(service.advance_all(), 1);
    let done = &service.builds(&target.key())[0];
    assert_eq!(done.id, build.id);
    assert_eq!(done.status(), BuildStatus::Pass);
    assert_eq!(done.ended_at_ms, Some(clock.epoch_ms()));

    assert_eq!(service.advance_all(), 0);
}

#[test]
fn finish_sets_outcome() {
    let service = service();
    let target = widgets_target();
    let build = service.seed(&target, BuildStatus::InProgress);

    let finished = service.finish(build.id, false).unwrap();
    assert_eq!(finished.status(), BuildStatus::Failed);
    assert!(service.finish(BuildId::new(99), true).is_none());
}
