// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dispatch::{ChannelDispatcher, Dispatcher};
use crate::service::MemoryBuildService;
use crate::store::BuildStore;
use bw_core::test_support::widgets_target;
use bw_core::{BuildStatus, EntryState, FakeClock};

struct TestBackend {
    backend: BuildBackend<MemoryBuildService<FakeClock>>,
    service: MemoryBuildService<FakeClock>,
    store: MemoryBuildStore,
}

fn setup() -> TestBackend {
    let service = MemoryBuildService::new(FakeClock::new());
    let store = MemoryBuildStore::new();
    TestBackend { backend: BuildBackend::new(service.clone(), store.clone()), service, store }
}

#[tokio::test]
async fn forced_lookup_writes_builds() {
    let t = setup();
    let target = widgets_target();
    let seeded = t.service.seed(&target, BuildStatus::InProgress);

    t.backend.handle(BuildAction::refresh(&target)).await;

    let builds = t.store.list_newest_by_commit(&target.repo, &target.commit_id).unwrap();
    assert_eq!(builds, vec![seeded]);
}

#[tokio::test]
async fn unforced_lookup_skips_loaded_entry() {
    let t = setup();
    let target = widgets_target();
    t.store.put_builds(target.key(), vec![]);

    t.backend
        .handle(BuildAction::WantNewestBuildForCommit {
            repo: target.repo.clone(),
            commit_id: target.commit_id.clone(),
            force: false,
        })
        .await;

    assert_eq!(t.service.lookups(), 0);
    assert_eq!(t.store.entry(&target.key()).revision, 1);
}

#[tokio::test]
async fn forced_lookup_reloads_loaded_entry() {
    let t = setup();
    let target = widgets_target();
    t.store.put_builds(target.key(), vec![]);

    t.backend.handle(BuildAction::refresh(&target)).await;

    assert_eq!(t.service.lookups(), 1);
    assert_eq!(t.store.entry(&target.key()).revision, 2);
}

#[tokio::test]
async fn lookup_failure_is_recorded() {
    let t = setup();
    let target = widgets_target();
    t.service.fail_next_lookups(1);

    t.backend.handle(BuildAction::refresh(&target)).await;

    assert!(matches!(t.store.entry(&target.key()).state, EntryState::Failed(_)));
}

#[tokio::test]
async fn create_inserts_queued_build() {
    let t = setup();
    let target = widgets_target();
    t.store.put_builds(target.key(), vec![]);

    t.backend.handle(BuildAction::create(&target)).await;

    let builds = t.store.list_newest_by_commit(&target.repo, &target.commit_id).unwrap();
    assert_eq!(builds.len(), 1);
    assert_eq!(builds[0].status(), BuildStatus::Queued);
    assert_eq!(builds[0].branch, target.branch);
}

#[tokio::test]
async fn rejected_create_leaves_store_untouched() {
    let t = setup();
    let target = widgets_target();
    t.store.put_builds(target.key(), vec![]);
    t.service.reject_next_creates(1);

    t.backend.handle(BuildAction::create(&target)).await;

    assert_eq!(t.store.entry(&target.key()).revision, 1);
    assert_eq!(t.store.list_newest_by_commit(&target.repo, &target.commit_id), Some(vec![]));
    assert!(t.service.builds(&target.key()).is_empty());

    // Only the next request was rejected
    t.backend.handle(BuildAction::create(&target)).await;
    assert_eq!(t.store.entry(&target.key()).revision, 2);
}

#[tokio::test]
async fn run_services_channel_until_cancelled() {
    let t = setup();
    let target = widgets_target();
    t.service.seed(&target, BuildStatus::Pass);
    let (dispatcher, rx) = ChannelDispatcher::channel();
    let cancel = CancellationToken::new();
    let mut versions = t.store.subscribe();

    let task = t.backend.spawn(rx, cancel.clone());
    dispatcher.dispatch(BuildAction::refresh(&target)).unwrap();
    versions.changed().await.unwrap();
    assert!(t.store.is_loaded(&target.key()));

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test]
async fn run_stops_when_dispatchers_are_gone() {
    let t = setup();
    let (dispatcher, rx) = ChannelDispatcher::channel();
    let task = t.backend.spawn(rx, CancellationToken::new());
    drop(dispatcher);
    task.await.unwrap();
}
