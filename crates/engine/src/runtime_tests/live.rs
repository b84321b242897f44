// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawned runtime against the in-memory backend, on paused tokio time.

use super::*;
use crate::backend::BuildBackend;
use crate::clock::TokioClock;
use crate::dispatch::ChannelDispatcher;
use crate::error::RuntimeError;
use crate::service::MemoryBuildService;
use crate::watcher::BuildRequestError;
use tokio_util::sync::{CancellationToken, DropGuard};

struct Live {
    handle: WatchHandle,
    service: MemoryBuildService<TokioClock>,
    _backend: DropGuard,
}

fn start(service: MemoryBuildService<TokioClock>, buildable: bool) -> Live {
    let store = MemoryBuildStore::new();
    let (dispatcher, actions) = ChannelDispatcher::channel();
    let cancel = CancellationToken::new();
    BuildBackend::new(service.clone(), store.clone()).spawn(actions, cancel.clone());

    let runtime = WatchRuntime::new(
        RuntimeDeps { store, dispatcher, clock: TokioClock },
        widgets_target(),
        buildable,
        WatchConfig::default(),
    )
    .unwrap();
    Live { handle: runtime.spawn(), service, _backend: cancel.drop_guard() }
}

async fn wait_for(handle: &WatchHandle, mut pred: impl FnMut(&WatchSnapshot) -> bool) -> WatchSnapshot {
    let mut rx = handle.subscribe();
    let result = tokio::time::timeout(Duration::from_secs(120), rx.wait_for(|s| pred(s))).await;
    match result {
        Ok(Ok(snapshot)) => snapshot.clone(),
        _ => panic!("condition not reached, last snapshot: {:?}", handle.snapshot()),
    }
}

#[tokio::test(start_paused = true)]
async fn follows_build_to_completion() {
    let service = MemoryBuildService::new(TokioClock);
    service.seed(&widgets_target(), BuildStatus::InProgress);
    let live = start(service, false);

    let snapshot = wait_for(&live.handle, |s| s.lookup.status() == Some(BuildStatus::InProgress)).await;
    assert_eq!(snapshot.poll_interval_ms, Some(5_000));

    live.service.advance_all();
    let snapshot = wait_for(&live.handle, |s| s.lookup.status() == Some(BuildStatus::Pass)).await;
    assert_eq!(snapshot.poll_interval_ms, Some(15_000));
    assert_eq!(snapshot.indicator.title(), Some("Build #1 pass"));
}

#[tokio::test(start_paused = true)]
async fn polls_running_build_every_five_seconds() {
    let service = MemoryBuildService::new(TokioClock);
    service.seed(&widgets_target(), BuildStatus::Queued);
    let live = start(service, false);
    wait_for(&live.handle, |s| s.lookup.build().is_some()).await;
    let before = live.service.lookups();

    tokio::time::sleep(Duration::from_millis(5_100)).await;
    assert_eq!(live.service.lookups(), before + 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(live.service.lookups(), before + 2);
}

#[tokio::test(start_paused = true)]
async fn requested_build_shows_up_queued() {
    let live = start(MemoryBuildService::new(TokioClock), true);
    wait_for(&live.handle, |s| s.can_request_build).await;

    live.handle.request_build().await.unwrap();
    let snapshot = wait_for(&live.handle, |s| s.lookup.status() == Some(BuildStatus::Queued)).await;
    assert!(!snapshot.can_request_build);
    assert_eq!(live.service.builds(&widgets_target().key()).len(), 1);

    let err = live.handle.request_build().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Refused(BuildRequestError::Exists(_))));
}

#[tokio::test(start_paused = true)]
async fn request_refused_when_not_buildable() {
    let live = start(MemoryBuildService::new(TokioClock), false);
    wait_for(&live.handle, |s| s.lookup.is_empty()).await;

    let err = live.handle.request_build().await.unwrap_err();
    assert!(matches!(err, RuntimeError::Refused(BuildRequestError::NotBuildable)));

    live.handle.set_buildable(true).unwrap();
    wait_for(&live.handle, |s| s.can_request_build).await;
}

#[tokio::test(start_paused = true)]
async fn failed_lookups_are_retried() {
    let service = MemoryBuildService::new(TokioClock);
    service.seed(&widgets_target(), BuildStatus::Pass);
    service.fail_next_lookups(2);
    let live = start(service, false);

    wait_for(&live.handle, |s| s.lookup.status() == Some(BuildStatus::Pass)).await;
    assert_eq!(live.service.lookups(), 3);
}

#[tokio::test(start_paused = true)]
async fn target_change_follows_new_commit() {
    let service = MemoryBuildService::new(TokioClock);
    let next = WatchTarget::new("acme/widgets", "def456");
    service.seed(&next, BuildStatus::Failed);
    let live = start(service, false);
    wait_for(&live.handle, |s| s.lookup.is_empty()).await;

    live.handle.set_target(next.clone()).unwrap();
    let snapshot =
        wait_for(&live.handle, |s| s.target == next && s.lookup.build().is_some()).await;
    assert_eq!(snapshot.lookup.status(), Some(BuildStatus::Failed));
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_refreshes() {
    let service = MemoryBuildService::new(TokioClock);
    service.seed(&widgets_target(), BuildStatus::InProgress);
    let live = start(service, false);
    wait_for(&live.handle, |s| s.lookup.build().is_some()).await;

    let Live { handle, service, _backend } = live;
    handle.shutdown().await.unwrap();
    let lookups = service.lookups();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(service.lookups(), lookups);
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_stops_refreshes() {
    let service = MemoryBuildService::new(TokioClock);
    service.seed(&widgets_target(), BuildStatus::InProgress);
    let live = start(service, false);
    wait_for(&live.handle, |s| s.lookup.build().is_some()).await;

    let Live { handle, service, _backend } = live;
    drop(handle);
    // Let the runtime observe cancellation before time moves
    tokio::task::yield_now().await;
    let lookups = service.lookups();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(service.lookups(), lookups);
}
