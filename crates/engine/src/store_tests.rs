// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bw_core::test_support::{passed_build, queued_build, running_build, widgets_target};

fn key() -> BuildKey {
    widgets_target().key()
}

#[test]
fn unknown_commit_is_not_loaded() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    assert_eq!(store.entry(&key()), StoreEntry::not_loaded());
    assert_eq!(store.list_newest_by_commit(&target.repo, &target.commit_id), None);
    assert!(!store.is_loaded(&key()));
}

#[test]
fn loaded_empty_differs_from_not_loaded() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.put_builds(key(), vec![]);
    assert_eq!(store.list_newest_by_commit(&target.repo, &target.commit_id), Some(vec![]));
    assert!(store.is_loaded(&key()));
}

#[test]
fn builds_are_kept_newest_first() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.put_builds(key(), vec![queued_build(1, &target), queued_build(3, &target), queued_build(2, &target)]);

    let ids: Vec<u64> = store
        .list_newest_by_commit(&target.repo, &target.commit_id)
        .unwrap()
        .iter()
        .map(|b| b.id.as_u64())
        .collect();
    assert_eq!(ids, [3, 2, 1]);
}

#[test]
fn every_write_bumps_entry_revision_and_version() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();

    store.put_builds(key(), vec![]);
    assert_eq!(store.entry(&key()).revision, 1);
    store.put_failure(key(), "service unavailable");
    assert_eq!(store.entry(&key()).revision, 2);
    store.upsert_build(queued_build(1, &target));
    assert_eq!(store.entry(&key()).revision, 3);
    assert_eq!(store.version(), 3);
}

#[test]
fn failure_replaces_loaded_builds() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.put_builds(key(), vec![queued_build(1, &target)]);
    store.put_failure(key(), "timeout");

    assert_eq!(store.entry(&key()).state, EntryState::Failed("timeout".to_string()));
    assert_eq!(store.list_newest_by_commit(&target.repo, &target.commit_id), None);
}

#[test]
fn upsert_replaces_build_with_same_id() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.put_builds(key(), vec![queued_build(1, &target)]);
    store.upsert_build(running_build(1, &target, 10));
    store.upsert_build(passed_build(2, &target, 50));

    let builds = store.list_newest_by_commit(&target.repo, &target.commit_id).unwrap();
    assert_eq!(builds, vec![passed_build(2, &target, 50), running_build(1, &target, 10)]);
}

#[test]
fn upsert_into_unloaded_entry_loads_it() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.upsert_build(queued_build(4, &target));
    assert!(store.is_loaded(&key()));
}

#[tokio::test]
async fn subscribers_see_writes() {
    let store = MemoryBuildStore::new();
    let mut rx = store.subscribe();

    store.put_builds(key(), vec![]);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 1);
}
