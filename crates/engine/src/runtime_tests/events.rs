// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dispatch::Dispatcher;
use crate::error::RuntimeError;
use crate::watcher::BuildRequestError;

#[test]
fn construction_dispatches_refresh() {
    let ctx = setup(false);

    assert_eq!(ctx.dispatcher.actions(), vec![BuildAction::refresh(&widgets_target())]);
    let snapshot = ctx.runtime.snapshot();
    assert!(snapshot.lookup.is_loading());
    assert_eq!(snapshot.indicator, Indicator::NotAvailable);
    assert_eq!(snapshot.poll_interval_ms, None);
}

#[test]
fn construction_reads_loaded_entry() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.put_builds(target.key(), vec![running_build(4, &target, 10)]);

    let ctx = setup_with(store, false);

    assert_eq!(ctx.runtime.snapshot().lookup.status(), Some(BuildStatus::InProgress));
    assert_eq!(ctx.runtime.executor().scheduler().len(), 1);
}

#[test]
fn construction_publishes_loaded_entry() {
    let store = MemoryBuildStore::new();
    let target = widgets_target();
    store.put_builds(target.key(), vec![running_build(4, &target, 10)]);

    let ctx = setup_with(store, false);

    let published = ctx.runtime.subscribe().borrow().clone();
    assert_eq!(published, ctx.runtime.snapshot());
    assert_eq!(published.poll_interval_ms, Some(5_000));
}

#[test]
fn store_update_arms_poll() {
    let mut ctx = setup(false);
    let target = widgets_target();
    ctx.store.put_builds(target.key(), vec![running_build(1, &target, 10)]);

    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();

    let snapshot = ctx.runtime.snapshot();
    assert_eq!(snapshot.poll_interval_ms, Some(5_000));
    assert_eq!(
        ctx.runtime.executor().next_deadline(),
        Some(ctx.clock.now() + Duration::from_secs(5))
    );
}

#[test]
fn due_poll_refreshes_and_rearms() {
    let mut ctx = setup(false);
    let target = widgets_target();
    ctx.store.put_builds(target.key(), vec![passed_build(1, &target, 900)]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    ctx.dispatcher.clear();

    ctx.clock.advance(Duration::from_secs(14));
    assert_eq!(ctx.runtime.fire_due_timers().unwrap(), 0);

    ctx.clock.advance(Duration::from_secs(1));
    assert_eq!(ctx.runtime.fire_due_timers().unwrap(), 1);
    assert_eq!(ctx.dispatcher.actions(), vec![BuildAction::refresh(&target)]);
    assert_eq!(
        ctx.runtime.executor().next_deadline(),
        Some(ctx.clock.now() + Duration::from_secs(15))
    );
}

#[test]
fn target_change_refreshes_and_reads_new_entry() {
    let mut ctx = setup(false);
    let next = WatchTarget::new("acme/widgets", "def456");
    ctx.store.put_builds(next.key(), vec![passed_build(2, &next, 900)]);
    ctx.dispatcher.clear();

    ctx.runtime.handle_event(WatchEvent::TargetChanged { target: next.clone() }).unwrap();

    assert_eq!(ctx.dispatcher.actions(), vec![BuildAction::refresh(&next)]);
    let snapshot = ctx.runtime.snapshot();
    assert_eq!(snapshot.target, next);
    assert_eq!(snapshot.lookup.status(), Some(BuildStatus::Pass));
}

#[test]
fn build_requested_event_creates_build() {
    let mut ctx = setup(false);
    ctx.store.put_builds(widgets_target().key(), vec![]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    ctx.runtime.handle_event(WatchEvent::BuildableChanged { buildable: true }).unwrap();
    ctx.dispatcher.clear();

    ctx.runtime.handle_event(WatchEvent::BuildRequested).unwrap();

    assert_eq!(ctx.dispatcher.actions(), vec![BuildAction::create(&widgets_target())]);
}

#[test]
fn refused_request_dispatches_nothing() {
    let mut ctx = setup(true);
    let target = widgets_target();
    ctx.store.put_builds(target.key(), vec![running_build(5, &target, 10)]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    ctx.dispatcher.clear();

    // Logged, not returned, when it arrives as an event
    ctx.runtime.handle_event(WatchEvent::BuildRequested).unwrap();
    let err = ctx.runtime.request_build().unwrap_err();

    assert!(matches!(err, RuntimeError::Refused(BuildRequestError::Exists(id)) if id.as_u64() == 5));
    assert_eq!(ctx.dispatcher.create_count(), 0);
}

#[test]
fn dispose_stops_polling() {
    let mut ctx = setup(false);
    let target = widgets_target();
    ctx.store.put_builds(target.key(), vec![running_build(1, &target, 10)]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    ctx.dispatcher.clear();

    ctx.runtime.dispose().unwrap();
    ctx.clock.advance(Duration::from_secs(60));

    assert_eq!(ctx.runtime.fire_due_timers().unwrap(), 0);
    ctx.store.put_builds(target.key(), vec![passed_build(1, &target, 900)]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    assert!(ctx.dispatcher.actions().is_empty());
    assert!(!ctx.runtime.executor().scheduler().has_timers());
}

#[test]
fn closed_dispatcher_surfaces_error() {
    let mut ctx = setup(false);
    let target = widgets_target();
    ctx.store.put_builds(target.key(), vec![running_build(1, &target, 10)]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    ctx.dispatcher.close();

    ctx.clock.advance(Duration::from_secs(5));
    let err = ctx.runtime.fire_due_timers().unwrap_err();
    assert!(matches!(err, RuntimeError::Execute(_)));
    // Re-armed before the failed dispatch
    assert!(ctx.runtime.executor().scheduler().has_timers());
    assert!(ctx.dispatcher.dispatch(BuildAction::refresh(&target)).is_err());
}

#[test]
fn subscribers_see_changes() {
    let mut ctx = setup(false);
    let mut rx = ctx.runtime.subscribe();
    ctx.store.put_builds(widgets_target().key(), vec![]);

    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();

    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().lookup.is_empty());

    // Nothing changed: no notification
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn snapshot_serializes_for_json_output() {
    let mut ctx = setup(true);
    ctx.store.put_builds(widgets_target().key(), vec![]);
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();

    let json = serde_json::to_value(ctx.runtime.snapshot()).unwrap();
    assert_eq!(json["lookup"]["state"], "empty");
    assert_eq!(json["indicator"]["indicator"], "missing");
    assert_eq!(json["can_request_build"], true);
    assert!(json.get("poll_interval_ms").is_none());
}

#[test]
fn old_failure_is_not_retried_after_switching_back() {
    let mut ctx = setup(false);
    let target = widgets_target();
    ctx.store.put_failure(target.key(), "old outage");
    ctx.runtime.handle_event(WatchEvent::StoreUpdated).unwrap();
    let next = WatchTarget::new("acme/widgets", "def456");
    ctx.runtime.handle_event(WatchEvent::TargetChanged { target: next }).unwrap();
    ctx.runtime.handle_event(WatchEvent::TargetChanged { target: target.clone() }).unwrap();
    ctx.dispatcher.clear();

    ctx.clock.advance(Duration::from_secs(1));

    assert_eq!(ctx.runtime.fire_due_timers().unwrap(), 0);
    assert!(ctx.dispatcher.actions().is_empty());
    assert!(ctx.runtime.snapshot().lookup.is_loading());
}
