// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn dispose_cancels_poll_timer() {
    let mut watcher = observed(false, vec![running_build(1, &widgets_target(), 10)]);

    assert_eq!(watcher.dispose(), vec![Effect::CancelTimer { id: poll_timer() }]);
    assert!(watcher.is_disposed());
    assert_eq!(watcher.poll_interval(), None);
}

#[test]
fn dispose_cancels_retry_timer() {
    let mut watcher = observed(false, vec![running_build(1, &widgets_target(), 10)]);
    watcher.observe(&failed(2, "unavailable"));

    assert_eq!(cancelled(&watcher.dispose()), vec![poll_timer(), retry_timer()]);
}

#[test]
fn dispose_without_timers_emits_nothing() {
    let mut watcher = setup(false);
    assert!(watcher.dispose().is_empty());
}

#[test]
fn disposed_watcher_ignores_everything() {
    let target = widgets_target();
    let mut watcher = observed(true, vec![running_build(1, &target, 10)]);
    watcher.dispose();

    assert!(watcher.on_timer(&poll_timer()).is_empty());
    assert!(watcher.on_timer(&retry_timer()).is_empty());
    assert!(watcher.observe(&loaded(2, vec![passed_build(1, &target, 900)])).is_empty());
    assert!(watcher.set_target(WatchTarget::new("acme/widgets", "def456")).is_empty());
    assert_eq!(watcher.request_build(), Err(BuildRequestError::Disposed));
    assert!(watcher.dispose().is_empty());
    assert_eq!(watcher.target(), &target);
}

#[test]
fn no_refresh_after_dispose_while_timer_armed() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let mut watcher = setup(false);

    let effects = watcher.observe(&loaded(1, vec![running_build(1, &widgets_target(), 10)]));
    apply(&mut scheduler, &clock, &effects);
    assert!(scheduler.has_timers());

    let effects = watcher.dispose();
    apply(&mut scheduler, &clock, &effects);
    assert!(!scheduler.has_timers());

    clock.advance(Duration::from_secs(60));
    let mut refresh_count = 0;
    for event in scheduler.fired_timers(clock.now()) {
        if let bw_core::WatchEvent::TimerFired { id } = event {
            refresh_count += refreshes(&watcher.on_timer(&id));
        }
    }
    assert_eq!(refresh_count, 0);
}
