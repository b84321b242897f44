// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn running_build_arms_active_poll() {
    let mut watcher = setup(false);
    let effects = watcher.observe(&loaded(1, vec![running_build(1, &widgets_target(), 10)]));

    assert_eq!(effects, vec![Effect::SetTimer { id: poll_timer(), duration: Duration::from_secs(5) }]);
    assert_eq!(watcher.poll_interval(), Some(Duration::from_secs(5)));
}

#[test]
fn queued_build_arms_active_poll() {
    let mut watcher = setup(false);
    let effects = watcher.observe(&loaded(1, vec![queued_build(1, &widgets_target())]));
    assert_eq!(armed(&effects), vec![(poll_timer(), Duration::from_secs(5))]);
}

#[test]
fn ended_build_arms_slow_poll() {
    let mut watcher = setup(false);
    let effects = watcher.observe(&loaded(1, vec![failed_build(1, &widgets_target(), 900)]));
    assert_eq!(armed(&effects), vec![(poll_timer(), Duration::from_secs(15))]);
}

#[test]
fn unchanged_build_does_not_rearm() {
    let target = widgets_target();
    let mut watcher = observed(false, vec![running_build(1, &target, 10)]);

    let effects = watcher.observe(&loaded(2, vec![running_build(1, &target, 10)]));
    assert!(effects.is_empty());
}

#[test]
fn changed_build_cancels_then_rearms() {
    let target = widgets_target();
    let mut watcher = observed(false, vec![running_build(1, &target, 10)]);

    let effects = watcher.observe(&loaded(2, vec![passed_build(1, &target, 900)]));
    assert_eq!(
        effects,
        vec![
            Effect::CancelTimer { id: poll_timer() },
            Effect::SetTimer { id: poll_timer(), duration: Duration::from_secs(15) },
        ]
    );
}

#[test]
fn empty_lookup_clears_reference() {
    let target = widgets_target();
    let mut watcher = observed(false, vec![running_build(1, &target, 10)]);

    assert!(watcher.observe(&loaded(2, vec![])).is_empty());
    assert!(watcher.lookup().is_empty());

    // Same build seen again counts as new
    let effects = watcher.observe(&loaded(3, vec![running_build(1, &target, 10)]));
    assert_eq!(armed(&effects), vec![(poll_timer(), Duration::from_secs(5))]);
}

#[test]
fn poll_fire_rearms_then_refreshes() {
    let target = widgets_target();
    let mut watcher = observed(false, vec![passed_build(1, &target, 900)]);

    let effects = watcher.on_timer(&poll_timer());
    assert_eq!(
        effects,
        vec![
            Effect::SetTimer { id: poll_timer(), duration: Duration::from_secs(15) },
            Effect::Dispatch { action: BuildAction::refresh(&target) },
        ]
    );
}

#[test]
fn poll_fire_refreshes_current_target() {
    let mut watcher = observed(false, vec![running_build(1, &widgets_target(), 10)]);
    let next = WatchTarget::new("acme/widgets", "def456");
    watcher.set_target(next.clone());

    let effects = watcher.on_timer(&poll_timer());
    assert_eq!(dispatched(&effects), vec![BuildAction::refresh(&next)]);
    // No build for the new target yet: keep the last interval
    assert_eq!(armed(&effects), vec![(poll_timer(), Duration::from_secs(5))]);
}

#[test]
fn foreign_timers_are_ignored() {
    let mut watcher = observed(false, vec![running_build(1, &widgets_target(), 10)]);
    let other = WatcherId::from_string("wch-other");

    assert!(watcher.on_timer(&TimerId::build_poll(&other)).is_empty());
    assert!(watcher.on_timer(&TimerId::new("bogus")).is_empty());
}

#[test]
fn custom_cadence_is_used() {
    let config = WatchConfig {
        poll: PollCadence::new(Duration::from_millis(200), Duration::from_secs(2)),
        ..WatchConfig::default()
    };
    let mut watcher = setup_with(false, config);
    let effects = watcher.observe(&loaded(1, vec![queued_build(1, &widgets_target())]));
    assert_eq!(armed(&effects), vec![(poll_timer(), Duration::from_millis(200))]);
}

#[test]
fn at_most_one_poll_timer_is_armed() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    let target = widgets_target();
    let mut watcher = setup(false);

    let entries = [
        loaded(1, vec![queued_build(1, &target)]),
        loaded(2, vec![running_build(1, &target, 10)]),
        loaded(3, vec![passed_build(1, &target, 900)]),
        loaded(4, vec![queued_build(2, &target), passed_build(1, &target, 900)]),
        loaded(5, vec![]),
        loaded(6, vec![running_build(2, &target, 950)]),
    ];
    for entry in &entries {
        let effects = watcher.observe(entry);
        apply(&mut scheduler, &clock, &effects);
        assert!(scheduler.len() <= 1);
        let effects = watcher.on_timer(&poll_timer());
        apply(&mut scheduler, &clock, &effects);
        assert!(scheduler.len() <= 1);
    }
    assert!(scheduler.is_armed(poll_timer().as_str()));
}
