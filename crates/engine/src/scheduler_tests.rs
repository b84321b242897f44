// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bw_core::{Clock, FakeClock};

fn timer(id: &str) -> TimerId {
    TimerId::new(id)
}

#[test]
fn scheduler_timer_lifecycle() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    scheduler.set_timer(timer("test"), Duration::from_secs(10), clock.now());
    assert!(scheduler.has_timers());
    assert!(scheduler.next_deadline().is_some());

    // Timer hasn't fired yet
    clock.advance(Duration::from_secs(5));
    let events = scheduler.fired_timers(clock.now());
    assert!(events.is_empty());
    assert!(scheduler.has_timers());

    // Timer fires
    clock.advance(Duration::from_secs(10));
    let events = scheduler.fired_timers(clock.now());
    assert_eq!(events, vec![WatchEvent::TimerFired { id: timer("test") }]);
    assert!(!scheduler.has_timers());
}

#[test]
fn scheduler_cancel_timer() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    scheduler.set_timer(timer("test"), Duration::from_secs(10), clock.now());
    assert!(scheduler.cancel_timer("test"));
    assert!(!scheduler.cancel_timer("test"));

    clock.advance(Duration::from_secs(15));
    assert!(scheduler.fired_timers(clock.now()).is_empty());
}

#[test]
fn rearming_replaces_previous_deadline() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    scheduler.set_timer(timer("poll"), Duration::from_secs(5), clock.now());
    scheduler.set_timer(timer("poll"), Duration::from_secs(15), clock.now());
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.deadline("poll"), Some(clock.now() + Duration::from_secs(15)));

    clock.advance(Duration::from_secs(6));
    assert!(scheduler.fired_timers(clock.now()).is_empty());
    assert!(scheduler.is_armed("poll"));
}

#[test]
fn fired_timers_come_out_in_deadline_order() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();

    scheduler.set_timer(timer("late"), Duration::from_secs(3), clock.now());
    scheduler.set_timer(timer("early"), Duration::from_secs(1), clock.now());
    scheduler.set_timer(timer("tie-a"), Duration::from_secs(2), clock.now());
    scheduler.set_timer(timer("tie-b"), Duration::from_secs(2), clock.now());
    scheduler.set_timer(timer("future"), Duration::from_secs(60), clock.now());

    clock.advance(Duration::from_secs(3));
    let fired: Vec<_> = scheduler
        .fired_timers(clock.now())
        .into_iter()
        .map(|e| match e {
            WatchEvent::TimerFired { id } => id.to_string(),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(fired, ["early", "tie-a", "tie-b", "late"]);
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn next_deadline_is_earliest() {
    let clock = FakeClock::new();
    let mut scheduler = Scheduler::new();
    assert_eq!(scheduler.next_deadline(), None);

    scheduler.set_timer(timer("a"), Duration::from_secs(15), clock.now());
    scheduler.set_timer(timer("b"), Duration::from_secs(5), clock.now());
    assert_eq!(scheduler.next_deadline(), Some(clock.now() + Duration::from_secs(5)));
}
