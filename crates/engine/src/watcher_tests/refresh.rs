// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bw_core::test_support::strategies::arb_target;
use proptest::prelude::*;
use yare::parameterized;

#[test]
fn construction_forces_one_refresh() {
    let target = widgets_target();
    let (watcher, effects) = BuildWatcher::new(watcher_id(), target.clone(), false, WatchConfig::default());

    assert_eq!(effects, vec![Effect::Dispatch { action: BuildAction::refresh(&target) }]);
    assert!(watcher.lookup().is_loading());
    assert_eq!(watcher.poll_interval(), None);
}

#[parameterized(
    repo = { WatchTarget::new("acme/gadgets", "abc123").with_branch("main") },
    commit = { WatchTarget::new("acme/widgets", "def456").with_branch("main") },
    branch = { WatchTarget::new("acme/widgets", "abc123").with_branch("release") },
    branch_removed = { WatchTarget::new("acme/widgets", "abc123") },
)]
fn changing_any_field_forces_one_refresh(next: WatchTarget) {
    let mut watcher = observed(false, vec![queued_build(1, &widgets_target())]);

    let effects = watcher.set_target(next.clone());

    assert_eq!(dispatched(&effects), vec![BuildAction::refresh(&next)]);
    assert_eq!(watcher.target(), &next);
    assert!(watcher.lookup().is_loading());
}

#[test]
fn identical_target_emits_nothing() {
    let mut watcher = observed(false, vec![queued_build(1, &widgets_target())]);
    assert!(watcher.set_target(widgets_target()).is_empty());
    assert!(watcher.lookup().build().is_some());
}

#[test]
fn target_change_keeps_poll_timer() {
    let mut watcher = observed(false, vec![running_build(1, &widgets_target(), 10)]);

    let effects = watcher.set_target(WatchTarget::new("acme/widgets", "def456"));

    assert!(cancelled(&effects).is_empty());
    assert_eq!(watcher.poll_interval(), Some(Duration::from_secs(5)));
}

#[test]
fn buildable_toggle_never_refreshes() {
    let mut watcher = observed(false, vec![]);
    watcher.set_buildable(true);
    assert!(watcher.buildable());
    assert!(watcher.lookup().is_empty());
}

#[test]
fn new_target_reads_its_own_entry() {
    let mut watcher = observed(false, vec![queued_build(1, &widgets_target())]);
    let next = WatchTarget::new("acme/widgets", "def456");
    watcher.set_target(next.clone());

    // The new key's entry starts at revision 1 too; it must still be read
    watcher.observe(&loaded(1, vec![passed_build(9, &next, 500)]));
    assert_eq!(watcher.lookup().build().map(|b| b.id), Some(BuildId::new(9)));
}

proptest! {
    #[test]
    fn refresh_count_matches_target_change(a in arb_target(), b in arb_target()) {
        let (mut watcher, effects) = BuildWatcher::new(watcher_id(), a.clone(), false, WatchConfig::default());
        prop_assert_eq!(refreshes(&effects), 1);

        let effects = watcher.set_target(b.clone());
        prop_assert_eq!(refreshes(&effects), usize::from(a != b));
        prop_assert_eq!(watcher.target(), &b);
    }
}
