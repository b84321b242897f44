// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn buildable_without_build_creates_exactly_one() {
    let mut watcher = observed(true, vec![]);
    assert!(watcher.can_request_build());

    let effects = watcher.request_build().unwrap();
    assert_eq!(
        dispatched(&effects),
        vec![BuildAction::CreateBuild {
            repo: "acme/widgets".into(),
            commit_id: "abc123".into(),
            branch: Some("main".into()),
        }]
    );
    assert_eq!(effects.len(), 1);
}

#[test]
fn not_buildable_is_refused() {
    let mut watcher = observed(false, vec![]);
    assert_eq!(watcher.request_build(), Err(BuildRequestError::NotBuildable));
    assert!(!watcher.can_request_build());
}

#[test]
fn existing_build_is_refused() {
    let mut watcher = observed(true, vec![queued_build(3, &widgets_target())]);
    assert_eq!(watcher.request_build(), Err(BuildRequestError::Exists(BuildId::new(3))));
}

#[test]
fn loading_is_refused() {
    let mut watcher = setup(true);
    assert_eq!(watcher.request_build(), Err(BuildRequestError::Loading));
}

#[test]
fn failed_lookup_is_refused() {
    let mut watcher = setup(true);
    watcher.observe(&failed(1, "unavailable"));
    assert_eq!(watcher.request_build(), Err(BuildRequestError::LookupFailed));
}

#[parameterized(
    becomes_buildable = { false, true, true },
    stays_buildable = { true, true, true },
    loses_buildable = { true, false, false },
)]
fn buildable_flag_gates_request(initial: bool, updated: bool, allowed: bool) {
    let mut watcher = observed(initial, vec![]);
    watcher.set_buildable(updated);
    assert_eq!(watcher.can_request_build(), allowed);
    assert_eq!(watcher.request_build().is_ok(), allowed);
}

#[test]
fn indicator_offers_build_when_buildable() {
    let watcher = observed(true, vec![]);
    assert_eq!(watcher.indicator(), Indicator::Missing { buildable: true });
    assert_eq!(watcher.indicator().title(), Some(bw_core::indicator::BUILD_THIS_VERSION));
}
