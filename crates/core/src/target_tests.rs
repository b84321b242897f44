// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn display_without_branch() {
    let target = WatchTarget::new("acme/widgets", "abc123");
    assert_eq!(target.to_string(), "acme/widgets@abc123");
}

#[test]
fn display_with_branch() {
    let target = WatchTarget::new("acme/widgets", "abc123").with_branch("main");
    assert_eq!(target.to_string(), "acme/widgets@abc123 (main)");
    assert_eq!(target.log(), "repo=acme/widgets commit=abc123 branch=main");
}

#[yare::parameterized(
    repo   = { WatchTarget::new("acme/gadgets", "abc123").with_branch("main") },
    commit = { WatchTarget::new("acme/widgets", "def456").with_branch("main") },
    branch = { WatchTarget::new("acme/widgets", "abc123").with_branch("dev") },
    no_branch = { WatchTarget::new("acme/widgets", "abc123") },
)]
fn any_field_change_makes_a_different_target(other: WatchTarget) {
    let base = WatchTarget::new("acme/widgets", "abc123").with_branch("main");
    assert_ne!(base, other);
}

#[test]
fn key_ignores_branch() {
    let main = WatchTarget::new("acme/widgets", "abc123").with_branch("main");
    let dev = WatchTarget::new("acme/widgets", "abc123").with_branch("dev");
    assert_eq!(main.key(), dev.key());
    assert_eq!(main.key(), BuildKey::new("acme/widgets", "abc123"));
}

#[test]
fn branch_omitted_from_json_when_absent() {
    let target = WatchTarget::new("acme/widgets", "abc123");
    let json = serde_json::to_value(&target).unwrap();
    assert_eq!(json, serde_json::json!({"repo": "acme/widgets", "commit_id": "abc123"}));
}
