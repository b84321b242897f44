// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

#[test]
fn name_hash_map_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(Repo::new("acme/widgets"), 42);
    assert_eq!(map.get("acme/widgets"), Some(&42));
}

#[test]
fn name_serializes_transparently() {
    let commit = CommitId::new("abc123");
    assert_eq!(serde_json::to_string(&commit).unwrap(), "\"abc123\"");

    let parsed: CommitId = serde_json::from_str("\"abc123\"").unwrap();
    assert_eq!(parsed, commit);
}

#[test]
fn name_compares_with_str() {
    let branch = Branch::from("main");
    assert_eq!(branch, "main");
    assert_eq!(branch.to_string(), "main");
    assert!(!branch.is_empty());
    assert!(Branch::new("").is_empty());
}

#[test]
fn watcher_id_has_prefix_and_fits_inline() {
    let id = WatcherId::new();
    assert!(id.as_str().starts_with("wch-"));
    assert_eq!(id.as_str().len(), 23);
    assert_eq!(id.suffix().len(), 19);
}

#[test]
fn watcher_ids_are_unique() {
    assert_ne!(WatcherId::new(), WatcherId::new());
}

#[test]
fn watcher_id_short_truncates_suffix() {
    let id = WatcherId::from_string("wch-abcdefghijk");
    assert_eq!(id.short(4), "abcd");
    assert_eq!(id.short(100), "abcdefghijk");
}

#[test]
fn short_fn_on_str() {
    let s = "abcdefghijklmnop";
    assert_eq!(short(s, 8), "abcdefgh");
    assert_eq!(short(s, 100), s);
    assert_eq!(short("abc", 8), "abc");
}
