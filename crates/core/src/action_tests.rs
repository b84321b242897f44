// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn refresh_is_forced_and_drops_branch() {
    let target = WatchTarget::new("acme/widgets", "abc123").with_branch("main");
    assert_eq!(
        BuildAction::refresh(&target),
        BuildAction::WantNewestBuildForCommit {
            repo: "acme/widgets".into(),
            commit_id: "abc123".into(),
            force: true,
        }
    );
}

#[test]
fn create_carries_branch() {
    let target = WatchTarget::new("acme/widgets", "abc123").with_branch("main");
    assert_eq!(
        BuildAction::create(&target),
        BuildAction::CreateBuild {
            repo: "acme/widgets".into(),
            commit_id: "abc123".into(),
            branch: Some("main".into()),
        }
    );
}

#[test]
fn wire_format_uses_type_tag() {
    let action = BuildAction::create(&WatchTarget::new("acme/widgets", "abc123"));
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "build:create", "repo": "acme/widgets", "commit_id": "abc123"})
    );

    let parsed: BuildAction = serde_json::from_str(
        r#"{"type":"build:want_newest","repo":"acme/widgets","commit_id":"abc123","force":false}"#,
    )
    .unwrap();
    assert!(parsed.is_refresh());
    assert_eq!(parsed.name(), "build:want_newest");
}

#[test]
fn fields_for_logging() {
    let target = WatchTarget::new("acme/widgets", "abc123").with_branch("main");
    assert_eq!(
        BuildAction::create(&target).fields(),
        vec![
            ("repo", "acme/widgets".to_string()),
            ("commit", "abc123".to_string()),
            ("branch", "main".to_string()),
        ]
    );
    assert_eq!(BuildAction::refresh(&target).fields()[2], ("force", "true".to_string()));
}
