// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use crate::prelude::assert_eq;

fn fast_cli() -> Cli {
    cli().env("BW_POLL_ACTIVE_MS", "50").env("BW_POLL_ENDED_MS", "100")
}

#[test]
fn created_build_runs_to_pass() {
    fast_cli()
        .args(&[
            "watch", "acme/widgets", "abc123", "--branch", "main", "--buildable", "--create",
            "--step", "200ms", "--for", "2s",
        ])
        .passes()
        .stdout_has("watching")
        .stdout_has("no build (Build this version)")
        .stdout_has("Build #1 queued")
        .stdout_has("Build #1 pass /acme/widgets/.builds/1");
}

#[test]
fn existing_build_is_reported() {
    fast_cli()
        .args(&["watch", "acme/widgets", "abc123", "--seed", "failed", "--for", "300ms"])
        .passes()
        .stdout_has("Build #1 failed")
        .stdout_lacks("Build this version");
}

#[test]
fn no_build_without_buildable() {
    fast_cli()
        .args(&["watch", "acme/widgets", "abc123", "--for", "300ms"])
        .passes()
        .stdout_has("no build")
        .stdout_lacks("Build this version");
}

#[test]
fn json_output_streams_snapshots() {
    let run = fast_cli()
        .args(&["-o", "json", "watch", "acme/widgets", "abc123", "--seed", "pass", "--for", "300ms"])
        .passes();
    let lines = run.json_lines();

    assert!(!lines.is_empty());
    let last = &lines[lines.len() - 1];
    assert_eq!(last["lookup"]["state"], "found");
    assert_eq!(last["can_request_build"], false);
}

#[test]
fn exhausted_lookups_exit_with_code_three() {
    let project = Project::empty();
    let path = project.file("bw.toml", "[retry]\nmax_attempts = 1\nbase_ms = 10\nmax_ms = 10\n");

    cli()
        .args(&[
            "watch", "acme/widgets", "abc123", "--fail-lookups", "100", "--for", "500ms",
            "--config", &path.display().to_string(),
        ])
        .fails()
        .exit_code(3)
        .stderr_has("build lookup failed after 2 attempts");
}
