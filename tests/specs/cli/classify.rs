// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn unstarted_build_is_queued() {
    cli().args(&["classify"]).passes().stdout_eq("queued\n");
}

#[test]
fn started_build_is_in_progress() {
    cli().args(&["classify", "--started"]).passes().stdout_eq("in progress\n");
}

#[test]
fn successful_build_passes() {
    cli().args(&["classify", "--started", "--ended", "--success"]).passes().stdout_eq("pass\n");
}

#[test]
fn failure_wins_over_success() {
    cli()
        .args(&["classify", "--started", "--ended", "--success", "--failure"])
        .passes()
        .stdout_eq("failed\n");
}

#[test]
fn json_output_carries_status_and_label() {
    let run = cli().args(&["-o", "json", "classify", "--started"]).passes();
    let lines = run.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["label"], "in progress");
}
