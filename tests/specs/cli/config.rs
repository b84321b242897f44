// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn defaults_without_file() {
    cli()
        .args(&["config"])
        .passes()
        .stdout_has("[poll]")
        .stdout_has("active_ms = 5000")
        .stdout_has("ended_ms = 15000")
        .stdout_has("[retry]")
        .stdout_has("max_attempts = 5");
}

#[test]
fn file_from_flag_overrides_defaults() {
    let project = Project::empty();
    let path = project.file("bw.toml", "[poll]\nactive_ms = 2000\n");

    cli()
        .args(&["config", "--config", &path.display().to_string()])
        .passes()
        .stdout_has("active_ms = 2000")
        .stdout_has("ended_ms = 15000");
}

#[test]
fn file_from_env() {
    let project = Project::empty();
    let path = project.file("bw.toml", "[retry]\nmax_attempts = 9\n");

    cli().args(&["config"]).env("BW_CONFIG", &path).passes().stdout_has("max_attempts = 9");
}

#[test]
fn env_overrides_poll_intervals() {
    cli()
        .args(&["config"])
        .env("BW_POLL_ACTIVE_MS", "250")
        .env("BW_POLL_ENDED_MS", "750")
        .passes()
        .stdout_has("active_ms = 250")
        .stdout_has("ended_ms = 750");
}

#[test]
fn json_output() {
    let run = cli().args(&["config", "-o", "json"]).passes();
    let lines = run.json_lines();
    assert_eq!(lines[0]["poll"]["active_ms"], 5000);
    assert_eq!(lines[0]["retry"]["max_ms"], 30000);
}

#[test]
fn unknown_key_fails() {
    let project = Project::empty();
    let path = project.file("bw.toml", "[poll]\nfast_ms = 1\n");

    cli()
        .args(&["config", "--config", &path.display().to_string()])
        .fails()
        .exit_code(1)
        .stderr_has("error:");
}

#[test]
fn missing_file_fails() {
    let project = Project::empty();
    let path = project.path().join("absent.toml");

    cli()
        .args(&["config", "--config", &path.display().to_string()])
        .fails()
        .stderr_has("absent.toml");
}
