// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("classify")
        .stdout_has("watch")
        .stdout_has("config");
}

#[test]
fn version_includes_package_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn missing_subcommand_is_usage_error() {
    cli().fails().exit_code(2).stderr_has("Usage:");
}

#[test]
fn watch_help_documents_flags() {
    cli()
        .args(&["watch", "--help"])
        .passes()
        .stdout_has("--buildable")
        .stdout_has("--create")
        .stdout_has("--for");
}

#[test]
fn create_without_buildable_is_rejected() {
    cli().args(&["watch", "acme/widgets", "abc123", "--create"]).fails().exit_code(2);
}
