// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn codes_have_expected_values() {
    assert_eq!(codes::HEADER, 74);
    assert_eq!(codes::LITERAL, 250);
    assert_eq!(codes::CONTEXT, 245);
    assert_eq!(codes::MUTED, 240);
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");

    let debug = format!("{:?}", styles());
    assert_eq!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    let debug = format!("{:?}", styles());
    assert_ne!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    let result = header("watching");
    assert!(result.contains("\x1b[38;5;74m"), "expected ANSI header color");
    assert!(result.contains("watching"));
    assert!(result.contains("\x1b[0m"), "expected ANSI reset");
}

#[test]
#[serial]
fn status_colors_follow_outcome() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    let cases = [
        (BuildStatus::Pass, "\x1b[38;5;114m"),
        (BuildStatus::Failed, "\x1b[38;5;167m"),
        (BuildStatus::InProgress, "\x1b[38;5;179m"),
        (BuildStatus::Queued, "\x1b[38;5;179m"),
    ];
    for (build_status, code) in cases {
        assert!(status(build_status, "Build #1").starts_with(code), "{build_status}");
    }
}

#[test]
#[serial]
fn helpers_plain_when_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");

    assert_eq!(header("foo"), "foo");
    assert_eq!(context("baz"), "baz");
    assert_eq!(muted("dim"), "dim");
    assert_eq!(status(BuildStatus::Pass, "ok"), "ok");
}

#[test]
#[serial]
fn should_colorize_respects_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");
    assert!(!should_colorize(), "NO_COLOR=1 should override COLOR=1");
}
