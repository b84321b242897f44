// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use std::time::Duration;

#[test]
fn empty_config_uses_defaults() {
    let config = WatchConfig::from_toml_str("").unwrap();
    assert_eq!(config, WatchConfig::default());
}

#[test]
fn partial_config_overrides_only_given_keys() {
    let config = WatchConfig::from_toml_str(
        r#"
[poll]
active_ms = 2000

[retry]
max_attempts = 2
"#,
    )
    .unwrap();
    assert_eq!(config.poll.active, Duration::from_secs(2));
    assert_eq!(config.poll.ended, Duration::from_secs(15));
    assert_eq!(config.retry.max_attempts, 2);
    assert_eq!(config.retry.base, Duration::from_secs(1));
}

#[test]
fn unknown_keys_are_rejected() {
    let err = WatchConfig::from_toml_str("[poll]\nfast_ms = 1\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[yare::parameterized(
    zero_active = { "[poll]\nactive_ms = 0\n" },
    zero_ended  = { "[poll]\nended_ms = 0\n" },
    zero_base   = { "[retry]\nbase_ms = 0\n" },
    base_over_max = { "[retry]\nbase_ms = 60000\nmax_ms = 1000\n" },
)]
fn invalid_values_are_rejected(content: &str) {
    let err = WatchConfig::from_toml_str(content).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
}

#[test]
fn zero_base_allowed_when_retry_disabled() {
    let config = WatchConfig::from_toml_str("[retry]\nmax_attempts = 0\nbase_ms = 0\n").unwrap();
    assert_eq!(config.retry.max_attempts, 0);
}

#[test]
fn rendered_config_parses_back() {
    let config = WatchConfig::default();
    let rendered = config.to_toml_string().unwrap();
    assert!(rendered.contains("active_ms = 5000"), "{rendered}");
    assert_eq!(WatchConfig::from_toml_str(&rendered).unwrap(), config);
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[poll]\nended_ms = 60000").unwrap();
    let config = WatchConfig::load(file.path()).unwrap();
    assert_eq!(config.poll.ended, Duration::from_secs(60));
}

#[test]
fn load_missing_file_reports_path() {
    let err = WatchConfig::load(Path::new("/nonexistent/bw.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/bw.toml"), "{err}");
}
