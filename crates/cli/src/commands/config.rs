// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw config`: effective watcher configuration

use anyhow::{Context, Result};
use bw_core::WatchConfig;
use std::path::{Path, PathBuf};

use crate::env;
use crate::output::{self, OutputFormat};

/// Resolve the effective configuration: the file from `--config` or
/// `BW_CONFIG` (defaults when neither is set), then env overrides.
pub fn load(path: Option<&Path>) -> Result<WatchConfig> {
    let path: Option<PathBuf> = path.map(Path::to_path_buf).or_else(env::config_path);
    let mut config = match &path {
        Some(path) => WatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WatchConfig::default(),
    };

    if let Some(active) = env::poll_active() {
        config.poll.active = active;
    }
    if let Some(ended) = env::poll_ended() {
        config.poll.ended = ended;
    }
    config.validate().context("applying BW_POLL_* overrides")?;

    tracing::debug!(
        path = ?path,
        active_ms = config.poll.active.as_millis() as u64,
        ended_ms = config.poll.ended.as_millis() as u64,
        "config resolved"
    );
    Ok(config)
}

pub fn handle(path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = load(path)?;
    match format {
        OutputFormat::Text => print!("{}", config.to_toml_string()?),
        OutputFormat::Json => output::print_json(&config)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
