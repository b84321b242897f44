// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watcher configuration, loaded from TOML.
//!
//! ```toml
//! [poll]
//! active_ms = 5000
//! ended_ms = 15000
//!
//! [retry]
//! max_attempts = 5
//! base_ms = 1000
//! max_ms = 30000
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::poll::{PollCadence, RetryPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by every watcher in a process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    pub poll: PollCadence,
    pub retry: RetryPolicy,
}

impl WatchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: WatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Reject intervals that would make a watcher spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll.active.is_zero() || self.poll.ended.is_zero() {
            return Err(ConfigError::Invalid("poll intervals must be positive".to_string()));
        }
        if self.retry.max_attempts > 0 && self.retry.base.is_zero() {
            return Err(ConfigError::Invalid("retry base_ms must be positive".to_string()));
        }
        if self.retry.base > self.retry.max {
            return Err(ConfigError::Invalid(format!(
                "retry base_ms ({}) exceeds max_ms ({})",
                self.retry.base.as_millis(),
                self.retry.max.as_millis()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
