// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bw_core::indicator::BUILD_THIS_VERSION;
use bw_core::Indicator;
use clap::ValueEnum;
use serde::Serialize;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One-line text rendering of an indicator. Matches `Indicator`'s
/// `Display` when color is off.
pub fn format_indicator(indicator: &Indicator) -> String {
    match indicator {
        Indicator::NotAvailable => color::muted("not available"),
        Indicator::Missing { buildable: true } => {
            format!("no build {}", color::context(&format!("({BUILD_THIS_VERSION})")))
        }
        Indicator::Missing { buildable: false } => "no build".to_string(),
        Indicator::Build { status, title, path, .. } => {
            format!("{} {}", color::status(*status, title), color::context(path))
        }
    }
}

/// Print a value as one line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
