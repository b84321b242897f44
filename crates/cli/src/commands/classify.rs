// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw classify`: status label for a set of build flags

use anyhow::Result;
use bw_core::{Build, BuildId, BuildStatus};
use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Args, Debug, Default)]
pub struct ClassifyArgs {
    /// The build has a start time
    #[arg(long)]
    pub started: bool,

    /// The build has an end time
    #[arg(long)]
    pub ended: bool,

    /// The success flag is set
    #[arg(long)]
    pub success: bool,

    /// The failure flag is set
    #[arg(long)]
    pub failure: bool,
}

impl ClassifyArgs {
    fn to_build(&self) -> Build {
        let mut build = Build::queued(BuildId::new(0), "-".into(), "-".into(), None);
        build.started_at_ms = self.started.then_some(0);
        build.ended_at_ms = self.ended.then_some(0);
        build.success = self.success;
        build.failure = self.failure;
        build
    }
}

#[derive(Debug, Serialize)]
struct Classification {
    status: BuildStatus,
    label: String,
}

pub fn classify(args: &ClassifyArgs) -> BuildStatus {
    BuildStatus::of(&args.to_build())
}

pub fn handle(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    let status = classify(&args);
    match format {
        OutputFormat::Text => println!("{status}"),
        OutputFormat::Json => {
            output::print_json(&Classification { status, label: status.to_string() })?
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
