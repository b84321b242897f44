// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw watch`: run a watcher against a simulated build service

use anyhow::Result;
use bw_core::{BuildLookup, BuildStatus, WatchConfig, WatchTarget};
use bw_engine::{
    BuildBackend, ChannelDispatcher, MemoryBuildService, MemoryBuildStore, RuntimeDeps, TokioClock,
    WatchRuntime, WatchSnapshot,
};
use clap::{Args, ValueEnum};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::color;
use crate::duration::parse_duration;
use crate::exit_error::{ExitError, LOOKUP_FAILED};
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Repository name, e.g. acme/widgets
    pub repo: String,

    /// Commit ID to watch
    pub commit: String,

    /// Branch the commit belongs to
    #[arg(long)]
    pub branch: Option<String>,

    /// Allow requesting a build for the commit
    #[arg(long)]
    pub buildable: bool,

    /// Request a build as soon as none is found
    #[arg(long, requires = "buildable")]
    pub create: bool,

    /// How long to watch before exiting
    #[arg(long = "for", value_name = "DURATION", default_value = "30s", value_parser = parse_duration)]
    pub duration: Duration,

    /// How often simulated builds advance one lifecycle stage
    #[arg(long, value_name = "DURATION", default_value = "5s", value_parser = parse_duration)]
    pub step: Duration,

    /// Start with an existing build in this status
    #[arg(long, value_enum, value_name = "STATUS")]
    pub seed: Option<SeedStatus>,

    /// Fail this many lookups before serving builds
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub fail_lookups: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeedStatus {
    Queued,
    InProgress,
    Pass,
    Failed,
}

impl From<SeedStatus> for BuildStatus {
    fn from(seed: SeedStatus) -> Self {
        match seed {
            SeedStatus::Queued => BuildStatus::Queued,
            SeedStatus::InProgress => BuildStatus::InProgress,
            SeedStatus::Pass => BuildStatus::Pass,
            SeedStatus::Failed => BuildStatus::Failed,
        }
    }
}

impl WatchArgs {
    pub fn target(&self) -> WatchTarget {
        let target = WatchTarget::new(self.repo.as_str(), self.commit.as_str());
        match &self.branch {
            Some(branch) => target.with_branch(branch.as_str()),
            None => target,
        }
    }
}

pub async fn handle(args: WatchArgs, config: WatchConfig, format: OutputFormat) -> Result<()> {
    anyhow::ensure!(!args.step.is_zero(), "--step must be positive");
    let target = args.target();

    let service = MemoryBuildService::new(TokioClock);
    if let Some(seed) = args.seed {
        let build = service.seed(&target, seed.into());
        tracing::info!(build = %build.id, status = %build.status(), "seeded build");
    }
    service.fail_next_lookups(args.fail_lookups);

    let store = MemoryBuildStore::new();
    let (dispatcher, actions) = ChannelDispatcher::channel();
    let backend_cancel = CancellationToken::new();
    BuildBackend::new(service.clone(), store.clone()).spawn(actions, backend_cancel.clone());
    let _backend = backend_cancel.drop_guard();

    let runtime = WatchRuntime::new(
        RuntimeDeps { store, dispatcher, clock: TokioClock },
        target.clone(),
        args.buildable,
        config,
    )?;
    let handle = runtime.spawn();
    let mut snapshots = handle.subscribe();

    if format == OutputFormat::Text {
        println!("{} {}", color::header("watching"), target);
    }
    let mut printer = Printer::new(format);
    printer.print(&snapshots.borrow_and_update().clone())?;

    let deadline = tokio::time::sleep(args.duration);
    tokio::pin!(deadline);
    let mut step = tokio::time::interval_at(tokio::time::Instant::now() + args.step, args.step);
    let mut requested = false;

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = step.tick() => {
                let advanced = service.advance_all();
                tracing::debug!(advanced, "simulated builds advanced");
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                printer.print(&snapshot)?;
                if args.create && !requested && snapshot.can_request_build {
                    requested = true;
                    if let Err(e) = handle.request_build().await {
                        tracing::warn!(error = %e, "build request failed");
                    }
                }
            }
        }
    }

    let last = handle.snapshot();
    handle.shutdown().await?;

    if let BuildLookup::Failed { error, attempts } = &last.lookup {
        return Err(ExitError::new(
            LOOKUP_FAILED,
            format!("build lookup failed after {attempts} attempts: {error}"),
        )
        .into());
    }
    Ok(())
}

/// Prints snapshots, skipping text lines identical to the last one.
struct Printer {
    format: OutputFormat,
    last_line: Option<String>,
}

impl Printer {
    fn new(format: OutputFormat) -> Self {
        Self { format, last_line: None }
    }

    fn print(&mut self, snapshot: &WatchSnapshot) -> Result<()> {
        match self.format {
            OutputFormat::Json => output::print_json(snapshot),
            OutputFormat::Text => {
                let line = output::format_indicator(&snapshot.indicator);
                if self.last_line.as_deref() != Some(line.as_str()) {
                    println!("{line}");
                    self.last_line = Some(line);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
