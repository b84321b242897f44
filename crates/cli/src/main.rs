// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw: watch the build status of a commit

mod color;
mod commands;
mod duration;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{classify, config, watch};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "bw", version = VERSION, about = "Watch the build status of a commit", styles = color::styles())]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to $BW_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the status label for a set of build flags
    Classify(classify::ClassifyArgs),
    /// Watch a commit's newest build against a simulated build service
    Watch(watch::WatchArgs),
    /// Print the effective configuration
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Classify(args) => classify::handle(args, cli.output),
        Commands::Watch(args) => {
            let config = config::load(cli.config.as_deref())?;
            watch::handle(args, config, cli.output).await
        }
        Commands::Config => config::handle(cli.config.as_deref(), cli.output),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            eprintln!("error: {}", exit.message);
            std::process::exit(exit.code);
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
