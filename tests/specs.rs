// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `bw` binary

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli"]
mod cli {
    mod classify;
    mod config;
    mod help;
    mod watch;
}
