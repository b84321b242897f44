// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::executor::ExecuteError;
use crate::watcher::BuildRequestError;
use thiserror::Error;

/// Errors surfaced by a watch runtime or its handle
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),
    #[error("build request refused: {0}")]
    Refused(#[from] BuildRequestError),
    #[error("watch runtime closed")]
    Closed,
    #[error("watch task failed: {0}")]
    Task(String),
}
