// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller side of a spawned watch runtime

use super::WatchSnapshot;
use crate::error::RuntimeError;
use bw_core::{WatchEvent, WatchTarget};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub(super) enum Command {
    Event(WatchEvent),
    RequestBuild(oneshot::Sender<Result<(), RuntimeError>>),
}

/// Handle to a running watcher. Dropping it stops the runtime.
pub struct WatchHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<WatchSnapshot>,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<(), RuntimeError>>>,
}

impl WatchHandle {
    pub(super) fn new(
        commands: mpsc::UnboundedSender<Command>,
        snapshots: watch::Receiver<WatchSnapshot>,
        cancel: CancellationToken,
        task: JoinHandle<Result<(), RuntimeError>>,
    ) -> Self {
        Self { commands, snapshots, cancel, task: Some(task) }
    }

    pub fn set_target(&self, target: WatchTarget) -> Result<(), RuntimeError> {
        self.send(Command::Event(WatchEvent::TargetChanged { target }))
    }

    pub fn set_buildable(&self, buildable: bool) -> Result<(), RuntimeError> {
        self.send(Command::Event(WatchEvent::BuildableChanged { buildable }))
    }

    /// Ask for a new build and wait for the watcher's verdict.
    pub async fn request_build(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::RequestBuild(tx))?;
        rx.await.map_err(|_| RuntimeError::Closed)?
    }

    pub fn snapshot(&self) -> WatchSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WatchSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the runtime and wait for it to dispose the watcher.
    pub async fn shutdown(mut self) -> Result<(), RuntimeError> {
        self.cancel.cancel();
        match self.task.take() {
            Some(task) => task.await.map_err(|e| RuntimeError::Task(e.to_string()))?,
            None => Ok(()),
        }
    }

    fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.commands.send(command).map_err(|_| RuntimeError::Closed)
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
