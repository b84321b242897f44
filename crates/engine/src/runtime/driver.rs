// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async event loop

use super::handle::{Command, WatchHandle};
use super::WatchRuntime;
use crate::error::RuntimeError;
use crate::store::BuildStore;
use crate::Dispatcher;
use bw_core::{Clock, WatchEvent};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

impl<S, D, C> WatchRuntime<S, D, C>
where
    S: BuildStore,
    D: Dispatcher,
    C: Clock,
{
    /// Run the event loop on a new task and return the caller's handle.
    pub fn spawn(self) -> WatchHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let snapshots = self.subscribe();
        let task = tokio::spawn(self.run(rx, cancel.clone()));
        WatchHandle::new(tx, snapshots, cancel, task)
    }

    /// Process commands, store changes and timers until cancelled or the
    /// handle goes away, then dispose the watcher.
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        cancel: CancellationToken,
    ) -> Result<(), RuntimeError> {
        let id = self.watcher.id().clone();
        tracing::debug!(watcher = %id, target = %self.watcher.target().log(), "watch runtime started");

        let result = self.run_loop(&mut commands, &cancel).await;
        if let Err(e) = &result {
            tracing::error!(watcher = %id, error = %e, "watch runtime failed");
        }
        if let Err(e) = self.dispose() {
            tracing::warn!(watcher = %id, error = %e, "dispose failed");
        }
        tracing::debug!(watcher = %id, "watch runtime stopped");
        result
    }

    async fn run_loop(
        &mut self,
        commands: &mut mpsc::UnboundedReceiver<Command>,
        cancel: &CancellationToken,
    ) -> Result<(), RuntimeError> {
        let mut store_rx = self.store_rx.clone();
        let mut store_open = true;

        loop {
            let deadline = self.executor.next_deadline();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(()),
                command = commands.recv() => match command {
                    Some(Command::Event(event)) => self.handle_event(event)?,
                    Some(Command::RequestBuild(reply)) => {
                        // The requester may have stopped waiting
                        let _ = reply.send(self.request_build());
                    }
                    None => return Ok(()),
                },
                changed = store_rx.changed(), if store_open => match changed {
                    Ok(()) => self.handle_event(WatchEvent::StoreUpdated)?,
                    Err(_) => {
                        tracing::debug!(watcher = %self.watcher.id(), "store closed");
                        store_open = false;
                    }
                },
                _ = sleep_until(deadline) => {
                    self.fire_due_timers()?;
                }
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
