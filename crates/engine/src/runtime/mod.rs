// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch runtime: drives one watcher against a store, a dispatcher and
//! the timer scheduler.

mod driver;
mod handle;
mod handlers;

pub use handle::WatchHandle;

use crate::error::RuntimeError;
use crate::executor::Executor;
use crate::store::BuildStore;
use crate::watcher::BuildWatcher;
use crate::Dispatcher;
use bw_core::{BuildLookup, Clock, Indicator, WatchConfig, WatchTarget, WatcherId};
use serde::Serialize;
use tokio::sync::watch;

/// Collaborators handed to a runtime at construction
pub struct RuntimeDeps<S, D, C> {
    pub store: S,
    pub dispatcher: D,
    pub clock: C,
}

/// What a rendering surface needs to know about a watcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchSnapshot {
    pub target: WatchTarget,
    pub buildable: bool,
    pub lookup: BuildLookup,
    pub indicator: Indicator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
    pub can_request_build: bool,
}

impl WatchSnapshot {
    fn of(watcher: &BuildWatcher) -> Self {
        Self {
            target: watcher.target().clone(),
            buildable: watcher.buildable(),
            lookup: watcher.lookup().clone(),
            indicator: watcher.indicator(),
            poll_interval_ms: watcher.poll_interval().map(|d| d.as_millis() as u64),
            can_request_build: watcher.can_request_build(),
        }
    }
}

/// Runtime for one build watcher
pub struct WatchRuntime<S, D, C: Clock> {
    watcher: BuildWatcher,
    executor: Executor<D, C>,
    store: S,
    store_rx: watch::Receiver<u64>,
    snapshot_tx: watch::Sender<WatchSnapshot>,
}

impl<S, D, C> WatchRuntime<S, D, C>
where
    S: BuildStore,
    D: Dispatcher,
    C: Clock,
{
    /// Create a runtime, dispatch the initial refresh and read whatever the
    /// store already holds for the target.
    pub fn new(
        deps: RuntimeDeps<S, D, C>,
        target: WatchTarget,
        buildable: bool,
        config: WatchConfig,
    ) -> Result<Self, RuntimeError> {
        let RuntimeDeps { store, dispatcher, clock } = deps;
        // Subscribe before the first read so no write is missed
        let store_rx = store.subscribe();
        let (watcher, effects) = BuildWatcher::new(WatcherId::new(), target, buildable, config);
        let (snapshot_tx, _) = watch::channel(WatchSnapshot::of(&watcher));

        let mut runtime =
            Self { watcher, executor: Executor::new(dispatcher, clock), store, store_rx, snapshot_tx };
        runtime.executor.execute_all(effects)?;
        runtime.observe_store()?;
        runtime.publish();
        Ok(runtime)
    }

    pub fn watcher(&self) -> &BuildWatcher {
        &self.watcher
    }

    pub fn executor(&self) -> &Executor<D, C> {
        &self.executor
    }

    pub fn snapshot(&self) -> WatchSnapshot {
        WatchSnapshot::of(&self.watcher)
    }

    /// Snapshot updates, published after every handled event
    pub fn subscribe(&self) -> watch::Receiver<WatchSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn publish(&self) {
        let next = self.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

#[cfg(test)]
#[path = "../runtime_tests/mod.rs"]
mod tests;
