// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event handling

use super::WatchRuntime;
use crate::error::RuntimeError;
use crate::store::BuildStore;
use crate::Dispatcher;
use bw_core::{Clock, WatchEvent};

impl<S, D, C> WatchRuntime<S, D, C>
where
    S: BuildStore,
    D: Dispatcher,
    C: Clock,
{
    /// Feed one event to the watcher and execute the resulting effects.
    ///
    /// A refused build request is logged, not returned; use
    /// [`request_build`](Self::request_build) to observe the refusal.
    pub fn handle_event(&mut self, event: WatchEvent) -> Result<(), RuntimeError> {
        tracing::debug!(watcher = %self.watcher.id(), event = %event.log_summary(), "handling event");
        let result = self.apply_event(event);
        self.publish();
        result
    }

    fn apply_event(&mut self, event: WatchEvent) -> Result<(), RuntimeError> {
        match event {
            WatchEvent::TargetChanged { target } => {
                let effects = self.watcher.set_target(target);
                self.executor.execute_all(effects)?;
                self.observe_store()
            }
            WatchEvent::BuildableChanged { buildable } => {
                self.watcher.set_buildable(buildable);
                Ok(())
            }
            WatchEvent::StoreUpdated => self.observe_store(),
            WatchEvent::TimerFired { id } => {
                let effects = self.watcher.on_timer(&id);
                self.executor.execute_all(effects)?;
                Ok(())
            }
            WatchEvent::BuildRequested => match self.request_build() {
                Err(RuntimeError::Refused(reason)) => {
                    tracing::info!(watcher = %self.watcher.id(), %reason, "build request refused");
                    Ok(())
                }
                other => other,
            },
        }
    }

    /// Request a build for the current target.
    pub fn request_build(&mut self) -> Result<(), RuntimeError> {
        let effects = self.watcher.request_build()?;
        self.executor.execute_all(effects)?;
        self.publish();
        Ok(())
    }

    /// Deliver every timer that is due. Returns how many fired.
    pub fn fire_due_timers(&mut self) -> Result<usize, RuntimeError> {
        let fired = self.executor.fired_timers();
        let count = fired.len();
        for event in fired {
            self.handle_event(event)?;
        }
        Ok(count)
    }

    /// Dispose the watcher and cancel its timers.
    pub fn dispose(&mut self) -> Result<(), RuntimeError> {
        let effects = self.watcher.dispose();
        self.executor.execute_all(effects)?;
        self.publish();
        Ok(())
    }

    /// Re-read the store entry for the current target.
    pub(super) fn observe_store(&mut self) -> Result<(), RuntimeError> {
        let entry = self.store.entry(&self.watcher.key());
        let effects = self.watcher.observe(&entry);
        self.executor.execute_all(effects)?;
        Ok(())
    }
}
