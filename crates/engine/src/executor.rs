// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::dispatch::{DispatchError, Dispatcher};
use crate::scheduler::Scheduler;
use bw_core::{Clock, Effect, WatchEvent};
use std::time::Instant;
use thiserror::Error;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Executes effects against a dispatcher and the timer scheduler
pub struct Executor<D, C: Clock> {
    dispatcher: D,
    scheduler: Scheduler,
    clock: C,
}

impl<D, C> Executor<D, C>
where
    D: Dispatcher,
    C: Clock,
{
    pub fn new(dispatcher: D, clock: C) -> Self {
        Self { dispatcher, scheduler: Scheduler::new(), clock }
    }

    /// Get a reference to the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Execute a single effect with tracing
    pub fn execute(&mut self, effect: Effect) -> Result<(), ExecuteError> {
        // Format the fields as `key=val`
        let info = {
            let fields = effect.fields();
            let cap = fields.iter().map(|(a, b)| a.len() + b.len() + 2).sum();
            let mut fmt = String::with_capacity(cap);
            for (key, val) in fields {
                fmt.push_str(key);
                fmt.push('=');
                fmt.push_str(&val);
                fmt.push(' ');
            }
            fmt.pop();
            fmt
        };

        let op = effect.name();
        let verbose = effect.verbose();
        let result = self.execute_inner(effect);
        match &result {
            Ok(()) if verbose => tracing::info!("executed effect={} {}", op, info),
            Ok(()) => tracing::debug!("executed effect={} {}", op, info),
            Err(e) => tracing::error!(error = %e, "error effect={} {}", op, info),
        }
        result
    }

    /// Execute effects in order, stopping at the first error
    pub fn execute_all(&mut self, effects: Vec<Effect>) -> Result<(), ExecuteError> {
        for effect in effects {
            self.execute(effect)?;
        }
        Ok(())
    }

    fn execute_inner(&mut self, effect: Effect) -> Result<(), ExecuteError> {
        match effect {
            Effect::Dispatch { action } => {
                self.dispatcher.dispatch(action)?;
                Ok(())
            }

            // === Timer effects ===
            Effect::SetTimer { id, duration } => {
                let now = self.clock.now();
                self.scheduler.set_timer(id, duration, now);
                Ok(())
            }

            Effect::CancelTimer { id } => {
                self.scheduler.cancel_timer(id.as_str());
                Ok(())
            }
        }
    }

    /// Remove and return timers due at the clock's current time
    pub fn fired_timers(&mut self) -> Vec<WatchEvent> {
        let now = self.clock.now();
        self.scheduler.fired_timers(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
