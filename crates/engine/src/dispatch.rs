// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch channel between watchers and the build backend.
//!
//! Each runtime is handed its dispatcher at construction; there is no
//! process-wide dispatcher.

use bw_core::BuildAction;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatch channel closed")]
    Closed,
}

/// Sends build actions. Never blocks.
pub trait Dispatcher: Clone + Send + Sync + 'static {
    fn dispatch(&self, action: BuildAction) -> Result<(), DispatchError>;
}

/// Dispatcher backed by an unbounded tokio channel
#[derive(Clone, Debug)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<BuildAction>,
}

impl ChannelDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<BuildAction>) -> Self {
        Self { tx }
    }

    /// Create a dispatcher and the receiving end for the backend.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BuildAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, action: BuildAction) -> Result<(), DispatchError> {
        self.tx.send(action).map_err(|_| DispatchError::Closed)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{DispatchError, Dispatcher};
    use bw_core::BuildAction;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeDispatchState {
        actions: Vec<BuildAction>,
        closed: bool,
    }

    /// Fake dispatcher that records every action
    #[derive(Clone, Default)]
    pub struct FakeDispatcher {
        inner: Arc<Mutex<FakeDispatchState>>,
    }

    impl FakeDispatcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// All dispatched actions, oldest first
        pub fn actions(&self) -> Vec<BuildAction> {
            self.inner.lock().actions.clone()
        }

        pub fn refresh_count(&self) -> usize {
            self.inner.lock().actions.iter().filter(|a| a.is_refresh()).count()
        }

        pub fn create_count(&self) -> usize {
            self.inner.lock().actions.iter().filter(|a| a.is_create()).count()
        }

        pub fn clear(&self) {
            self.inner.lock().actions.clear();
        }

        /// Make every later dispatch fail as if the backend had gone away
        pub fn close(&self) {
            self.inner.lock().closed = true;
        }
    }

    impl Dispatcher for FakeDispatcher {
        fn dispatch(&self, action: BuildAction) -> Result<(), DispatchError> {
            let mut inner = self.inner.lock();
            if inner.closed {
                return Err(DispatchError::Closed);
            }
            inner.actions.push(action);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDispatcher;

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
