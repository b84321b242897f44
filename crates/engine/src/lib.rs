// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-engine: build watcher state machine, timers, dispatch and runtime

pub mod backend;
mod clock;
pub mod dispatch;
mod error;
pub mod executor;
pub mod runtime;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod watcher;

pub use backend::{BuildBackend, BuildService, ServiceError};
pub use clock::TokioClock;
#[cfg(any(test, feature = "test-support"))]
pub use dispatch::FakeDispatcher;
pub use dispatch::{ChannelDispatcher, DispatchError, Dispatcher};
pub use error::RuntimeError;
pub use executor::{ExecuteError, Executor};
pub use runtime::{RuntimeDeps, WatchHandle, WatchRuntime, WatchSnapshot};
pub use scheduler::Scheduler;
pub use service::MemoryBuildService;
pub use store::{BuildStore, MemoryBuildStore};
pub use watcher::{BuildRequestError, BuildWatcher};
