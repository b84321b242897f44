// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-core: domain types for the buildwatch build status watcher

pub mod macros;

pub mod action;
pub mod build;
pub mod clock;
pub mod config;
pub(crate) mod duration_ms;
pub mod effect;
pub mod event;
pub mod id;
pub mod indicator;
pub mod lookup;
pub mod poll;
pub mod target;
pub mod timer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use action::BuildAction;
#[cfg(any(test, feature = "test-support"))]
pub use build::BuildBuilder;
pub use build::{Build, BuildId, BuildStatus};
pub use clock::{system_epoch_ms, Clock, FakeClock, SystemClock};
pub use config::{ConfigError, WatchConfig};
pub use effect::Effect;
pub use event::WatchEvent;
pub use id::{short, Branch, CommitId, Repo, WatcherId};
pub use indicator::{build_path, Indicator};
pub use lookup::{BuildLookup, EntryState, StoreEntry};
pub use poll::{PollCadence, RetryPolicy};
pub use target::{BuildKey, WatchTarget};
pub use timer::{TimerId, TimerKind};
