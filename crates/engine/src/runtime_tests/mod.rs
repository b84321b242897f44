// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::dispatch::FakeDispatcher;
use crate::store::MemoryBuildStore;
use bw_core::test_support::{passed_build, running_build, widgets_target};
use bw_core::{BuildAction, BuildStatus, FakeClock, WatchEvent};
use std::time::Duration;

mod events;
mod live;

type TestRuntime = WatchRuntime<MemoryBuildStore, FakeDispatcher, FakeClock>;

struct TestContext {
    runtime: TestRuntime,
    store: MemoryBuildStore,
    dispatcher: FakeDispatcher,
    clock: FakeClock,
}

fn setup_with(store: MemoryBuildStore, buildable: bool) -> TestContext {
    let dispatcher = FakeDispatcher::new();
    let clock = FakeClock::new();
    let runtime = WatchRuntime::new(
        RuntimeDeps { store: store.clone(), dispatcher: dispatcher.clone(), clock: clock.clone() },
        widgets_target(),
        buildable,
        WatchConfig::default(),
    )
    .unwrap();
    TestContext { runtime, store, dispatcher, clock }
}

fn setup(buildable: bool) -> TestContext {
    setup_with(MemoryBuildStore::new(), buildable)
}
