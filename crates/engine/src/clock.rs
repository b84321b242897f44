// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bw_core::{system_epoch_ms, Clock};
use std::time::Instant;

/// Clock that follows tokio's time source, so paused test runtimes
/// control timer deadlines.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn epoch_ms(&self) -> u64 {
        system_epoch_ms()
    }
}
