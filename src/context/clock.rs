// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! System clock and generated transaction ids.
//!
//! For hosts without a ledger-assigned transaction id: each invocation gets
//! a random UUID and a reading from a clock that never runs backwards.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{TxContext, UnixSeconds};

/// Wall clock in whole seconds that never goes backwards.
///
/// A step of the system clock into the past is absorbed by repeating the
/// last reading until real time catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    /// Creates a new clock.
    pub fn new() -> Self {
        Self::default()
    }

    fn physical_secs() -> UnixSeconds {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as UnixSeconds)
            .unwrap_or(0)
    }

    /// Returns the current time, never less than any previous reading.
    pub fn now(&self) -> UnixSeconds {
        loop {
            let physical = Self::physical_secs();
            let last = self.last.load(Ordering::Acquire);
            let next = physical.max(last);

            match self
                .last
                .compare_exchange(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(_) => continue,
            }
        }
    }

    /// Starts a new invocation: fresh transaction id, time read once.
    pub fn begin(&self) -> SystemContext {
        SystemContext {
            tx_id: uuid::Uuid::new_v4().simple().to_string(),
            now: self.now(),
        }
    }
}

/// Context produced by [`SystemClock::begin`].
///
/// The time is sampled once, so every record written by one operation
/// carries the same timestamp.
#[derive(Debug, Clone)]
pub struct SystemContext {
    tx_id: String,
    now: UnixSeconds,
}

impl TxContext for SystemContext {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn now(&self) -> UnixSeconds {
        self.now
    }
}
