// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Context with host-supplied transaction id and time.

use super::{TxContext, UnixSeconds};

/// A [`TxContext`] whose values are fixed by the caller.
///
/// This is what a ledger host constructs per invocation, passing through
/// the transaction id and timestamp its consensus layer assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedContext {
    tx_id: String,
    now: UnixSeconds,
}

impl FixedContext {
    /// Creates a context for transaction `tx_id` executing at `now`.
    pub fn new(tx_id: impl Into<String>, now: UnixSeconds) -> Self {
        Self {
            tx_id: tx_id.into(),
            now,
        }
    }

    /// Returns a context for a different transaction at the same time.
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = tx_id.into();
        self
    }

    /// Returns a context at a different time in the same transaction.
    pub fn at(mut self, now: UnixSeconds) -> Self {
        self.now = now;
        self
    }
}

impl TxContext for FixedContext {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn now(&self) -> UnixSeconds {
        self.now
    }
}
