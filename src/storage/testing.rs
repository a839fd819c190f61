// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Fault-injecting store used by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{Key, LedgerStore, MemoryLedgerStore, StoreError, Value};

/// Wraps a [`MemoryLedgerStore`], counting mutations and failing on demand.
#[derive(Debug, Default)]
pub(crate) struct FaultyStore {
    inner: MemoryLedgerStore,
    puts: AtomicUsize,
    deletes: AtomicUsize,
    /// Fail the put whose 1-based ordinal equals this value. 0 = never.
    fail_put_at: AtomicUsize,
    fail_gets: AtomicBool,
    fail_scans: AtomicBool,
}

impl FaultyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fails the `n`th put counted from now (1 = the next put).
    pub(crate) fn fail_nth_put(&self, n: usize) {
        let done = self.puts.load(Ordering::SeqCst);
        self.fail_put_at.store(done + n, Ordering::SeqCst);
    }

    pub(crate) fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_scans(&self, fail: bool) {
        self.fail_scans.store(fail, Ordering::SeqCst);
    }

    /// Number of put attempts, including failed ones.
    pub(crate) fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub(crate) fn inner(&self) -> &MemoryLedgerStore {
        &self.inner
    }
}

impl LedgerStore for FaultyStore {
    fn get(&self, key: &Key) -> Result<Option<Value>, StoreError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected get failure".into()));
        }
        self.inner.get(key)
    }

    fn put(&self, key: Key, value: Value) -> Result<(), StoreError> {
        let ordinal = self.puts.fetch_add(1, Ordering::SeqCst) + 1;
        if ordinal == self.fail_put_at.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!("injected failure on put {ordinal}")));
        }
        self.inner.put(key, value)
    }

    fn delete(&self, key: &Key) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key)
    }

    fn range_scan(&self, start: &Key, end: &Key) -> Result<Vec<(Key, Value)>, StoreError> {
        if self.fail_scans.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected scan failure".into()));
        }
        self.inner.range_scan(start, end)
    }
}
