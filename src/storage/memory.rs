// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! In-memory ordered ledger store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::ledger::{validate_key, validate_range, validate_value};
use super::{Key, LedgerStore, StoreError, Value};

/// An ordered in-memory ledger backed by a `BTreeMap`.
///
/// Useful for tests and for hosts that keep world state in memory and
/// persist it elsewhere. Not durable.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    entries: RwLock<BTreeMap<Key, Value>>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: &Key) -> bool {
        self.entries.read().contains_key(key)
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn get(&self, key: &Key) -> Result<Option<Value>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: Key, value: Value) -> Result<(), StoreError> {
        validate_key(&key)?;
        validate_value(&value)?;
        self.entries.write().insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &Key) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }

    fn range_scan(&self, start: &Key, end: &Key) -> Result<Vec<(Key, Value)>, StoreError> {
        validate_range(start, end)?;
        let entries = self.entries.read();
        Ok(entries
            .range(start.clone()..end.clone())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
