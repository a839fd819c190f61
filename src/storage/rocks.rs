// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! RocksDB-backed ledger store.

use std::path::Path;

use rocksdb::{DBWithThreadMode, Direction, IteratorMode, MultiThreaded, Options, WriteOptions};

use super::ledger::{validate_key, validate_range, validate_value};
use super::{Key, LedgerStore, StoreError, Value};

/// Durability mode for write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Writes are synced to WAL but not fsynced to disk.
    /// Durable against process crashes but not power failures.
    #[default]
    WalOnly,
    /// Writes are fsynced to disk on every operation.
    FsyncEveryWrite,
}

/// RocksDB-backed ledger store.
///
/// Keys are stored as their raw UTF-8 bytes, so RocksDB's default bytewise
/// comparator yields the lexicographic order that range scans promise.
pub struct RocksLedgerStore {
    db: DBWithThreadMode<MultiThreaded>,
    write_opts: WriteOptions,
}

impl RocksLedgerStore {
    /// Opens or creates a RocksDB database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::open_with_durability(path, DurabilityMode::default())
    }

    /// Opens or creates a RocksDB database with specified durability mode.
    pub fn open_with_durability(
        path: &Path,
        durability: DurabilityMode,
    ) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // Point lookups dominate; events are read back by range
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        opts.set_block_based_table_factory(&block_opts);

        Self::open_with_options(path, opts, durability)
    }

    /// Opens a database with custom RocksDB options.
    pub fn open_with_options(
        path: &Path,
        opts: Options,
        durability: DurabilityMode,
    ) -> Result<Self, StoreError> {
        let db = DBWithThreadMode::open(&opts, path)?;

        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(durability == DurabilityMode::FsyncEveryWrite);

        Ok(Self { db, write_opts })
    }

    /// Forces a flush of memtables to disk.
    pub fn sync(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl LedgerStore for RocksLedgerStore {
    fn get(&self, key: &Key) -> Result<Option<Value>, StoreError> {
        validate_key(key)?;
        Ok(self.db.get(key.as_bytes())?.map(Value::new))
    }

    fn put(&self, key: Key, value: Value) -> Result<(), StoreError> {
        validate_key(&key)?;
        validate_value(&value)?;
        self.db
            .put_opt(key.as_bytes(), value.as_bytes(), &self.write_opts)?;
        Ok(())
    }

    fn delete(&self, key: &Key) -> Result<(), StoreError> {
        validate_key(key)?;
        self.db.delete_opt(key.as_bytes(), &self.write_opts)?;
        Ok(())
    }

    fn range_scan(&self, start: &Key, end: &Key) -> Result<Vec<(Key, Value)>, StoreError> {
        validate_range(start, end)?;

        let mut results = Vec::new();
        let iter = self
            .db
            .iterator(IteratorMode::From(start.as_bytes(), Direction::Forward));

        for item in iter {
            let (raw_key, raw_value) = item?;

            if &*raw_key >= end.as_bytes() {
                break;
            }

            let key = String::from_utf8(raw_key.into_vec()).map_err(|e| {
                StoreError::Backend(format!("non UTF-8 key in ledger: {}", e))
            })?;
            results.push((Key::new(key), Value::new(raw_value.into_vec())));
        }

        Ok(results)
    }
}
