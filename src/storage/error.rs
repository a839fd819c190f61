// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Storage error types.

/// Errors that can occur in ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("key too large: {size} > {max}")]
    KeyTooLarge { size: usize, max: usize },

    #[error("value too large: {size} > {max}")]
    ValueTooLarge { size: usize, max: usize },

    #[error("invalid range: start {start:?} is after end {end:?}")]
    InvalidRange { start: String, end: String },

    #[error("ledger backend error: {0}")]
    Backend(String),

    #[error("rocksdb error: {0}")]
    RocksDb(#[from] rocksdb::Error),
}
