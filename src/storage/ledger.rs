// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Ledger store types and trait definition.

use std::fmt;

use super::error::StoreError;

/// Maximum key size in bytes.
pub const MAX_KEY_SIZE: usize = 8 * 1024; // 8KB

/// Maximum value size in bytes.
pub const MAX_VALUE_SIZE: usize = 4 * 1024 * 1024; // 4MB

/// A key in the ledger store.
///
/// Keys are namespaced text (`cryptokey:...`, `event:...`) and compare
/// lexicographically by their UTF-8 bytes, which is the order range scans
/// return them in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(pub String);

impl Key {
    /// Creates a new key.
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the length of the key in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the key is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value in the ledger store. Opaque bytes; this crate writes JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value(pub Vec<u8>);

impl Value {
    /// Creates a new value from bytes.
    #[inline]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the value bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the value, returning the bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the value.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for Value {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The ordered key-value ledger that all records live in.
///
/// The store is shared, externally synchronized state. Implementations must
/// not assume that they are the only writer, and callers must not cache
/// reads across operations. Conflicting writes to the same key are only as
/// safe as the host's own transaction isolation makes them.
pub trait LedgerStore: Send + Sync {
    /// Reads the value stored at `key`, or `None` if absent.
    fn get(&self, key: &Key) -> Result<Option<Value>, StoreError>;

    /// Writes `value` at `key`, replacing any previous value.
    fn put(&self, key: Key, value: Value) -> Result<(), StoreError>;

    /// Removes `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &Key) -> Result<(), StoreError>;

    /// Returns every entry with `start <= key < end`, in lexicographic key
    /// order.
    ///
    /// The scan is fully drained before returning, so no iterator state
    /// outlives the call.
    fn range_scan(&self, start: &Key, end: &Key) -> Result<Vec<(Key, Value)>, StoreError>;
}

/// Validates key size.
pub(crate) fn validate_key(key: &Key) -> Result<(), StoreError> {
    if key.len() > MAX_KEY_SIZE {
        return Err(StoreError::KeyTooLarge {
            size: key.len(),
            max: MAX_KEY_SIZE,
        });
    }
    Ok(())
}

/// Validates value size.
pub(crate) fn validate_value(value: &Value) -> Result<(), StoreError> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(StoreError::ValueTooLarge {
            size: value.len(),
            max: MAX_VALUE_SIZE,
        });
    }
    Ok(())
}

/// Validates that `[start, end)` is a well-formed half-open range.
pub(crate) fn validate_range(start: &Key, end: &Key) -> Result<(), StoreError> {
    validate_key(start)?;
    validate_key(end)?;
    if start > end {
        return Err(StoreError::InvalidRange {
            start: start.0.clone(),
            end: end.0.clone(),
        });
    }
    Ok(())
}
