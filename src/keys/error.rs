// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Key manager error types.

use crate::error::ErrorKind;
use crate::storage::StoreError;

use super::KeyStatus;

/// Errors that can occur in key and access operations.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key {0} does not exist")]
    KeyNotFound(String),

    #[error("no access grant for user {user_id} on key {key_id}")]
    GrantNotFound { key_id: String, user_id: String },

    #[error("decode error: {0}")]
    Decode(String),

    /// The derived id is already taken, typically by a second create in
    /// the same transaction. Nothing was written.
    #[error("key {0} already exists")]
    KeyExists(String),

    #[error("key {key_id} is {status}, cannot {operation}")]
    InvalidState {
        key_id: String,
        status: KeyStatus,
        operation: &'static str,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The predecessor was marked rotated but writing its successor failed.
    ///
    /// The ledger now holds a rotated key with no active successor. The
    /// caller decides whether to abort the host transaction or repair.
    #[error("rotation of {retired_id} interrupted: successor {successor_id} not written: {source}")]
    PartialRotation {
        retired_id: String,
        successor_id: String,
        #[source]
        source: StoreError,
    },
}

impl KeyError {
    /// Returns the failure kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeyError::KeyNotFound(_) | KeyError::GrantNotFound { .. } => ErrorKind::NotFound,
            KeyError::Decode(_) => ErrorKind::Decode,
            KeyError::InvalidState { .. } | KeyError::KeyExists(_) => ErrorKind::InvalidState,
            KeyError::Store(_) | KeyError::PartialRotation { .. } => ErrorKind::Store,
        }
    }

    pub(crate) fn decode(context: &str, err: impl std::fmt::Display) -> Self {
        KeyError::Decode(format!("{}: {}", context, err))
    }
}
