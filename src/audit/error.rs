// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Audit log error types.

use crate::error::ErrorKind;
use crate::storage::StoreError;

/// Errors that can occur while recording or querying security events.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("event sequence exhausted")]
    SequenceExhausted,

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AuditError {
    /// Returns the failure kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuditError::Decode(_) => ErrorKind::Decode,
            AuditError::SequenceExhausted => ErrorKind::InvalidState,
            AuditError::Store(_) => ErrorKind::Store,
        }
    }

    pub(crate) fn decode(context: &str, err: impl std::fmt::Display) -> Self {
        AuditError::Decode(format!("{}: {}", context, err))
    }
}
