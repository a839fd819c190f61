// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Error classification shared by every subsystem.

use std::fmt;

/// The closed set of failure kinds an operation can report.
///
/// Each subsystem has its own error enum with detailed variants; all of
/// them map onto one of these kinds through `kind()`, so a host can turn
/// any failure into a response without matching on every variant. Nothing
/// is retried inside this crate: retry policy belongs to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced key or grant does not exist.
    NotFound,
    /// Input or stored JSON is malformed, or names an unknown variant.
    Decode,
    /// The operation is not permitted in the record's current state.
    InvalidState,
    /// The ledger store failed.
    Store,
}

impl ErrorKind {
    /// Returns the kind as a stable string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Decode => "decode",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Store => "store",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
