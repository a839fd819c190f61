// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Collaborator traits supplied by the host.

use super::NotifyError;

/// Unix time in whole seconds.
pub type UnixSeconds = i64;

/// Number of characters of the transaction id embedded in generated key ids.
pub const TX_ID_PREFIX_LEN: usize = 8;

/// Per-invocation context: the transaction id and the clock.
///
/// One context describes one operation. The transaction id must be unique
/// per invocation and stable for its whole duration.
pub trait TxContext: Send + Sync {
    /// Returns the opaque, unique id of the current transaction.
    fn tx_id(&self) -> &str;

    /// Returns the current wall-clock time in whole seconds.
    fn now(&self) -> UnixSeconds;

    /// Returns the first [`TX_ID_PREFIX_LEN`] characters of the transaction
    /// id, or the whole id if it is shorter.
    fn tx_id_prefix(&self) -> &str {
        let id = self.tx_id();
        match id.char_indices().nth(TX_ID_PREFIX_LEN) {
            Some((end, _)) => &id[..end],
            None => id,
        }
    }
}

impl<C: TxContext + ?Sized> TxContext for &C {
    fn tx_id(&self) -> &str {
        (**self).tx_id()
    }

    fn now(&self) -> UnixSeconds {
        (**self).now()
    }
}

/// Best-effort event publication to whoever listens on the ledger.
pub trait Notifier: Send + Sync {
    /// Publishes `payload` under `name`.
    fn publish(&self, name: &str, payload: &[u8]) -> Result<(), NotifyError>;
}
