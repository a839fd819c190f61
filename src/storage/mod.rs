// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Ordered key-value ledger abstraction.
//!
//! Every record this crate owns lives in one shared [`LedgerStore`]: an
//! ordered key-value store with exact-key get/put/delete and half-open
//! range scans. The ledger is provided by the host; consensus, endorsement
//! and transaction ordering happen there and are not this crate's concern.
//!
//! # Concurrency
//!
//! The store is shared, mutable, externally synchronized state. Nothing in
//! this crate locks around it or caches reads between operations. Two
//! operations writing the same key concurrently are exactly as safe as the
//! host's transaction isolation makes them.
//!
//! Two operations write more than one key and are not atomic against
//! competing writers: `KeyManager::rotate_key` (predecessor, then
//! successor) and `AuditLog::record_event` (the `auditseq:head` counter,
//! then the event). [`MemoryLedgerStore`] and [`RocksLedgerStore`] lock
//! only per call and provide no such isolation. Recording events from
//! several threads against either store can hand two events the same
//! sequence number, and the later write replaces the earlier event while
//! both calls succeed. Serialize recording, or run on a ledger that
//! isolates conflicting transactions on `auditseq:head`.
//!
//! # Example
//!
//! ```
//! use keyledger::storage::{Key, LedgerStore, MemoryLedgerStore, Value};
//!
//! let store = MemoryLedgerStore::new();
//! store.put(Key::from("event:01"), Value::from("a")).unwrap();
//! store.put(Key::from("event:02"), Value::from("b")).unwrap();
//!
//! let events = store
//!     .range_scan(&Key::from("event:"), &Key::from("event~"))
//!     .unwrap();
//! assert_eq!(events.len(), 2);
//! ```

mod error;
mod key;
mod ledger;
mod memory;
mod rocks;
#[cfg(test)]
pub(crate) mod testing;

pub use error::StoreError;
pub use key::{
    crypto_key_key, event_key, event_range, key_access_key, CRYPTO_KEY_PREFIX,
    EVENT_PREFIX, EVENT_RANGE_END, EVENT_SEQUENCE_KEY, EVENT_SEQ_WIDTH, KEY_ACCESS_PREFIX,
};
pub use ledger::{Key, LedgerStore, Value, MAX_KEY_SIZE, MAX_VALUE_SIZE};
pub use memory::MemoryLedgerStore;
pub use rocks::{DurabilityMode, RocksLedgerStore};
