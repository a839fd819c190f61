// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! keyledger: key lifecycle, access grants and a security audit trail over
//! an ordered key-value ledger.
//!
//! The crate keeps *metadata* about cryptographic keys; it never holds key
//! material. Everything is stored as JSON records in a [`LedgerStore`],
//! which the host environment provides (or [`RocksLedgerStore`] /
//! [`MemoryLedgerStore`] locally). Each call runs under a [`TxContext`]
//! that supplies a transaction id and the transaction timestamp; all-or-
//! nothing commit of a call's writes is the host's job.
//!
//! - [`keys`]: [`KeyManager`] for generate, grant, revoke grant, rotate and
//!   revoke.
//! - [`audit`]: [`AuditLog`] for recording and querying security events.
//! - [`storage`]: the ledger abstraction and key layout.
//! - [`context`]: transaction context, clock and notification sinks.

pub mod audit;
pub mod config;
pub mod context;
pub mod error;
pub mod keys;
pub mod storage;

pub use audit::{AuditError, AuditLog, EventQuery, SecurityEvent};
pub use config::{AuditConfig, KeyManagerConfig, LedgerConfig};
pub use context::{
    BufferedNotifier, FixedContext, NoopNotifier, Notifier, NotifyError, SystemClock,
    SystemContext, TxContext, UnixSeconds,
};
pub use error::ErrorKind;
pub use keys::{
    AccessType, CryptoKey, KeyAccess, KeyError, KeyManager, KeyStatus, KeyType,
    RotationExpiryPolicy, RotationOutcome,
};
pub use storage::{Key, LedgerStore, MemoryLedgerStore, RocksLedgerStore, StoreError, Value};
