// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Security audit trail.
//!
//! [`AuditLog`] appends [`SecurityEvent`]s to the ledger and answers
//! [`EventQuery`]s over them. Events are never updated or deleted.
//!
//! # Ordering
//!
//! Each event is stored under `event:<seq>`, where `seq` is a zero-padded
//! counter kept at `auditseq:head`. Queries scan the event namespace in key
//! order, so results come back in recording order regardless of how many
//! events exist or how their timestamps compare.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use keyledger::audit::AuditLog;
//! use keyledger::context::FixedContext;
//! use keyledger::storage::MemoryLedgerStore;
//!
//! let log = AuditLog::new(Arc::new(MemoryLedgerStore::new()));
//! let ctx = FixedContext::new("tx123", 1_714_564_800);
//!
//! log.record_event(&ctx, "login", "admin", "system", "login", "success", r#"{"source":"api"}"#)
//!     .unwrap();
//!
//! let events = log.query_events(r#"{"actor":"admin","limit":10}"#).unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].id, "tx123-1");
//! ```

mod error;
mod event;
mod log;
mod query;

pub use error::AuditError;
pub use event::SecurityEvent;
pub use log::AuditLog;
pub use query::EventQuery;
