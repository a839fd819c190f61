// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Key and access manager.
//!
//! Owns two record types in the ledger: [`CryptoKey`] (metadata of one
//! cryptographic key, never the key material) and [`KeyAccess`] (one
//! user's grant on one key).
//!
//! # Key Lifecycle
//!
//! ```text
//!  generate_key          rotate_key
//! ─────────────► active ────────────► rotated    (+ new active successor)
//!                  │
//!                  │ revoke_key
//!                  ▼
//!               revoked
//! ```
//!
//! Only `active` keys accept grants, rotation or revocation. Grants are
//! keyed by the (key, user) pair, so granting twice overwrites; revoking a
//! grant deletes it.
//!
//! # Atomicity
//!
//! Every operation is one write except [`KeyManager::rotate_key`], which
//! writes the retired predecessor and then the successor. See
//! [`KeyError::PartialRotation`] for the interrupted case.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use keyledger::context::FixedContext;
//! use keyledger::keys::{KeyManager, KeyStatus};
//! use keyledger::storage::MemoryLedgerStore;
//!
//! let manager = KeyManager::new(Arc::new(MemoryLedgerStore::new()));
//! let ctx = FixedContext::new("9c1e04aa7f3b", 1_714_564_800);
//!
//! let key = manager
//!     .generate_key(&ctx, "key123", "symmetric", "AES", r#"["user1","user2"]"#, 365)
//!     .unwrap();
//! assert_eq!(key.id, "key123-9c1e04aa");
//!
//! manager
//!     .grant_key_access(&ctx, &key.id, "user2", "encrypt-only", "user1", 30)
//!     .unwrap();
//!
//! let next = FixedContext::new("51d0be22c4e9", 1_714_651_200);
//! let outcome = manager.rotate_key(&next, &key.id).unwrap();
//! assert_eq!(outcome.retired.status, KeyStatus::Rotated);
//! assert_eq!(outcome.successor_id(), "key123-9c1e04aa-51d0be22");
//! ```

mod error;
mod manager;
mod model;
mod rotation;

pub use error::KeyError;
pub use manager::KeyManager;
pub use model::{
    expiry_after_days, AccessType, CryptoKey, KeyAccess, KeyStatus, KeyType, SECONDS_PER_DAY,
};
pub use rotation::{RotationExpiryPolicy, RotationOutcome, DEFAULT_ROTATION_WINDOW_DAYS};
