// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Rotation expiry policy and the result of a rotation.
//!
//! A rotation is two writes: the predecessor is marked `rotated`, then the
//! successor is written `active`. The writes are not atomic with respect to
//! each other. If the second fails the ledger holds a rotated key with no
//! successor, reported as [`KeyError::PartialRotation`](super::KeyError).
//! Hosts whose transactions commit all-or-nothing discard both writes by
//! aborting on that error.

use crate::context::UnixSeconds;

use super::model::{expiry_after_days, CryptoKey};

/// Default validity of a rotated-in key.
pub const DEFAULT_ROTATION_WINDOW_DAYS: u32 = 365;

/// Decides when the successor produced by a rotation expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationExpiryPolicy {
    /// Successor is valid for a fixed number of days from the rotation.
    FixedWindow { days: u32 },
    /// Successor expires when the predecessor would have. A predecessor
    /// that is already past its expiry yields a successor expiring at the
    /// rotation instant.
    PreserveRemaining,
    /// Successor is valid for as long as the predecessor's whole lifetime
    /// (`expires_at - activated_at`), counted from the rotation.
    PreserveLifetime,
}

impl Default for RotationExpiryPolicy {
    fn default() -> Self {
        RotationExpiryPolicy::FixedWindow {
            days: DEFAULT_ROTATION_WINDOW_DAYS,
        }
    }
}

impl RotationExpiryPolicy {
    /// Returns the successor's `expires_at` for a rotation at `now`.
    pub fn successor_expiry(&self, predecessor: &CryptoKey, now: UnixSeconds) -> UnixSeconds {
        match self {
            RotationExpiryPolicy::FixedWindow { days } => expiry_after_days(now, *days),
            RotationExpiryPolicy::PreserveRemaining => predecessor.expires_at.max(now),
            RotationExpiryPolicy::PreserveLifetime => {
                let lifetime = predecessor
                    .expires_at
                    .saturating_sub(predecessor.activated_at)
                    .max(0);
                now.saturating_add(lifetime)
            }
        }
    }
}

/// Both halves of a completed rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOutcome {
    /// The predecessor as written back, now `rotated`.
    pub retired: CryptoKey,
    /// The new `active` key.
    pub successor: CryptoKey,
}

impl RotationOutcome {
    /// Returns the id of the new key.
    #[inline]
    pub fn successor_id(&self) -> &str {
        &self.successor.id
    }
}
