// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Key-space layout of the ledger.
//!
//! Every record type owns a disjoint prefix:
//!
//! | Record          | Key                               |
//! |-----------------|-----------------------------------|
//! | `CryptoKey`     | `cryptokey:<id>`                  |
//! | `KeyAccess`     | `keyaccess:<keyId>-<userId>`      |
//! | `SecurityEvent` | `event:<seq, 20 digits>`          |
//! | event sequence  | `auditseq:head`                   |
//!
//! The layout is shared with other readers of the same ledger and must not
//! change. Event suffixes are zero-padded to a fixed width so that the
//! byte order of keys equals the order events were recorded in.

use super::Key;

/// Prefix for crypto key records.
pub const CRYPTO_KEY_PREFIX: &str = "cryptokey:";

/// Prefix for key access grants.
pub const KEY_ACCESS_PREFIX: &str = "keyaccess:";

/// Prefix for security events.
pub const EVENT_PREFIX: &str = "event:";

/// Exclusive upper bound of the event range. `'~'` sorts after `':'` and
/// after every ASCII digit.
pub const EVENT_RANGE_END: &str = "event~";

/// Key holding the last assigned event sequence number.
pub const EVENT_SEQUENCE_KEY: &str = "auditseq:head";

/// Width of the zero-padded event sequence suffix. Wide enough for any `u64`.
pub const EVENT_SEQ_WIDTH: usize = 20;

/// Returns the storage key for a crypto key record.
#[inline]
pub fn crypto_key_key(key_id: &str) -> Key {
    Key::new(format!("{CRYPTO_KEY_PREFIX}{key_id}"))
}

/// Returns the storage key for the grant of `key_id` to `user_id`.
///
/// One grant exists per (key, user) pair; granting again overwrites it.
#[inline]
pub fn key_access_key(key_id: &str, user_id: &str) -> Key {
    Key::new(format!("{KEY_ACCESS_PREFIX}{key_id}-{user_id}"))
}

/// Returns the storage key for the event with sequence number `seq`.
#[inline]
pub fn event_key(seq: u64) -> Key {
    Key::new(format!("{EVENT_PREFIX}{seq:0width$}", width = EVENT_SEQ_WIDTH))
}

/// Returns the half-open range `["event:", "event~")` covering every event.
#[inline]
pub fn event_range() -> (Key, Key) {
    (Key::from(EVENT_PREFIX), Key::from(EVENT_RANGE_END))
}
