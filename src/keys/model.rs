// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Key and grant records as stored in the ledger.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::context::UnixSeconds;
use crate::storage::Value;

use super::KeyError;

/// Seconds in one day; expiration inputs are whole days.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Returns `now` advanced by `days` whole days.
#[inline]
pub fn expiry_after_days(now: UnixSeconds, days: u32) -> UnixSeconds {
    now.saturating_add(i64::from(days) * SECONDS_PER_DAY)
}

/// Kind of cryptographic key a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Symmetric,
    Asymmetric,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Symmetric => "symmetric",
            KeyType::Asymmetric => "asymmetric",
        }
    }
}

impl FromStr for KeyType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symmetric" => Ok(KeyType::Symmetric),
            "asymmetric" => Ok(KeyType::Asymmetric),
            other => Err(KeyError::Decode(format!("unknown key type {:?}", other))),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a key.
///
/// ```text
///            rotate
///   active ─────────► rotated
///     │
///     │ revoke
///     ▼
///   revoked
/// ```
///
/// `rotated` and `revoked` are terminal: the record is never mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Rotated,
    Revoked,
}

impl KeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStatus::Active => "active",
            KeyStatus::Rotated => "rotated",
            KeyStatus::Revoked => "revoked",
        }
    }

    /// Returns true if no further transition is possible.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, KeyStatus::Active)
    }
}

impl FromStr for KeyStatus {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(KeyStatus::Active),
            "rotated" => Ok(KeyStatus::Rotated),
            "revoked" => Ok(KeyStatus::Revoked),
            other => Err(KeyError::Decode(format!("unknown key status {:?}", other))),
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a grant allows its holder to do with the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessType {
    Full,
    EncryptOnly,
    DecryptOnly,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Full => "full",
            AccessType::EncryptOnly => "encrypt-only",
            AccessType::DecryptOnly => "decrypt-only",
        }
    }
}

impl FromStr for AccessType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(AccessType::Full),
            "encrypt-only" => Ok(AccessType::EncryptOnly),
            "decrypt-only" => Ok(AccessType::DecryptOnly),
            other => Err(KeyError::Decode(format!("unknown access type {:?}", other))),
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of one cryptographic key. Never holds key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoKey {
    pub id: String,
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub algorithm: String,
    pub status: KeyStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_ids: Vec<String>,
    pub created_at: UnixSeconds,
    pub activated_at: UnixSeconds,
    pub expires_at: UnixSeconds,
    /// Zero until the key is revoked.
    pub revoked_at: UnixSeconds,
    /// Opaque blob, passed through untouched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: String,
}

impl CryptoKey {
    /// Returns true if the key is in the `active` state.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Returns true if the validity window has closed at `now`.
    #[inline]
    pub fn is_expired(&self, now: UnixSeconds) -> bool {
        now >= self.expires_at
    }

    /// Decodes a stored record.
    pub fn from_value(value: &Value) -> Result<Self, KeyError> {
        serde_json::from_slice(value.as_bytes()).map_err(|e| KeyError::decode("crypto key record", e))
    }

    /// Encodes the record for storage.
    pub fn to_value(&self) -> Result<Value, KeyError> {
        serde_json::to_vec(self)
            .map(Value::new)
            .map_err(|e| KeyError::decode("crypto key record", e))
    }
}

/// One user's access to one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAccess {
    pub key_id: String,
    pub user_id: String,
    pub access_type: AccessType,
    pub granted_at: UnixSeconds,
    pub expires_at: UnixSeconds,
    pub granted_by: String,
}

impl KeyAccess {
    /// Returns true if the grant has lapsed at `now`.
    #[inline]
    pub fn is_expired(&self, now: UnixSeconds) -> bool {
        now >= self.expires_at
    }

    /// Decodes a stored grant.
    pub fn from_value(value: &Value) -> Result<Self, KeyError> {
        serde_json::from_slice(value.as_bytes()).map_err(|e| KeyError::decode("key access record", e))
    }

    /// Encodes the grant for storage.
    pub fn to_value(&self) -> Result<Value, KeyError> {
        serde_json::to_vec(self)
            .map(Value::new)
            .map_err(|e| KeyError::decode("key access record", e))
    }
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
