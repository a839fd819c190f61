// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Security event record.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::context::UnixSeconds;
use crate::storage::Value;

use super::AuditError;

/// One immutable entry of the audit trail.
///
/// All descriptive fields are free-form: who (`actor`) did what (`action`)
/// to what (`resource`), with which outcome (`result`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub id: String,
    /// Category, e.g. `"access_check"` or `"login"`.
    #[serde(rename = "type")]
    pub event_type: String,
    pub actor: String,
    pub resource: String,
    pub action: String,
    pub result: String,
    pub timestamp: UnixSeconds,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl SecurityEvent {
    /// Decodes a stored event.
    pub fn from_value(value: &Value) -> Result<Self, AuditError> {
        serde_json::from_slice(value.as_bytes()).map_err(|e| AuditError::decode("security event", e))
    }

    /// Encodes the event for storage.
    pub fn to_value(&self) -> Result<Value, AuditError> {
        serde_json::to_vec(self)
            .map(Value::new)
            .map_err(|e| AuditError::decode("security event", e))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
