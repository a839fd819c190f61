// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the key manager and the audit log.

use crate::keys::RotationExpiryPolicy;

/// Name under which recorded audit events are published.
pub const DEFAULT_NOTIFICATION_NAME: &str = "SecurityAuditEvent";

/// Configuration for [`KeyManager`](crate::keys::KeyManager).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyManagerConfig {
    /// How long the successor produced by a rotation stays valid.
    pub rotation_expiry: RotationExpiryPolicy,
}

impl KeyManagerConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rotation expiry policy.
    pub fn with_rotation_expiry(mut self, policy: RotationExpiryPolicy) -> Self {
        self.rotation_expiry = policy;
        self
    }
}

/// Configuration for [`AuditLog`](crate::audit::AuditLog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Notification name used when publishing recorded events.
    pub notification_name: String,
    /// Upper bound applied to every query's limit (None = no cap).
    pub max_query_limit: Option<usize>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            notification_name: DEFAULT_NOTIFICATION_NAME.to_string(),
            max_query_limit: None,
        }
    }
}

impl AuditConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the notification name.
    pub fn with_notification_name(mut self, name: impl Into<String>) -> Self {
        self.notification_name = name.into();
        self
    }

    /// Caps the number of events any single query may return.
    pub fn with_max_query_limit(mut self, limit: usize) -> Self {
        self.max_query_limit = Some(limit);
        self
    }
}

/// Combined configuration for both subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    pub keys: KeyManagerConfig,
    pub audit: AuditConfig,
}

impl LedgerConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the key manager configuration.
    pub fn with_keys(mut self, keys: KeyManagerConfig) -> Self {
        self.keys = keys;
        self
    }

    /// Replaces the audit configuration.
    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}
