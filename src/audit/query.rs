// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Audit query filter.

use serde::{Deserialize, Serialize};

use crate::context::UnixSeconds;

use super::{AuditError, SecurityEvent};

/// Filter applied to the audit trail.
///
/// Decoded from JSON such as
/// `{"startTime":0,"endTime":9999999999,"eventType":"login","limit":10}`.
/// Every field is optional: a missing bound is open, a missing or empty
/// `eventType`/`actor` does not filter, and a missing `limit` returns all
/// matches. Time bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<UnixSeconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<UnixSeconds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl EventQuery {
    /// Creates a query matching every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a query from JSON.
    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        serde_json::from_str(json).map_err(|e| AuditError::decode("event query", e))
    }

    /// Restricts to events with `start <= timestamp <= end`.
    pub fn between(mut self, start: UnixSeconds, end: UnixSeconds) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Restricts to events of exactly this type.
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Restricts to events by exactly this actor.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Returns at most `limit` events.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if `event` passes every filter.
    pub fn matches(&self, event: &SecurityEvent) -> bool {
        let start = self.start_time.unwrap_or(UnixSeconds::MIN);
        let end = self.end_time.unwrap_or(UnixSeconds::MAX);

        (start..=end).contains(&event.timestamp)
            && field_matches(self.event_type.as_deref(), &event.event_type)
            && field_matches(self.actor.as_deref(), &event.actor)
    }

    /// Returns the limit after applying an optional global cap.
    pub fn effective_limit(&self, cap: Option<usize>) -> usize {
        match (self.limit, cap) {
            (Some(limit), Some(cap)) => limit.min(cap),
            (Some(limit), None) => limit,
            (None, Some(cap)) => cap,
            (None, None) => usize::MAX,
        }
    }
}

#[inline]
fn field_matches(filter: Option<&str>, value: &str) -> bool {
    match filter {
        None | Some("") => true,
        Some(expected) => expected == value,
    }
}
