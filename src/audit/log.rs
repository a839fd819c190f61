// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Append-only audit trail stored in the ledger.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::AuditConfig;
use crate::context::{NoopNotifier, Notifier, TxContext};
use crate::storage::{event_key, event_range, Key, LedgerStore, Value, EVENT_SEQUENCE_KEY};

use super::{AuditError, EventQuery, SecurityEvent};

/// Records security events and answers filtered queries over them.
///
/// Events are written under `event:<seq>` with a zero-padded sequence
/// number taken from a counter at `auditseq:head`, so a range scan over the
/// event namespace yields events in the order they were recorded.
///
/// The counter is read, bumped and written back without any lock, so an
/// `AuditLog` relies on the host ledger isolating concurrent transactions
/// that touch `auditseq:head`. The bundled stores do not: two threads
/// recording at once can reuse a number and one event is silently lost.
pub struct AuditLog<S: LedgerStore + ?Sized> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    config: AuditConfig,
}

impl<S: LedgerStore + ?Sized> AuditLog<S> {
    /// Creates an audit log with default configuration and no notifier.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, AuditConfig::default())
    }

    /// Creates an audit log with the given configuration.
    pub fn with_config(store: Arc<S>, config: AuditConfig) -> Self {
        Self {
            store,
            notifier: Arc::new(NoopNotifier),
            config,
        }
    }

    /// Sets the notifier that recorded events are published to.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Appends an event to the trail.
    ///
    /// `metadata_json` must be a JSON object whose values are all strings.
    /// After the event is stored it is published to the notifier; a
    /// failed publication is logged and does not fail the call.
    ///
    /// This is a two-write operation: the counter at `auditseq:head` is
    /// written, then the event. If the event write fails the counter keeps
    /// the skipped number, which leaves a gap. The read-increment-write of
    /// the counter is not atomic against competing writers; calls that
    /// overlap on a store without transaction isolation (including
    /// [`MemoryLedgerStore`](crate::storage::MemoryLedgerStore) and
    /// [`RocksLedgerStore`](crate::storage::RocksLedgerStore)) can receive
    /// the same sequence number, and the later event overwrites the earlier.
    #[instrument(skip(self, ctx, metadata_json), fields(tx_id = %ctx.tx_id()))]
    pub fn record_event(
        &self,
        ctx: &dyn TxContext,
        event_type: &str,
        actor: &str,
        resource: &str,
        action: &str,
        result: &str,
        metadata_json: &str,
    ) -> Result<SecurityEvent, AuditError> {
        let metadata: BTreeMap<String, String> = serde_json::from_str(metadata_json)
            .map_err(|e| AuditError::decode("event metadata", e))?;

        let seq = self.next_sequence()?;
        let event = SecurityEvent {
            id: format!("{}-{}", ctx.tx_id(), seq),
            event_type: event_type.to_string(),
            actor: actor.to_string(),
            resource: resource.to_string(),
            action: action.to_string(),
            result: result.to_string(),
            timestamp: ctx.now(),
            metadata,
        };
        let value = event.to_value()?;

        self.store.put(
            Key::from(EVENT_SEQUENCE_KEY),
            Value::new(seq.to_string().into_bytes()),
        )?;
        self.store.put(event_key(seq), value)?;

        info!(
            target: "audit",
            event_id = %event.id,
            seq,
            event_type = %event.event_type,
            actor = %event.actor,
            resource = %event.resource,
            action = %event.action,
            result = %event.result,
            "Security event recorded"
        );

        self.publish(&event);
        Ok(event)
    }

    /// Decodes `query_json` into an [`EventQuery`] and runs it.
    pub fn query_events(&self, query_json: &str) -> Result<Vec<SecurityEvent>, AuditError> {
        let query = EventQuery::from_json(query_json)?;
        self.query(&query)
    }

    /// Returns matching events in recording order, at most the query's
    /// limit (further capped by [`AuditConfig::max_query_limit`]).
    ///
    /// Every event in the trail is decoded, even past the limit. A single
    /// corrupt entry fails the whole query rather than silently dropping
    /// part of the trail.
    #[instrument(skip(self))]
    pub fn query(&self, query: &EventQuery) -> Result<Vec<SecurityEvent>, AuditError> {
        let limit = query.effective_limit(self.config.max_query_limit);
        let (start, end) = event_range();
        let entries = self.store.range_scan(&start, &end)?;
        let scanned = entries.len();

        let mut matched = Vec::new();
        for (key, value) in entries {
            let event = SecurityEvent::from_value(&value).map_err(|e| {
                warn!(target: "audit", key = %key, error = %e, "Corrupt event in audit trail");
                AuditError::Decode(format!("event at {}: {}", key, e))
            })?;

            if matched.len() < limit && query.matches(&event) {
                matched.push(event);
            }
        }

        debug!(scanned, returned = matched.len(), "Audit query complete");
        Ok(matched)
    }

    /// Reads the counter and returns the next sequence number.
    fn next_sequence(&self) -> Result<u64, AuditError> {
        let last = match self.store.get(&Key::from(EVENT_SEQUENCE_KEY))? {
            None => 0,
            Some(value) => std::str::from_utf8(value.as_bytes())
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| AuditError::Decode("event sequence counter is not a number".into()))?,
        };

        last.checked_add(1).ok_or(AuditError::SequenceExhausted)
    }

    fn publish(&self, event: &SecurityEvent) {
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(target: "audit", event_id = %event.id, error = %e, "Failed to encode notification");
                return;
            }
        };

        if let Err(e) = self.notifier.publish(&self.config.notification_name, &payload) {
            warn!(
                target: "audit",
                event_id = %event.id,
                name = %self.config.notification_name,
                error = %e,
                "Failed to publish security event"
            );
        }
    }
}
