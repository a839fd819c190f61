// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Notifier implementations.

use parking_lot::Mutex;

use super::{Notifier, NotifyError};

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _name: &str, _payload: &[u8]) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// A published notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub name: String,
    pub payload: Vec<u8>,
}

/// Buffers notifications in memory until drained.
///
/// Hosts that publish events at commit time collect them here during the
/// invocation and emit them once the transaction is accepted.
#[derive(Debug, Default)]
pub struct BufferedNotifier {
    pending: Mutex<Vec<Notification>>,
}

impl BufferedNotifier {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all buffered notifications in publish order.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Returns the number of buffered notifications.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl Notifier for BufferedNotifier {
    fn publish(&self, name: &str, payload: &[u8]) -> Result<(), NotifyError> {
        self.pending.lock().push(Notification {
            name: name.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}
