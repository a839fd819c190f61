// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Error types for host collaborators.

/// Errors returned by a [`Notifier`](super::Notifier).
///
/// Callers treat notification as best effort, so these errors are logged
/// and dropped, never surfaced from an operation.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification channel closed")]
    Closed,

    #[error("notification rejected: {0}")]
    Rejected(String),
}
