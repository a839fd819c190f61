// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Host-provided collaborators: transaction id, clock and notifications.
//!
//! Operations never read the system clock or invent ids on their own; they
//! take a [`TxContext`] describing the invocation. A ledger host passes its
//! own transaction id and timestamp through [`FixedContext`]; standalone
//! hosts use [`SystemClock::begin`].
//!
//! # Example
//!
//! ```
//! use keyledger::context::{FixedContext, SystemClock, TxContext};
//!
//! let ctx = FixedContext::new("3f9a27c1d0e4", 1_714_564_800);
//! assert_eq!(ctx.tx_id_prefix(), "3f9a27c1");
//!
//! let clock = SystemClock::new();
//! let generated = clock.begin();
//! assert_eq!(generated.tx_id_prefix().len(), 8);
//! ```

mod clock;
mod error;
mod fixed;
mod notify;
mod traits;

pub use clock::{SystemClock, SystemContext};
pub use error::NotifyError;
pub use fixed::FixedContext;
pub use notify::{BufferedNotifier, NoopNotifier, Notification};
pub use traits::{Notifier, TxContext, UnixSeconds, TX_ID_PREFIX_LEN};
