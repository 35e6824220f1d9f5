//! # Fanout Hub - Live Broadcast for Terminal Consumers
//!
//! An in-process publish/subscribe engine that broadcasts a live sequence of
//! items to any number of viewers, replays recent history to late joiners,
//! and sheds slow consumers under backpressure without ever blocking a
//! producer.
//!
//! ## Broadcast Pattern
//!
//! ```text
//! ┌──────────────┐                      ┌───────────────┐
//! │  Producer A  │   publish()          │  Viewer 1     │
//! │              │ ──────┐              │  (mailbox Q)  │
//! └──────────────┘       │              └───────────────┘
//!                        ▼                      ↑
//!                  ┌──────────────┐             │
//!                  │  Fanout Hub  │ ────────────┤  try_send per mailbox
//!                  │  history (H) │             │
//!                  └──────────────┘             ▼
//!                        ▲              ┌───────────────┐
//! ┌──────────────┐       │              │  Viewer 2     │
//! │  Producer B  │ ──────┘              │  (late join:  │
//! └──────────────┘        subscribe()   │   replay + live)
//!                                       └───────────────┘
//! ```
//!
//! ## Backpressure Policy
//!
//! A full mailbox means its subscriber fell behind by more than `Q` items;
//! that subscriber is immediately evicted rather than given unbounded
//! buffering. `publish` never blocks and never fails.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod hub;
pub mod subscriber;

// Re-export main types
pub use hub::FanoutHub;
pub use subscriber::{HubStream, HubSubscription, SubscriptionError};

/// Default number of recent items replayed to late joiners.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Default per-subscriber mailbox depth before eviction.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 20;
