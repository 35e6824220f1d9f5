//! # Pipeline Runtime
//!
//! Demo wiring for the message pipeline. The production broker routes
//! envelopes between stages by event type; here an in-process next-hop
//! table plays that role so the flow can run end-to-end in one process.
//!
//! ## Flow
//!
//! ```text
//! ingest ──received──→ Validator ──validated──→ Extractor ──extracted──→ Enricher
//!                          │                        │                       │
//!                 validation-failed        extraction-incomplete    enrichment-failed
//!                          │                        │                       │
//!                          └────────────→  Review Inbox  ←──────────────────┘
//!
//!                               Enricher ──enriched──→ Router ──routed.*──→ Team Inboxes
//!
//!                    every hop ──────────→ Event Monitor ──→ FanoutHub ──→ viewers
//! ```
//!
//! ## Structure
//!
//! - `producer` - the ingestion boundary (the one place that rejects input)
//! - `broker` - next-hop table and the dispatch loop
//! - `handlers` - terminal consumers: team inboxes and the event monitor

pub mod broker;
pub mod handlers;
pub mod producer;

pub use broker::{next_hop, InboxKind, NextHop, PipelineBroker};
pub use handlers::{EventMonitor, MonitorRecord, TeamInbox};
pub use producer::{ingest, IngestError};
