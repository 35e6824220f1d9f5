//! # Shared Envelope Crate
//!
//! This crate contains the `Envelope` threaded through every pipeline stage,
//! the stage-owned result records, and the `StageProcessor` contract with its
//! outgoing-label policy.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-stage types are defined here.
//! - **Value Passing**: Stages receive an `Envelope` by value and return a
//!   new `Envelope` value; no shared mutable structure crosses a stage
//!   boundary.
//! - **Fail Open**: Business-rule failures are recorded as data (an `errors`
//!   entry and/or a result field). No stage ever discards an envelope.

pub mod contract;
pub mod envelope;
pub mod outcome;
pub mod results;

pub use contract::{run_stage, StageKind, StageOutput, StageProcessor};
pub use envelope::{Envelope, EnvelopeMetadata, ProcessingStage};
pub use outcome::{EventType, OutcomeSelector};
pub use results::{
    CustomerData, CustomerRecord, ExtractedData, RouteCategory, RoutingDecision, Sentiment,
    ValidationReport,
};
