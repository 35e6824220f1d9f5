//! # Stage Contract
//!
//! Every transform stage exposes one operation: `process(envelope) ->
//! envelope`. Stages are stateless and reentrant; each invocation operates
//! on one envelope with no shared mutable state, so distinct envelopes may
//! be processed with arbitrary parallelism.
//!
//! ```text
//! ┌──────────┐   Envelope    ┌──────────┐   Envelope + label   ┌────────┐
//! │  Broker  │ ────────────→ │  Stage   │ ──────────────────→  │ Broker │
//! └──────────┘               └──────────┘                      └────────┘
//!                             run_stage()
//! ```
//!
//! `run_stage` is the broker-facing entry point: it snapshots the error
//! count, invokes the stage, and applies `OutcomeSelector` to attach the
//! outgoing label.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::outcome::{EventType, OutcomeSelector};

/// Identity of a transform stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Validator,
    Extractor,
    Enricher,
    Router,
}

impl StageKind {
    /// Short name used in structured log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validator => "validator",
            Self::Extractor => "extractor",
            Self::Enricher => "enricher",
            Self::Router => "router",
        }
    }

    /// Namespace this stage prefixes onto its `errors` entries.
    #[must_use]
    pub const fn error_namespace(&self) -> &'static str {
        match self {
            Self::Validator => "validation",
            Self::Extractor => "extraction",
            Self::Enricher => "enrichment",
            Self::Router => "routing",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline transform stage.
///
/// Implementations must uphold the fail-open contract: business-rule
/// failures (spam detected, customer not found, nothing matched) are
/// recorded on the envelope, never surfaced as an `Err` or a panic, and the
/// returned envelope always carries whatever partial result the stage
/// computed. Collaborator faults are likewise annotated in place; no path
/// out of `process` loses the envelope.
#[async_trait]
pub trait StageProcessor: Send + Sync {
    /// Which stage this is.
    fn kind(&self) -> StageKind;

    /// Transform one envelope: set this stage's result field, advance
    /// `processing_stage`, and append any diagnostics.
    async fn process(&self, envelope: Envelope) -> Envelope;
}

/// A processed envelope plus the outgoing label the broker routes on.
#[derive(Debug, Clone)]
pub struct StageOutput {
    /// The stage's output envelope.
    pub envelope: Envelope,
    /// Label for the broker's next-hop decision.
    pub event_type: EventType,
}

/// Run one stage over one envelope and select the outgoing label.
pub async fn run_stage(stage: &dyn StageProcessor, envelope: Envelope) -> StageOutput {
    let errors_before = envelope.errors.len();
    let envelope = stage.process(envelope).await;
    let event_type = OutcomeSelector::select(stage.kind(), errors_before, &envelope);
    StageOutput {
        envelope,
        event_type,
    }
}
