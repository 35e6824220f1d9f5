//! # Message Envelope
//!
//! The unit of work threaded through every pipeline stage.
//!
//! ## Contract
//!
//! - **Immutable identity**: `message_id`, `content`, and `timestamp` are
//!   assigned once at ingestion and never reassigned.
//! - **Monotonic progress**: `processing_stage` is advanced by exactly the
//!   stage that performs that work and never moves backward.
//! - **Append-only diagnostics**: stages only append to `errors`, each entry
//!   prefixed with the stage's own namespace (`validation:`, `extraction:`,
//!   `enrichment:`) so downstream consumers can attribute failures.
//! - **One owner per result field**: `validation`, `extracted_data`,
//!   `customer_data`, and `routing` are each written at most once per pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::results::{CustomerData, ExtractedData, RoutingDecision, ValidationReport};

/// Pipeline position of an envelope.
///
/// Ordered so that stage regression is checkable: each stage assigns its own
/// variant, which compares strictly greater than its predecessor's.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStage {
    /// Freshly ingested, no stage has run yet.
    #[default]
    Received,
    /// The Validator has run.
    Validated,
    /// The Extractor has run.
    Extracted,
    /// The Enricher has run.
    Enriched,
    /// The Router has run (terminal stage).
    Routed,
}

impl ProcessingStage {
    /// Lowercase wire name of this stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Extracted => "extracted",
            Self::Enriched => "enriched",
            Self::Routed => "routed",
        }
    }
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque ingestion metadata carried alongside the payload.
///
/// Stages never read or write this; it exists for terminal consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    /// Origin address as reported at the ingestion boundary.
    pub source_ip: String,
    /// Client identification as reported at the ingestion boundary.
    pub user_agent: String,
}

impl Default for EnvelopeMetadata {
    fn default() -> Self {
        Self {
            source_ip: "unknown".to_string(),
            user_agent: "unknown".to_string(),
        }
    }
}

/// The evolving record representing one message as it passes through the
/// pipeline.
///
/// An `Envelope` is created once at ingestion; each stage takes it by value
/// and returns a new version extended with that stage's result. Stage-owned
/// result fields serialize only once populated, so the JSON shape grows as
/// the envelope moves down the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Opaque unique identifier, assigned once at ingestion.
    pub message_id: Uuid,

    /// The original text payload. Never mutated by any stage.
    pub content: String,

    /// Creation time, set once at ingestion.
    pub timestamp: DateTime<Utc>,

    /// Current pipeline position.
    pub processing_stage: ProcessingStage,

    /// Ingestion metadata, opaque to all stages.
    #[serde(default)]
    pub metadata: EnvelopeMetadata,

    /// Ordered, append-only diagnostic entries. The sole signal used to
    /// detect "did this stage fail".
    #[serde(default)]
    pub errors: Vec<String>,

    /// Validator result. Owned by the Validator stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,

    /// Extractor result. Owned by the Extractor stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<ExtractedData>,

    /// Enricher result. Owned by the Enricher stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_data: Option<CustomerData>,

    /// Router result. Owned by the Router stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingDecision>,
}

impl Envelope {
    /// Create a fresh envelope at the ingestion boundary.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            content: content.into(),
            timestamp: Utc::now(),
            processing_stage: ProcessingStage::Received,
            metadata: EnvelopeMetadata::default(),
            errors: Vec::new(),
            validation: None,
            extracted_data: None,
            customer_data: None,
            routing: None,
        }
    }

    /// Append one diagnostic entry. Existing entries are never removed or
    /// reordered.
    pub fn record_error(&mut self, entry: impl Into<String>) {
        self.errors.push(entry.into());
    }

    /// Number of diagnostic entries accumulated so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
