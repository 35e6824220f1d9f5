//! Ingestion boundary.
//!
//! The one place in the system that rejects input. Everything past this
//! point is fail-open: once an envelope exists, no stage may lose it.

use thiserror::Error;
use tracing::info;

use shared_envelope::{Envelope, EnvelopeMetadata, EventType, StageOutput};

/// Rejection at the ingestion boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    /// The payload had no usable text content.
    #[error("'content' must be a non-empty string")]
    EmptyContent,
}

/// Wrap raw text in a fresh envelope and hand it to the pipeline.
///
/// # Errors
///
/// Returns [`IngestError::EmptyContent`] when `content` is empty or
/// whitespace-only. Malformed input is rejected here, before any stage
/// sees it.
pub fn ingest(content: &str) -> Result<StageOutput, IngestError> {
    if content.trim().is_empty() {
        return Err(IngestError::EmptyContent);
    }

    let mut envelope = Envelope::new(content);
    envelope.metadata = EnvelopeMetadata {
        source_ip: "demo".to_string(),
        user_agent: "pipeline-demo".to_string(),
    };

    info!(message_id = %envelope.message_id, "Message ingested");
    Ok(StageOutput {
        envelope,
        event_type: EventType::MessageReceived,
    })
}
