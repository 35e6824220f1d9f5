//! # Outgoing Labels
//!
//! After a stage runs, the broker needs one event-type label to pick the
//! next hop. `OutcomeSelector` is the single policy that produces it, for
//! every stage, from the stage's observable side effects.

use serde::{Deserialize, Serialize};

use crate::contract::StageKind;
use crate::envelope::Envelope;
use crate::results::RouteCategory;

/// Outgoing event-type label attached to an envelope leaving a stage.
///
/// Serializes to the reverse-DNS type strings the broker filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Fresh envelope leaving the ingestion boundary.
    #[serde(rename = "com.pipeline.message.received")]
    MessageReceived,
    #[serde(rename = "com.pipeline.message.validated")]
    Validated,
    #[serde(rename = "com.pipeline.message.validation-failed")]
    ValidationFailed,
    #[serde(rename = "com.pipeline.message.extracted")]
    Extracted,
    #[serde(rename = "com.pipeline.message.extraction-incomplete")]
    ExtractionIncomplete,
    #[serde(rename = "com.pipeline.message.enriched")]
    Enriched,
    #[serde(rename = "com.pipeline.message.enrichment-failed")]
    EnrichmentFailed,
    #[serde(rename = "com.pipeline.message.routed.finance")]
    RoutedFinance,
    #[serde(rename = "com.pipeline.message.routed.support")]
    RoutedSupport,
    #[serde(rename = "com.pipeline.message.routed.website")]
    RoutedWebsite,
    #[serde(rename = "com.pipeline.message.routed.unknown")]
    RoutedUnknown,
}

impl EventType {
    /// The wire string the broker matches triggers against.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MessageReceived => "com.pipeline.message.received",
            Self::Validated => "com.pipeline.message.validated",
            Self::ValidationFailed => "com.pipeline.message.validation-failed",
            Self::Extracted => "com.pipeline.message.extracted",
            Self::ExtractionIncomplete => "com.pipeline.message.extraction-incomplete",
            Self::Enriched => "com.pipeline.message.enriched",
            Self::EnrichmentFailed => "com.pipeline.message.enrichment-failed",
            Self::RoutedFinance => "com.pipeline.message.routed.finance",
            Self::RoutedSupport => "com.pipeline.message.routed.support",
            Self::RoutedWebsite => "com.pipeline.message.routed.website",
            Self::RoutedUnknown => "com.pipeline.message.routed.unknown",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy turning a stage's side effects into an outgoing label.
///
/// The rule: compare the count of `errors` entries before and after the
/// stage call. Count increased means the stage's failed/incomplete label;
/// otherwise its success label. The Router is the one exception: its label
/// comes from the classification result, because failing to classify is
/// represented as `category = unknown`, not as an error entry.
pub struct OutcomeSelector;

impl OutcomeSelector {
    /// Select the outgoing label for `kind` given the pre-call error count
    /// and the post-call envelope.
    #[must_use]
    pub fn select(kind: StageKind, errors_before: usize, envelope: &Envelope) -> EventType {
        let errors_grew = envelope.errors.len() > errors_before;
        match kind {
            StageKind::Validator => {
                if errors_grew {
                    EventType::ValidationFailed
                } else {
                    EventType::Validated
                }
            }
            StageKind::Extractor => {
                if errors_grew {
                    EventType::ExtractionIncomplete
                } else {
                    EventType::Extracted
                }
            }
            StageKind::Enricher => {
                if errors_grew {
                    EventType::EnrichmentFailed
                } else {
                    EventType::Enriched
                }
            }
            StageKind::Router => {
                let category = envelope
                    .routing
                    .as_ref()
                    .map_or(RouteCategory::Unknown, |decision| decision.category);
                match category {
                    RouteCategory::Finance => EventType::RoutedFinance,
                    RouteCategory::Support => EventType::RoutedSupport,
                    RouteCategory::Website => EventType::RoutedWebsite,
                    RouteCategory::Unknown => EventType::RoutedUnknown,
                }
            }
        }
    }
}
