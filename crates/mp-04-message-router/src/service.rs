//! Router stage service.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use shared_envelope::{Envelope, ProcessingStage, RouteCategory, StageKind, StageProcessor};

use crate::config::RoutingConfig;
use crate::scorer::RoutingScorer;

/// The Router stage, terminal transform of the pipeline.
///
/// Never appends to `errors`: an unclassifiable message routes to
/// `unknown`, it does not fail.
pub struct MessageRouter {
    scorer: RoutingScorer,
}

impl MessageRouter {
    /// Build a router from an immutable rule set.
    #[must_use]
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            scorer: RoutingScorer::new(config),
        }
    }
}

impl Default for MessageRouter {
    fn default() -> Self {
        Self::new(RoutingConfig::default())
    }
}

#[async_trait]
impl StageProcessor for MessageRouter {
    fn kind(&self) -> StageKind {
        StageKind::Router
    }

    async fn process(&self, mut envelope: Envelope) -> Envelope {
        let decision = self.scorer.decide(&envelope.content);

        if decision.category == RouteCategory::Unknown {
            warn!(message_id = %envelope.message_id, "Could not classify message");
        } else {
            info!(
                message_id = %envelope.message_id,
                category = %decision.category,
                confidence = decision.confidence_score,
                "Message routed"
            );
        }
        debug!(message_id = %envelope.message_id, scores = ?decision.all_scores, "Detailed scores");

        envelope.routing = Some(decision);
        envelope.processing_stage = ProcessingStage::Routed;
        envelope
    }
}
