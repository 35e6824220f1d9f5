//! In-process broker.
//!
//! The next-hop table is the demo stand-in for the external broker's
//! trigger configuration: every outgoing label maps to either the next
//! stage or a terminal inbox. The table is total over `EventType`, so no
//! envelope can leave the pipeline unrouted.

use std::sync::Arc;

use tracing::debug;

use mp_01_content_validator::ContentValidator;
use mp_02_data_extractor::DataExtractor;
use mp_03_customer_enricher::{CustomerDirectory, CustomerEnricher};
use mp_04_message_router::MessageRouter;
use shared_envelope::{run_stage, EventType, StageKind, StageOutput, StageProcessor};

use crate::handlers::{EventMonitor, TeamInbox};

/// Terminal destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InboxKind {
    /// Finance team.
    Finance,
    /// Support team.
    Support,
    /// Website/account team.
    Website,
    /// Dead-letter review queue: failed validation/extraction/enrichment
    /// and unclassifiable messages.
    Review,
}

impl InboxKind {
    /// Inbox display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Support => "support",
            Self::Website => "website",
            Self::Review => "review",
        }
    }
}

/// Where an envelope carrying a given label goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextHop {
    /// Forward to a transform stage.
    Stage(StageKind),
    /// Deliver to a terminal inbox.
    Inbox(InboxKind),
}

/// The trigger table: outgoing label to next hop.
#[must_use]
pub const fn next_hop(event_type: EventType) -> NextHop {
    match event_type {
        EventType::MessageReceived => NextHop::Stage(StageKind::Validator),
        EventType::Validated => NextHop::Stage(StageKind::Extractor),
        EventType::ValidationFailed => NextHop::Inbox(InboxKind::Review),
        EventType::Extracted => NextHop::Stage(StageKind::Enricher),
        EventType::ExtractionIncomplete => NextHop::Inbox(InboxKind::Review),
        EventType::Enriched => NextHop::Stage(StageKind::Router),
        EventType::EnrichmentFailed => NextHop::Inbox(InboxKind::Review),
        EventType::RoutedFinance => NextHop::Inbox(InboxKind::Finance),
        EventType::RoutedSupport => NextHop::Inbox(InboxKind::Support),
        EventType::RoutedWebsite => NextHop::Inbox(InboxKind::Website),
        EventType::RoutedUnknown => NextHop::Inbox(InboxKind::Review),
    }
}

/// The in-process broker: owns the four stages, the terminal inboxes, and
/// the wildcard monitor, and drives envelopes hop by hop until delivery.
pub struct PipelineBroker {
    validator: ContentValidator,
    extractor: DataExtractor,
    enricher: CustomerEnricher,
    router: MessageRouter,
    monitor: EventMonitor,
    finance: TeamInbox,
    support: TeamInbox,
    website: TeamInbox,
    review: TeamInbox,
}

impl PipelineBroker {
    /// Wire the default stages over the given customer directory.
    #[must_use]
    pub fn new(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self {
            validator: ContentValidator::default(),
            extractor: DataExtractor::default(),
            enricher: CustomerEnricher::new(directory),
            router: MessageRouter::default(),
            monitor: EventMonitor::new(),
            finance: TeamInbox::new("finance"),
            support: TeamInbox::new("support"),
            website: TeamInbox::new("website"),
            review: TeamInbox::new("review"),
        }
    }

    fn stage(&self, kind: StageKind) -> &dyn StageProcessor {
        match kind {
            StageKind::Validator => &self.validator,
            StageKind::Extractor => &self.extractor,
            StageKind::Enricher => &self.enricher,
            StageKind::Router => &self.router,
        }
    }

    /// Inbox for a terminal destination.
    #[must_use]
    pub fn inbox(&self, kind: InboxKind) -> &TeamInbox {
        match kind {
            InboxKind::Finance => &self.finance,
            InboxKind::Support => &self.support,
            InboxKind::Website => &self.website,
            InboxKind::Review => &self.review,
        }
    }

    /// The wildcard event monitor.
    #[must_use]
    pub fn monitor(&self) -> &EventMonitor {
        &self.monitor
    }

    /// Drive one ingested envelope hop by hop until it reaches an inbox.
    ///
    /// Every hop, including ingestion and the terminal one, is published to
    /// the monitor. Returns where the envelope was delivered.
    pub async fn dispatch(&self, mut output: StageOutput) -> InboxKind {
        loop {
            self.monitor.observe(&output);
            match next_hop(output.event_type) {
                NextHop::Stage(kind) => {
                    debug!(
                        message_id = %output.envelope.message_id,
                        event_type = %output.event_type,
                        stage = %kind,
                        "Forwarding to next stage"
                    );
                    output = run_stage(self.stage(kind), output.envelope).await;
                }
                NextHop::Inbox(kind) => {
                    self.inbox(kind).deliver(output.envelope);
                    return kind;
                }
            }
        }
    }
}
