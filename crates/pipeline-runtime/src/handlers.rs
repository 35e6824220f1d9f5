//! Terminal consumers.
//!
//! Envelopes leaving the Router (or dead-lettered earlier) land here. Team
//! inboxes keep delivered messages and feed a live hub per team; the event
//! monitor is the wildcard consumer observing every hop in the system.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use fanout_hub::{FanoutHub, HubSubscription};
use shared_envelope::{Envelope, EventType, ProcessingStage, StageOutput};

/// One hop of one message, as seen by the monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorRecord {
    /// The outgoing label the hop was routed on.
    pub event_type: EventType,
    /// The envelope's identity.
    pub message_id: Uuid,
    /// The envelope's position after the hop.
    pub stage: ProcessingStage,
    /// Full envelope snapshot for drill-down.
    pub envelope: Envelope,
}

/// Wildcard consumer: observes every hop and broadcasts it to live viewers.
pub struct EventMonitor {
    hub: FanoutHub<MonitorRecord>,
}

impl EventMonitor {
    /// Monitor with the default replay window and mailbox depth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hub: FanoutHub::new(),
        }
    }

    /// Record one hop and broadcast it.
    pub fn observe(&self, output: &StageOutput) {
        let record = MonitorRecord {
            event_type: output.event_type,
            message_id: output.envelope.message_id,
            stage: output.envelope.processing_stage,
            envelope: output.envelope.clone(),
        };
        let delivered = self.hub.publish(record);
        info!(
            message_id = %output.envelope.message_id,
            event_type = %output.event_type,
            viewers = delivered,
            "Event captured"
        );
    }

    /// Attach a live viewer: replay of recent hops, then the live feed.
    #[must_use]
    pub fn subscribe(&self) -> HubSubscription<MonitorRecord> {
        self.hub.subscribe()
    }

    /// The underlying hub, for capacity and counter introspection.
    #[must_use]
    pub fn hub(&self) -> &FanoutHub<MonitorRecord> {
        &self.hub
    }
}

impl Default for EventMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// A team's inbox: delivered envelopes plus a live hub for that team's
/// viewers.
pub struct TeamInbox {
    name: &'static str,
    messages: Mutex<Vec<Envelope>>,
    hub: FanoutHub<Envelope>,
}

impl TeamInbox {
    /// Inbox with its own live hub (smaller window than the monitor's).
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            messages: Mutex::new(Vec::new()),
            hub: FanoutHub::with_capacities(100, 10),
        }
    }

    /// Deliver one envelope: store it and broadcast to the team's viewers.
    pub fn deliver(&self, envelope: Envelope) {
        let delivered = self.hub.publish(envelope.clone());
        let mut messages = self.messages.lock();
        messages.push(envelope);
        info!(
            inbox = self.name,
            total = messages.len(),
            viewers = delivered,
            "Message delivered"
        );
    }

    /// Inbox name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of messages delivered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// True iff nothing has been delivered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// The most recent `limit` messages, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<Envelope> {
        let messages = self.messages.lock();
        let skip = messages.len().saturating_sub(limit);
        messages[skip..].to_vec()
    }

    /// Attach a live viewer to this inbox.
    #[must_use]
    pub fn subscribe(&self) -> HubSubscription<Envelope> {
        self.hub.subscribe()
    }
}
