//! Enricher stage service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{error, info, warn};

use shared_envelope::{
    CustomerData, Envelope, ProcessingStage, StageKind, StageProcessor,
};

use crate::ports::CustomerDirectory;

/// Enricher tuning knobs.
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Upper bound on one directory lookup. A lookup that exceeds this is
    /// treated as a directory fault.
    pub lookup_timeout: Duration,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

/// The Enricher stage.
///
/// Looks the sender up in the customer directory by the email the Extractor
/// found. Whatever happens -- no email, no match, directory down -- the
/// envelope leaves annotated and fully formed.
pub struct CustomerEnricher {
    directory: Arc<dyn CustomerDirectory>,
    config: EnricherConfig,
}

impl CustomerEnricher {
    /// Build an enricher over a directory port with default tuning.
    #[must_use]
    pub fn new(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self::with_config(directory, EnricherConfig::default())
    }

    /// Build an enricher with explicit tuning.
    #[must_use]
    pub fn with_config(directory: Arc<dyn CustomerDirectory>, config: EnricherConfig) -> Self {
        Self { directory, config }
    }

    /// Run the bounded lookup and fold the result into envelope
    /// annotations. Returns the `customer_data` to record.
    async fn enrich_by_email(&self, envelope: &mut Envelope, email: &str) -> CustomerData {
        info!(message_id = %envelope.message_id, email, "Looking up customer");

        match timeout(
            self.config.lookup_timeout,
            self.directory.find_by_email(email),
        )
        .await
        {
            Ok(Ok(Some(record))) => {
                info!(
                    message_id = %envelope.message_id,
                    customer_id = record.customer_id,
                    "Customer found"
                );
                CustomerData::known(record)
            }
            Ok(Ok(None)) => {
                warn!(message_id = %envelope.message_id, email, "Customer not found");
                envelope.record_error(format!("enrichment:customer-not-found:{email}"));
                CustomerData::unknown()
            }
            Ok(Err(fault)) => {
                error!(message_id = %envelope.message_id, %fault, "Directory lookup failed");
                envelope.record_error(format!("enrichment:directory-error:{fault}"));
                CustomerData::unknown()
            }
            Err(_elapsed) => {
                error!(
                    message_id = %envelope.message_id,
                    timeout_ms = self.config.lookup_timeout.as_millis() as u64,
                    "Directory lookup timed out"
                );
                envelope.record_error(format!(
                    "enrichment:directory-error:lookup timed out after {}ms",
                    self.config.lookup_timeout.as_millis()
                ));
                CustomerData::unknown()
            }
        }
    }
}

#[async_trait]
impl StageProcessor for CustomerEnricher {
    fn kind(&self) -> StageKind {
        StageKind::Enricher
    }

    async fn process(&self, mut envelope: Envelope) -> Envelope {
        let email = envelope
            .extracted_data
            .as_ref()
            .and_then(|data| data.email.clone());

        let customer_data = match email {
            Some(email) => self.enrich_by_email(&mut envelope, &email).await,
            None => {
                warn!(message_id = %envelope.message_id, "No email address to look up");
                envelope.record_error("enrichment:no-email");
                CustomerData::unknown()
            }
        };

        envelope.customer_data = Some(customer_data);
        envelope.processing_stage = ProcessingStage::Enriched;
        envelope
    }
}
