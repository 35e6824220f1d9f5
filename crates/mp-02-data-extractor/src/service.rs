//! Extractor stage service.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use shared_envelope::{
    Envelope, ExtractedData, ProcessingStage, Sentiment, StageKind, StageProcessor,
};

use crate::config::ExtractorConfig;
use crate::patterns::ExtractionPatterns;

/// The Extractor stage.
///
/// Each derivation is independent; the only one that affects the outgoing
/// label is the email, because the Enricher keys on it downstream.
pub struct DataExtractor {
    config: ExtractorConfig,
    patterns: ExtractionPatterns,
}

impl DataExtractor {
    /// Build an extractor from an immutable keyword configuration.
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            patterns: ExtractionPatterns::new(),
        }
    }

    /// True iff any urgency keyword appears, case-insensitive.
    #[must_use]
    pub fn detect_urgency(&self, text: &str) -> bool {
        let text_lower = text.to_lowercase();
        self.config
            .urgency_keywords
            .iter()
            .any(|keyword| text_lower.contains(keyword.as_str()))
    }

    /// Keyword-count sentiment: whichever side has strictly more hits wins,
    /// a tie (including zero-zero) is neutral.
    #[must_use]
    pub fn detect_sentiment(&self, text: &str) -> Sentiment {
        let text_lower = text.to_lowercase();
        let positive = self
            .config
            .positive_words
            .iter()
            .filter(|word| text_lower.contains(word.as_str()))
            .count();
        let negative = self
            .config
            .negative_words
            .iter()
            .filter(|word| text_lower.contains(word.as_str()))
            .count();

        if negative > positive {
            Sentiment::Negative
        } else if positive > negative {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    /// Derive every structured field from `content`.
    #[must_use]
    pub fn extract(&self, content: &str) -> ExtractedData {
        ExtractedData {
            email: self.patterns.email(content),
            customer_name: self.patterns.customer_name(content),
            phone: self.patterns.phone(content),
            sentiment: self.detect_sentiment(content),
            is_urgent: self.detect_urgency(content),
            content_length: content.chars().count(),
            word_count: content.split_whitespace().count(),
        }
    }
}

impl Default for DataExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[async_trait]
impl StageProcessor for DataExtractor {
    fn kind(&self) -> StageKind {
        StageKind::Extractor
    }

    async fn process(&self, mut envelope: Envelope) -> Envelope {
        let extracted = self.extract(&envelope.content);
        debug!(
            message_id = %envelope.message_id,
            email = ?extracted.email,
            customer_name = ?extracted.customer_name,
            sentiment = %extracted.sentiment,
            is_urgent = extracted.is_urgent,
            "Extraction complete"
        );

        if extracted.email.is_some() {
            info!(message_id = %envelope.message_id, "Data extracted successfully");
        } else {
            warn!(message_id = %envelope.message_id, "No email found, marking incomplete");
            envelope.record_error("extraction:no-email-found");
        }

        envelope.extracted_data = Some(extracted);
        envelope.processing_stage = ProcessingStage::Extracted;
        envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_envelope::{run_stage, EventType};

    #[test]
    fn test_extracts_name_and_email() {
        let extractor = DataExtractor::default();
        let data = extractor.extract("My name is John Doe, email john@example.com");
        assert_eq!(data.customer_name.as_deref(), Some("John Doe"));
        assert_eq!(data.email.as_deref(), Some("john@example.com"));
    }

    #[test]
    fn test_nothing_to_extract() {
        let extractor = DataExtractor::default();
        let data = extractor.extract("nothing useful in this text at all");
        assert!(data.email.is_none());
        assert!(data.customer_name.is_none());
        assert!(data.phone.is_none());
    }

    #[test]
    fn test_counts() {
        let extractor = DataExtractor::default();
        let data = extractor.extract("one two three");
        assert_eq!(data.content_length, 13);
        assert_eq!(data.word_count, 3);
    }

    #[test]
    fn test_urgency_detection() {
        let extractor = DataExtractor::default();
        assert!(extractor.detect_urgency("Please fix this ASAP"));
        assert!(extractor.detect_urgency("this is an EMERGENCY"));
        assert!(!extractor.detect_urgency("no rush on this one"));
    }

    #[test]
    fn test_sentiment_majority_wins() {
        let extractor = DataExtractor::default();
        assert_eq!(
            extractor.detect_sentiment("I love this, thank you, great work, but one awful bug"),
            Sentiment::Positive
        );
        assert_eq!(
            extractor.detect_sentiment("frustrated and angry about the worst release ever"),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_sentiment_tie_is_neutral() {
        let extractor = DataExtractor::default();
        assert_eq!(
            extractor.detect_sentiment("happy but also frustrated"),
            Sentiment::Neutral
        );
        assert_eq!(
            extractor.detect_sentiment("a statement of plain facts"),
            Sentiment::Neutral
        );
    }

    #[tokio::test]
    async fn test_process_with_email_succeeds() {
        let extractor = DataExtractor::default();
        let output = run_stage(
            &extractor,
            Envelope::new("My name is John Doe, email john@example.com"),
        )
        .await;

        assert_eq!(output.event_type, EventType::Extracted);
        assert_eq!(output.envelope.processing_stage, ProcessingStage::Extracted);
        assert!(output.envelope.errors.is_empty());
        let data = output.envelope.extracted_data.expect("extracted data");
        assert_eq!(data.email.as_deref(), Some("john@example.com"));
    }

    #[tokio::test]
    async fn test_process_without_email_is_incomplete_but_advances() {
        let extractor = DataExtractor::default();
        let output = run_stage(&extractor, Envelope::new("no contact details provided")).await;

        assert_eq!(output.event_type, EventType::ExtractionIncomplete);
        // Fail open: the stage still advanced and kept its partial result.
        assert_eq!(output.envelope.processing_stage, ProcessingStage::Extracted);
        assert!(output.envelope.extracted_data.is_some());
        assert_eq!(output.envelope.errors, vec!["extraction:no-email-found"]);
    }
}
