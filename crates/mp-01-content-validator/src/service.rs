//! Validator stage service.

use async_trait::async_trait;
use regex::Regex;
use tracing::{info, warn};

use shared_envelope::{
    Envelope, ProcessingStage, StageKind, StageProcessor, ValidationReport,
};

use crate::checks;
use crate::config::ValidatorConfig;

/// URL-like substring: an http/https scheme followed by a standard URI body.
pub(crate) const URL_PATTERN: &str = r"https?://(?:[A-Za-z0-9$\-_@.&+!*(),]|%[0-9a-fA-F]{2})+";

/// The Validator stage.
///
/// Runs the fixed check suite over `content` and records a
/// [`ValidationReport`]. Every failing check also appends a
/// `validation:`-prefixed entry to the envelope's `errors`, which is what
/// drives the failed/success outgoing label.
pub struct ContentValidator {
    config: ValidatorConfig,
    url_pattern: Regex,
}

impl ContentValidator {
    /// Build a validator from an immutable rule set.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        let url_pattern = Regex::new(URL_PATTERN).expect("URL pattern is valid");
        Self {
            config,
            url_pattern,
        }
    }

    /// Run all checks, in fixed order, accumulating every failure.
    #[must_use]
    pub fn validate(&self, content: &str) -> ValidationReport {
        let mut issues: Vec<String> = Vec::new();

        // 1. Spam keywords
        let spam = checks::find_keywords(content, &self.config.spam_keywords);
        if !spam.is_empty() {
            issues.push(format!("Spam keywords: {}", spam.join(", ")));
        }

        // 2. Profanity keywords
        let profanity = checks::find_keywords(content, &self.config.profanity_keywords);
        if !profanity.is_empty() {
            issues.push(format!("Profanity: {}", profanity.join(", ")));
        }

        // 3. Length bounds
        let length = content.chars().count();
        if length < self.config.min_length {
            issues.push(format!(
                "Message too short (minimum {} characters)",
                self.config.min_length
            ));
        }
        if length > self.config.max_length {
            issues.push(format!(
                "Message too long (maximum {} characters)",
                self.config.max_length
            ));
        }

        // 4. Capitalization ratio (only for long-enough content)
        if length > self.config.caps_check_min_length
            && checks::caps_ratio(content) > self.config.caps_ratio_threshold
        {
            issues.push(format!(
                "Excessive capitalization detected (>{:.0}%)",
                self.config.caps_ratio_threshold * 100.0
            ));
        }

        // 5. URL count
        let urls = checks::count_urls(&self.url_pattern, content);
        if urls > self.config.max_urls {
            issues.push(format!("Too many URLs detected ({urls})"));
        }

        // 6. Repeated characters
        if checks::has_repeated_run(content, self.config.repeat_run_threshold) {
            issues.push("Excessive character repetition detected".to_string());
        }

        ValidationReport {
            is_valid: issues.is_empty(),
            checks_performed: ValidatorConfig::CHECKS_PERFORMED,
            issues_found: issues,
        }
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

#[async_trait]
impl StageProcessor for ContentValidator {
    fn kind(&self) -> StageKind {
        StageKind::Validator
    }

    async fn process(&self, mut envelope: Envelope) -> Envelope {
        let report = self.validate(&envelope.content);

        if report.is_valid {
            info!(
                message_id = %envelope.message_id,
                checks = report.checks_performed,
                "All validation checks passed"
            );
        } else {
            warn!(
                message_id = %envelope.message_id,
                issues = report.issues_found.len(),
                "Validation failed"
            );
            for issue in &report.issues_found {
                envelope.record_error(format!("validation:{issue}"));
            }
        }

        envelope.validation = Some(report);
        envelope.processing_stage = ProcessingStage::Validated;
        envelope
    }
}
