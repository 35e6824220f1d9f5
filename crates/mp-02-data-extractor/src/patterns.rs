//! Compiled extraction patterns.
//!
//! Compiled once at stage construction and shared by every invocation.

use regex::Regex;

/// Standard email shape.
const EMAIL: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

/// Introduction phrase followed by a capitalized full name:
/// "my name is John Doe", "I am Jane Smith", "this is Mike Johnson".
/// Only the phrase is case-insensitive; the name must be capitalized.
const NAME_PHRASE: &str = r"(?i:my name is|i am|this is)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)";

/// Fallback: any bare capitalized phrase of two or more words.
const NAME_BARE: &str = r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b";

/// US phone, dashed/dotted/bare digit grouping: 123-456-7890, 123.456.7890,
/// 1234567890.
const PHONE_GROUPED: &str = r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b";

/// US phone with parenthesized area code: (123) 456-7890.
const PHONE_PAREN: &str = r"\(\d{3}\)\s*\d{3}[-.]?\d{4}";

/// The extractor's compiled pattern set.
#[derive(Debug)]
pub struct ExtractionPatterns {
    email: Regex,
    name_phrase: Regex,
    name_bare: Regex,
    phone_grouped: Regex,
    phone_paren: Regex,
}

impl ExtractionPatterns {
    /// Compile the full pattern set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL).expect("email pattern is valid"),
            name_phrase: Regex::new(NAME_PHRASE).expect("name phrase pattern is valid"),
            name_bare: Regex::new(NAME_BARE).expect("bare name pattern is valid"),
            phone_grouped: Regex::new(PHONE_GROUPED).expect("phone pattern is valid"),
            phone_paren: Regex::new(PHONE_PAREN).expect("phone pattern is valid"),
        }
    }

    /// First email-shaped match in `text`.
    #[must_use]
    pub fn email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    /// Customer name: introduction-phrase match first, bare capitalized
    /// phrase as fallback, first match wins.
    #[must_use]
    pub fn customer_name(&self, text: &str) -> Option<String> {
        if let Some(captures) = self.name_phrase.captures(text) {
            return captures.get(1).map(|m| m.as_str().trim().to_string());
        }
        self.name_bare
            .find(text)
            .map(|m| m.as_str().trim().to_string())
    }

    /// First US-style phone match, grouped form before parenthesized form.
    #[must_use]
    pub fn phone(&self, text: &str) -> Option<String> {
        self.phone_grouped
            .find(text)
            .or_else(|| self.phone_paren.find(text))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for ExtractionPatterns {
    fn default() -> Self {
        Self::new()
    }
}
