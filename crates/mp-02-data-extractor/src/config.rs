//! Extractor configuration: the keyword tables behind urgency and
//! sentiment detection.

/// Baseline urgency keyword list.
const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "emergency",
    "immediately",
    "critical",
    "help",
    "please help",
    "stuck",
];

/// Baseline positive sentiment words.
const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "great",
    "excellent",
    "thank",
    "pleased",
    "love",
    "wonderful",
];

/// Baseline negative sentiment words.
const NEGATIVE_WORDS: &[&str] = &[
    "frustrated",
    "angry",
    "disappointed",
    "terrible",
    "worst",
    "hate",
    "awful",
];

/// Immutable keyword tables handed to the extractor at construction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Any of these (case-insensitive) marks the message urgent.
    pub urgency_keywords: Vec<String>,
    /// Words counted toward a positive sentiment label.
    pub positive_words: Vec<String>,
    /// Words counted toward a negative sentiment label.
    pub negative_words: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            urgency_keywords: URGENCY_KEYWORDS.iter().map(ToString::to_string).collect(),
            positive_words: POSITIVE_WORDS.iter().map(ToString::to_string).collect(),
            negative_words: NEGATIVE_WORDS.iter().map(ToString::to_string).collect(),
        }
    }
}
