//! # Stage Result Records
//!
//! Each record here is owned by exactly one stage and written at most once
//! per pipeline pass. Shapes match the JSON documents exchanged with the
//! broker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Validator verdict over the envelope content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no check failed.
    pub is_valid: bool,
    /// Number of checks run. Always equals the full check-suite size.
    pub checks_performed: u32,
    /// Human-readable message per failing check, in check order.
    pub issues_found: Vec<String>,
}

/// Keyword-derived sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// More positive than negative keyword hits.
    Positive,
    /// More negative than positive keyword hits.
    Negative,
    /// Tied counts, including zero hits on both sides.
    #[default]
    Neutral,
}

impl Sentiment {
    /// Lowercase wire name of this label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields the Extractor derives from the raw content.
///
/// Every derivation is independent; absence of one never blocks another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    /// First email-shaped match, if any.
    pub email: Option<String>,
    /// Customer name from a phrase pattern or a bare capitalized phrase.
    pub customer_name: Option<String>,
    /// First US-style phone-number match, if any.
    pub phone: Option<String>,
    /// Keyword-derived sentiment.
    pub sentiment: Sentiment,
    /// True iff any urgency keyword appears.
    pub is_urgent: bool,
    /// Character count of the content.
    pub content_length: usize,
    /// Whitespace-delimited token count of the content.
    pub word_count: usize,
}

/// A customer row from the directory collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Directory primary key.
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub account_status: String,
    pub total_purchases: f64,
    /// ISO-8601 date of the most recent purchase, if any.
    pub last_purchase_date: Option<String>,
}

/// Enricher result: whether the sender is a known customer, and their
/// directory record when they are.
///
/// The record flattens into the surrounding JSON object so consumers see
/// `first_name`, `last_name`, ... as siblings of `is_known_customer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerData {
    /// True iff the directory lookup returned a record.
    pub is_known_customer: bool,
    /// The directory record for known customers. Flattened `None`
    /// serializes to nothing, so the not-known shape stays minimal.
    #[serde(flatten)]
    pub record: Option<CustomerRecord>,
}

impl CustomerData {
    /// The not-known outcome shared by the no-email, no-match, and
    /// directory-fault paths.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            is_known_customer: false,
            record: None,
        }
    }

    /// A known customer with their directory record.
    #[must_use]
    pub const fn known(record: CustomerRecord) -> Self {
        Self {
            is_known_customer: true,
            record: Some(record),
        }
    }
}

/// Classification target of the Router stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteCategory {
    Finance,
    Support,
    Website,
    /// No configured keyword matched.
    Unknown,
}

impl RouteCategory {
    /// Lowercase wire name of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Support => "support",
            Self::Website => "website",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Router result: the winning category plus the full score map for
/// observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Winning category, or `unknown` when nothing matched.
    pub category: RouteCategory,
    /// Weighted score of the winning category; 0 when nothing matched.
    pub confidence_score: f64,
    /// Human-readable match-count explanation.
    pub reason: String,
    /// Weighted score per configured category.
    pub all_scores: BTreeMap<String, f64>,
}
