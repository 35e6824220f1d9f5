//! # mp-02-data-extractor
//!
//! Data Extractor stage: derives structured fields from unstructured
//! message text using deterministic patterns. No stage blocks another's
//! derivation; a message with no email still gets sentiment, urgency, and
//! counts.
//!
//! Success requires an email address -- it is the key the Enricher looks
//! customers up by. A missing email is recorded as an error entry, which is
//! what flips the outgoing label to extraction-incomplete while the envelope
//! still advances.

pub mod config;
pub mod patterns;
pub mod service;

pub use config::ExtractorConfig;
pub use patterns::ExtractionPatterns;
pub use service::DataExtractor;
