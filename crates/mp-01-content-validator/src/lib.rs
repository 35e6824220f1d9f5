//! # mp-01-content-validator
//!
//! Content Validator stage: rule-based safety and quality checks over the
//! raw message text.
//!
//! ## Overview
//!
//! Six checks run in a fixed order, and every failing check is reported --
//! a message that is simultaneously spammy, too long, and shouting gets all
//! three issues, not just the first:
//!
//! 1. Spam-keyword containment
//! 2. Profanity-keyword containment
//! 3. Length bounds
//! 4. Capitalization ratio
//! 5. URL count
//! 6. Repeated-character runs
//!
//! The stage is fail-open: an invalid message is annotated and passed on,
//! never dropped. The validator itself has no state beyond its immutable
//! configuration and compiled patterns.

pub mod checks;
pub mod config;
pub mod service;

pub use config::ValidatorConfig;
pub use service::ContentValidator;
