//! # mp-04-message-router
//!
//! Message Router stage: classifies each message into a department by
//! weighted keyword scoring and emits the routing decision the broker fans
//! out on.
//!
//! ## Scoring
//!
//! ```text
//! score(category) = distinct keyword hits x category weight
//! ```
//!
//! The strictly highest score wins; ties go to the earliest category in
//! declared order. A zero maximum routes to `unknown` -- failing to
//! classify is a result, not an error, which is why this stage's outgoing
//! label comes from the category rather than the error-count delta.

pub mod config;
pub mod scorer;
pub mod service;

pub use config::{CategoryRule, RoutingConfig};
pub use scorer::{CategoryScore, RoutingScorer};
pub use service::MessageRouter;
