//! # mp-03-customer-enricher
//!
//! Customer Enricher stage: joins the envelope with a customer record
//! looked up by the extracted email address.
//!
//! ## Outcomes
//!
//! Exactly one of four per invocation, all fail-open:
//!
//! | Condition | `customer_data` | `errors` entry |
//! |-----------|-----------------|----------------|
//! | No email extracted | not known | `enrichment:no-email` |
//! | Directory has no match | not known | `enrichment:customer-not-found:<email>` |
//! | Directory faulted / timed out | not known | `enrichment:directory-error:<detail>` |
//! | Match found | known + record | none |
//!
//! The directory lookup is the only blocking operation in the stage layer;
//! it is bounded by a timeout and no lock is held while waiting.

pub mod adapters;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCustomerDirectory;
pub use error::DirectoryError;
pub use ports::CustomerDirectory;
pub use service::{CustomerEnricher, EnricherConfig};
