//! Error types for the Enricher stage.

use thiserror::Error;

/// Faults from the customer directory collaborator.
///
/// These are collaborator faults, not business outcomes: "no such customer"
/// is `Ok(None)` at the port, never an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory could not be reached (transient-unavailable).
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// The directory was reached but the query itself failed.
    #[error("directory query failed: {0}")]
    QueryFailed(String),
}
