//! Driven Ports (Outbound Dependencies)
//!
//! The Enricher's one external collaborator: a keyed customer lookup.

use async_trait::async_trait;

use shared_envelope::CustomerRecord;

use crate::error::DirectoryError;

/// Keyed customer lookup.
///
/// `Ok(None)` means the directory answered and has no such customer;
/// `Err` means the directory itself faulted. The Enricher treats the two
/// as distinct outcomes.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Look up a customer by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRecord>, DirectoryError>;
}
