//! In-memory directory adapter.
//!
//! Backs the demo runtime and tests. A production deployment would put a
//! real datastore behind the same port.

use std::collections::HashMap;

use async_trait::async_trait;

use shared_envelope::CustomerRecord;

use crate::error::DirectoryError;
use crate::ports::CustomerDirectory;

/// Directory backed by a plain map keyed on email.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    records: HashMap<String, CustomerRecord>,
}

impl InMemoryCustomerDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer under an email key.
    pub fn insert(&mut self, email: impl Into<String>, record: CustomerRecord) {
        self.records.insert(email.into(), record);
    }

    /// Number of registered customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True iff no customers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, CustomerRecord)> for InMemoryCustomerDirectory {
    fn from_iter<I: IntoIterator<Item = (String, CustomerRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRecord>, DirectoryError> {
        Ok(self.records.get(email).cloned())
    }
}
