//! Adapters implementing the outbound directory port.

pub mod memory;

pub use memory::InMemoryCustomerDirectory;
