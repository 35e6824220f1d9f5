//! # Message Pipeline Test Suite
//!
//! Unified test crate for cross-crate behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs      # End-to-end stage choreography
//!     └── fanout.rs     # Hub behavior under concurrency and backpressure
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mp-tests
//!
//! # By category
//! cargo test -p mp-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
