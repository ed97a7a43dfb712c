//! Integration test crate for Tessera.
//!
//! This crate has no library code. It only contains integration tests
//! that run withdraw, spend and deposit flows across the workspace crates
//! with real RSA blind signatures.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p tessera-integration-tests
//! ```
