//! Ephemeral service harness for integration testing.
//!
//! Provisions an isolated instance of a backing service per test case,
//! hands the test body a ready client connection, and releases both the
//! connection and the instance on every exit path.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
