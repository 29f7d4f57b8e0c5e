//! Test utilities
//!
//! Fixture definitions and ready-wired harness contexts over the in-memory
//! adapters.

pub mod fixtures;

pub use fixtures::*;
