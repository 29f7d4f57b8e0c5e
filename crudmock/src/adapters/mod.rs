//! Adapters - concrete implementations of the domain ports
//!
//! Only in-memory adapters ship with the harness; a test suite with its own
//! store or interception layer implements the ports directly.

pub mod memory;

pub use memory::{
    FixtureDefinition, FixtureRegistry, InMemoryStore, InterceptedCall, StubRegistry,
    StubbedResponse,
};
