mod factory;
mod store;
mod stubs;

pub use factory::{FixtureDefinition, FixtureRegistry, SequenceFn};
pub use store::InMemoryStore;
pub use stubs::{InterceptedCall, StubRegistry, StubbedResponse};
