//! crudmock
//!
//! A test harness that fakes a CRUD backend for client code. Fixtures are
//! built by a factory and loaded into a client-side record store, and request
//! stubs are registered so the code under test sees the responses a real API
//! would send.
//!
//! The harness talks to its collaborators through ports:
//! - `RecordStore`: the client-side record store
//! - `FixtureFactory`: the fixture/factory engine
//! - `RequestInterceptor`: the layer that answers outgoing requests
//!
//! In-memory adapters for all three live in [`adapters`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use crudmock::adapters::{FixtureDefinition, FixtureRegistry, InMemoryStore, StubRegistry};
//! use crudmock::{HarnessConfig, ServiceContainer, TestSession};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = FixtureRegistry::new()
//!     .with_definition(FixtureDefinition::new("user").defaults(json!({"name": "Dude"})))?;
//! let app = ServiceContainer::new(
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(factory),
//!     Arc::new(StubRegistry::new()),
//! );
//!
//! let mut session = TestSession::new(HarnessConfig::default());
//! let ctx = session.setup(&app).await?;
//! ctx.handle_create(&[json!("user"), json!({"name": "Bro"})]).await?;
//! ctx.handle_update("user", "1", false).await?;
//!
//! session.teardown().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod inflection;
pub mod logging;

#[cfg(test)]
mod test_utils;


pub use app::{CrudMock, HarnessContext, ServiceContainer, TestSession};
pub use config::HarnessConfig;
pub use domain::entities::{
    FixtureRecord, HttpMethod, MockEndpoint, MockRequestDescriptor, NamingConvention, Record,
    RequestBodyMatcher, StubOptions,
};
pub use error::HarnessError;
