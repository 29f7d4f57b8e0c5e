//! Test fixtures
//!
//! A fixture engine with a few model types, and helpers that wire it to an
//! in-memory store and stub registry.

use std::sync::Arc;

use serde_json::json;

use crate::adapters::{FixtureDefinition, FixtureRegistry, InMemoryStore, StubRegistry};
use crate::app::{HarnessContext, ServiceContainer, TestSession};
use crate::config::HarnessConfig;
use crate::domain::entities::NamingConvention;
use crate::logging::init_test_tracing;

pub type TestContext = HarnessContext<InMemoryStore, FixtureRegistry, StubRegistry>;
pub type TestApp = ServiceContainer<InMemoryStore, FixtureRegistry, StubRegistry>;

/// `user` (named `admin`, traits `silly`/`loud`), `company` and `project`
pub fn test_factory() -> FixtureRegistry {
    let registry = FixtureRegistry::new();
    registry
        .define(
            FixtureDefinition::new("user")
                .defaults(json!({"name": "User1", "type": "normal"}))
                .named("admin", json!({"type": "superuser", "name": "Admin"}))
                .with_trait("silly", json!({"name": "Silly"}))
                .with_trait("loud", json!({"volume": 11}))
                .sequence("email", |n| json!(format!("user{}@example.com", n))),
        )
        .unwrap();
    registry
        .define(
            FixtureDefinition::new("company")
                .defaults(json!({"name": "Silly corp"}))
                .with_trait("big", json!({"employeeCount": 500})),
        )
        .unwrap();
    registry
        .define(
            FixtureDefinition::new("project")
                .defaults(json!({"createdBy": "User1"}))
                .sequence("title", |n| json!(format!("Project {}", n))),
        )
        .unwrap();
    registry
}

pub fn test_app_with_config(
    config: &HarnessConfig,
) -> (TestApp, Arc<InMemoryStore>, Arc<StubRegistry>) {
    init_test_tracing();

    let store = Arc::new(InMemoryStore::from_config(config));
    let stubs = Arc::new(StubRegistry::new());
    let app = ServiceContainer::new(store.clone(), Arc::new(test_factory()), stubs.clone());
    (app, store, stubs)
}

pub fn test_app() -> (TestApp, Arc<InMemoryStore>, Arc<StubRegistry>) {
    test_app_with_config(&HarnessConfig::default())
}

pub fn test_session() -> TestSession<InMemoryStore, FixtureRegistry, StubRegistry> {
    TestSession::new(HarnessConfig::default())
}

/// A bound context, skipping the session
pub fn test_context_with_config(
    config: HarnessConfig,
) -> (TestContext, Arc<InMemoryStore>, Arc<StubRegistry>) {
    let (app, store, stubs) = test_app_with_config(&config);
    let ctx = HarnessContext::new(
        app.lookup_store(),
        app.lookup_factory(),
        app.lookup_interceptor(),
        config,
    );
    (ctx, store, stubs)
}

pub fn test_context() -> (TestContext, Arc<InMemoryStore>, Arc<StubRegistry>) {
    test_context_with_config(HarnessConfig::default())
}

/// Context over an ActiveModel-style (snake_case) API
pub fn test_snake_context() -> (TestContext, Arc<InMemoryStore>, Arc<StubRegistry>) {
    test_context_with_config(HarnessConfig::default().with_naming(NamingConvention::SnakeCase))
}
