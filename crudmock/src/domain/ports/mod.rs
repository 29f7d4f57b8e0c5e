//! Domain ports (traits)
//!
//! The harness never owns a store, a fixture engine or an interception layer;
//! it talks to them through these traits. In-memory adapters live in
//! `crate::adapters`.

pub mod factory;
pub mod interceptor;
pub mod store;

pub use factory::FixtureFactory;
pub use interceptor::RequestInterceptor;
pub use store::RecordStore;
