//! Domain entities

pub mod adapter;
pub mod descriptor;
pub mod endpoint;
pub mod record;

pub use adapter::{AdapterKind, NamingConvention, StoreAdapter};
pub use descriptor::MockRequestDescriptor;
pub use endpoint::{HttpMethod, MockEndpoint, RequestBodyMatcher, StubOptions};
pub use record::{id_from_value, FixtureRecord, Record};
