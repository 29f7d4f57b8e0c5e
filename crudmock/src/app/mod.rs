//! Application layer
//!
//! The harness itself: argument normalization, response shaping, URL
//! resolution, stub registration, the CRUD mock handlers and the session
//! lifecycle that brackets each test.

pub mod argument_normalizer;
pub mod context;
pub mod crud_handlers;
pub mod endpoint_resolver;
pub mod payload_shaper;
pub mod session;
pub mod stub_registrar;

pub use argument_normalizer::{normalize, normalize_list};
pub use context::HarnessContext;
pub use crud_handlers::{CrudMock, FAILURE_STATUS};
pub use session::{ServiceContainer, TestSession};
