//! Domain layer
//!
//! - `entities`: descriptors, endpoints, records and adapter settings
//! - `ports`: traits for the store, fixture engine and interception layer

pub mod entities;
pub mod ports;
