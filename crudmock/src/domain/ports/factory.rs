//! Fixture engine port

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::entities::MockRequestDescriptor;
use crate::domain::ports::RecordStore;
use crate::error::FactoryError;

/// Builds fixture payloads from named definitions
#[async_trait]
pub trait FixtureFactory: Send + Sync {
    /// Model type a fixture name builds, e.g. `admin` -> `user`
    async fn lookup_model_for_fixture_name(&self, name: &str) -> Result<String, FactoryError>;

    /// Build one payload from the descriptor's fixture, traits and options
    async fn build(&self, request: &MockRequestDescriptor)
        -> Result<Map<String, Value>, FactoryError>;

    /// Build `count` payloads; each gets its own id and sequence values
    async fn build_list(
        &self,
        request: &MockRequestDescriptor,
        count: usize,
    ) -> Result<Vec<Map<String, Value>>, FactoryError>;

    /// Reset id and sequence counters and unload the store
    async fn reset_models(&self, store: &dyn RecordStore) -> Result<(), FactoryError>;
}
