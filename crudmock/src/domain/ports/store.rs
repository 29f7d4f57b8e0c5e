//! Record store port

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::entities::{NamingConvention, Record, StoreAdapter};
use crate::error::StoreError;

/// Client-side record store the code under test reads from
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find a loaded record
    async fn find(&self, model_type: &str, id: &str) -> Result<Record, StoreError>;

    /// Load (or update) a single record; the payload must carry an `id`
    async fn push(&self, model_type: &str, payload: Map<String, Value>)
        -> Result<Record, StoreError>;

    /// Load every record of a type-keyed envelope, normalizing key casing
    async fn push_payload(&self, model_type: &str, payload: Value)
        -> Result<Vec<Record>, StoreError>;

    /// Adapter serving a model type
    async fn adapter_for(&self, model_type: &str) -> StoreAdapter;

    /// Key casing of the serializer for a model type
    async fn serializer_for(&self, model_type: &str) -> NamingConvention;

    /// Add a raw fixture to the fixture-adapter table
    async fn load_fixture(&self, model_type: &str, fixture: Map<String, Value>);

    /// Fixtures loaded for a model type
    async fn fixtures_for(&self, model_type: &str) -> Vec<Map<String, Value>>;

    /// Switch the application adapter to fixtures, no remote responses
    async fn use_fixture_adapter(&self);

    /// Drop every loaded record and fixture
    async fn unload_all(&self);

    /// Put back the application adapter the store was configured with
    async fn reset_adapters(&self);
}
