//! In-memory record store
//!
//! Holds records per model type, a fixture table for fixture-adapter mode,
//! and the adapter/serializer settings URL building and key casing read.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::config::HarnessConfig;
use crate::domain::entities::{
    id_from_value, AdapterKind, NamingConvention, Record, StoreAdapter,
};
use crate::domain::ports::RecordStore;
use crate::error::StoreError;
use crate::inflection::{camelize, pluralize, singularize};

pub struct InMemoryStore {
    records: RwLock<HashMap<String, BTreeMap<String, Record>>>,
    fixtures: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
    /// Adapter the store was built with, restored by `reset_adapters`
    configured_adapter: StoreAdapter,
    application_adapter: RwLock<StoreAdapter>,
    adapters: RwLock<HashMap<String, StoreAdapter>>,
    default_naming: NamingConvention,
    serializers: RwLock<HashMap<String, NamingConvention>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            fixtures: RwLock::new(HashMap::new()),
            configured_adapter: StoreAdapter::rest(),
            application_adapter: RwLock::new(StoreAdapter::rest()),
            adapters: RwLock::new(HashMap::new()),
            default_naming: NamingConvention::CamelCase,
            serializers: RwLock::new(HashMap::new()),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snake-case APIs get an ActiveModel adapter, everything else REST
    pub fn from_config(config: &HarnessConfig) -> Self {
        let adapter = match config.naming {
            NamingConvention::SnakeCase => StoreAdapter::active_model(),
            NamingConvention::CamelCase => StoreAdapter::rest(),
        }
        .with_host(config.api_host.clone())
        .with_namespace(config.api_namespace.clone());

        Self {
            configured_adapter: adapter.clone(),
            application_adapter: RwLock::new(adapter),
            default_naming: config.naming,
            ..Self::default()
        }
    }

    /// Use a specific serializer casing for one model type
    pub fn with_serializer(self, model_type: &str, naming: NamingConvention) -> Self {
        self.serializers
            .write()
            .insert(normalize_type(model_type), naming);
        self
    }

    /// Serve one model type through its own adapter
    pub fn with_adapter(self, model_type: &str, adapter: StoreAdapter) -> Self {
        self.adapters
            .write()
            .insert(normalize_type(model_type), adapter);
        self
    }

    /// Pre-populate with a record for testing
    pub fn with_record(self, model_type: &str, payload: Value) -> Result<Self, StoreError> {
        match payload {
            Value::Object(map) => {
                self.push_record(model_type, map)?;
                Ok(self)
            }
            other => Err(StoreError::InvalidPayload(format!(
                "expected an object for '{}', got {}",
                model_type, other
            ))),
        }
    }

    /// Every loaded record of a type, ordered by id
    pub fn all(&self, model_type: &str) -> Vec<Record> {
        self.records
            .read()
            .get(&normalize_type(model_type))
            .map(|by_id| by_id.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn record_count(&self, model_type: &str) -> usize {
        self.records
            .read()
            .get(&normalize_type(model_type))
            .map_or(0, BTreeMap::len)
    }

    /// Records across all types
    pub fn len(&self) -> usize {
        self.records.read().values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.fixtures.read().values().all(Vec::is_empty)
    }

    fn naming_for(&self, model_type: &str) -> NamingConvention {
        self.serializers
            .read()
            .get(&normalize_type(model_type))
            .copied()
            .unwrap_or(self.default_naming)
    }

    fn adapter_for_type(&self, model_type: &str) -> StoreAdapter {
        self.adapters
            .read()
            .get(&normalize_type(model_type))
            .cloned()
            .unwrap_or_else(|| self.application_adapter.read().clone())
    }

    fn push_record(
        &self,
        model_type: &str,
        mut payload: Map<String, Value>,
    ) -> Result<Record, StoreError> {
        let model_type = normalize_type(model_type);
        let id_value = payload.remove("id").unwrap_or(Value::Null);
        let id = id_from_value(&id_value)
            .ok_or_else(|| StoreError::MissingId(model_type.clone()))?;

        let mut records = self.records.write();
        let by_id = records.entry(model_type.clone()).or_default();
        let record = by_id.entry(id.clone()).or_insert_with(|| Record {
            model_type: model_type.clone(),
            id: id.clone(),
            id_value,
            attributes: Map::new(),
        });
        // Pushing an already-loaded record updates it in place
        record.attributes.extend(payload);

        tracing::debug!(model_type = %model_type, id = %id, "pushed record");
        Ok(record.clone())
    }

    fn find_fixture(&self, model_type: &str, id: &str) -> Option<Map<String, Value>> {
        self.fixtures
            .read()
            .get(model_type)?
            .iter()
            .find(|fixture| fixture.get("id").and_then(id_from_value).as_deref() == Some(id))
            .cloned()
    }

    /// Model type an envelope key names. The requested type matches its own
    /// singular or plural key exactly; any other key is singularized.
    fn envelope_key_type(model_type: &str, key: &str) -> String {
        let model_type = normalize_type(model_type);
        let key = camelize(key);
        if key == model_type || key == pluralize(&model_type) {
            model_type
        } else {
            singularize(&key)
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find(&self, model_type: &str, id: &str) -> Result<Record, StoreError> {
        let model_type = normalize_type(model_type);
        let loaded = self
            .records
            .read()
            .get(&model_type)
            .and_then(|by_id| by_id.get(id))
            .cloned();
        if let Some(record) = loaded {
            return Ok(record);
        }

        if self.adapter_for_type(&model_type).kind == AdapterKind::Fixture {
            if let Some(fixture) = self.find_fixture(&model_type, id) {
                return self.push_record(&model_type, fixture);
            }
        }

        Err(StoreError::NotFound {
            model_type,
            id: id.to_string(),
        })
    }

    async fn push(
        &self,
        model_type: &str,
        payload: Map<String, Value>,
    ) -> Result<Record, StoreError> {
        self.push_record(model_type, payload)
    }

    async fn push_payload(
        &self,
        model_type: &str,
        payload: Value,
    ) -> Result<Vec<Record>, StoreError> {
        let Value::Object(envelope) = payload else {
            return Err(StoreError::InvalidPayload(format!(
                "payload for '{}' must be an object keyed by type",
                model_type
            )));
        };
        let naming = self.naming_for(model_type);

        let mut pushed = Vec::new();
        for (key, value) in envelope {
            let key_type = Self::envelope_key_type(model_type, &key);
            let items = match value {
                Value::Object(item) => vec![item],
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(item) => Ok(item),
                        other => Err(StoreError::InvalidPayload(format!(
                            "'{}' holds a non-object entry: {}",
                            key, other
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => {
                    return Err(StoreError::InvalidPayload(format!(
                        "'{}' must hold an object or an array, got {}",
                        key, other
                    )))
                }
            };

            for item in items {
                let item = match naming {
                    NamingConvention::SnakeCase => camelize_keys(item),
                    NamingConvention::CamelCase => item,
                };
                pushed.push(self.push_record(&key_type, item)?);
            }
        }

        Ok(pushed)
    }

    async fn adapter_for(&self, model_type: &str) -> StoreAdapter {
        self.adapter_for_type(model_type)
    }

    async fn serializer_for(&self, model_type: &str) -> NamingConvention {
        self.naming_for(model_type)
    }

    async fn load_fixture(&self, model_type: &str, fixture: Map<String, Value>) {
        let model_type = normalize_type(model_type);
        tracing::debug!(model_type = %model_type, "loaded fixture");
        self.fixtures
            .write()
            .entry(model_type)
            .or_default()
            .push(fixture);
    }

    async fn fixtures_for(&self, model_type: &str) -> Vec<Map<String, Value>> {
        self.fixtures
            .read()
            .get(&normalize_type(model_type))
            .cloned()
            .unwrap_or_default()
    }

    async fn use_fixture_adapter(&self) {
        let mut adapter = self.application_adapter.write();
        *adapter = StoreAdapter::fixture()
            .with_host(adapter.host.clone())
            .with_namespace(adapter.namespace.clone());
    }

    async fn unload_all(&self) {
        self.records.write().clear();
        self.fixtures.write().clear();
    }

    async fn reset_adapters(&self) {
        *self.application_adapter.write() = self.configured_adapter.clone();
    }
}

fn normalize_type(model_type: &str) -> String {
    camelize(model_type)
}

fn camelize_keys(payload: Map<String, Value>) -> Map<String, Value> {
    payload
        .into_iter()
        .map(|(key, value)| (camelize(&key), value))
        .collect()
}
