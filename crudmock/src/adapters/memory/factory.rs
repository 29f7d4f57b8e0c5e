//! In-memory fixture engine
//!
//! Fixtures are defined per model type with default attributes, named
//! variations, traits and sequences. A build layers them in order:
//! sequences, defaults, the named fixture, each trait, then caller options.
//! Payloads without an `id` get the next per-model id.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::domain::entities::MockRequestDescriptor;
use crate::domain::ports::{FixtureFactory, RecordStore};
use crate::error::FactoryError;

pub type SequenceFn = Arc<dyn Fn(u64) -> Value + Send + Sync>;

/// Fixture definition for one model type
#[derive(Clone)]
pub struct FixtureDefinition {
    model_type: String,
    default: Value,
    named: Vec<(String, Value)>,
    traits: Vec<(String, Value)>,
    sequences: Vec<(String, SequenceFn)>,
}

impl FixtureDefinition {
    pub fn new(model_type: &str) -> Self {
        Self {
            model_type: model_type.to_string(),
            default: Value::Object(Map::new()),
            named: Vec::new(),
            traits: Vec::new(),
            sequences: Vec::new(),
        }
    }

    pub fn defaults(mut self, attributes: Value) -> Self {
        self.default = attributes;
        self
    }

    /// A named variation, buildable by its own fixture name
    pub fn named(mut self, name: &str, attributes: Value) -> Self {
        self.named.push((name.to_string(), attributes));
        self
    }

    pub fn with_trait(mut self, name: &str, attributes: Value) -> Self {
        self.traits.push((name.to_string(), attributes));
        self
    }

    /// A field whose value is generated from a counter starting at 1
    pub fn sequence<F>(mut self, field: &str, f: F) -> Self
    where
        F: Fn(u64) -> Value + Send + Sync + 'static,
    {
        self.sequences.push((field.to_string(), Arc::new(f)));
        self
    }
}

struct Definition {
    default: Map<String, Value>,
    named: HashMap<String, Map<String, Value>>,
    traits: HashMap<String, Map<String, Value>>,
    sequences: Vec<(String, SequenceFn)>,
}

#[derive(Default)]
pub struct FixtureRegistry {
    definitions: RwLock<HashMap<String, Definition>>,
    /// fixture name -> model type
    fixture_models: RwLock<HashMap<String, String>>,
    next_ids: RwLock<HashMap<String, u64>>,
    sequence_counters: RwLock<HashMap<(String, String), u64>>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition; its model type and named fixtures become buildable
    pub fn define(&self, definition: FixtureDefinition) -> Result<(), FactoryError> {
        let model_type = definition.model_type;
        let default = into_attributes(&model_type, definition.default)?;
        let named = definition
            .named
            .into_iter()
            .map(|(name, attrs)| into_attributes(&name, attrs).map(|attrs| (name, attrs)))
            .collect::<Result<HashMap<_, _>, FactoryError>>()?;
        let traits = definition
            .traits
            .into_iter()
            .map(|(name, attrs)| into_attributes(&name, attrs).map(|attrs| (name, attrs)))
            .collect::<Result<HashMap<_, _>, FactoryError>>()?;

        {
            let mut fixture_models = self.fixture_models.write();
            for name in std::iter::once(&model_type).chain(named.keys()) {
                if let Some(previous) = fixture_models.insert(name.clone(), model_type.clone()) {
                    if previous != model_type {
                        tracing::warn!(
                            fixture = %name,
                            previous = %previous,
                            model_type = %model_type,
                            "fixture name redefined for another model"
                        );
                    }
                }
            }
        }

        tracing::debug!(
            model_type = %model_type,
            named = named.len(),
            traits = traits.len(),
            "defined fixture"
        );
        self.definitions.write().insert(
            model_type,
            Definition {
                default,
                named,
                traits,
                sequences: definition.sequences,
            },
        );
        Ok(())
    }

    /// Builder-style `define` for test setup
    pub fn with_definition(self, definition: FixtureDefinition) -> Result<Self, FactoryError> {
        self.define(definition)?;
        Ok(self)
    }

    fn model_for(&self, name: &str) -> Result<String, FactoryError> {
        self.fixture_models
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownFixture(name.to_string()))
    }

    fn next_sequence(&self, model_type: &str, field: &str) -> u64 {
        let mut counters = self.sequence_counters.write();
        let counter = counters
            .entry((model_type.to_string(), field.to_string()))
            .or_insert(0);
        *counter += 1;
        *counter
    }

    fn next_id(&self, model_type: &str) -> u64 {
        let mut ids = self.next_ids.write();
        let id = ids.entry(model_type.to_string()).or_insert(0);
        *id += 1;
        *id
    }

    fn build_one(
        &self,
        model_type: &str,
        request: &MockRequestDescriptor,
    ) -> Result<Map<String, Value>, FactoryError> {
        let definitions = self.definitions.read();
        let definition = definitions
            .get(model_type)
            .ok_or_else(|| FactoryError::UnknownFixture(request.fixture_name.clone()))?;

        let mut payload = Map::new();
        for (field, generate) in &definition.sequences {
            let n = self.next_sequence(model_type, field);
            payload.insert(field.clone(), generate(n));
        }
        payload.extend(definition.default.clone());

        if request.fixture_name != model_type {
            if let Some(named) = definition.named.get(&request.fixture_name) {
                payload.extend(named.clone());
            }
        }

        for name in &request.traits {
            let attrs = definition
                .traits
                .get(name)
                .ok_or_else(|| FactoryError::UnknownTrait {
                    fixture: request.fixture_name.clone(),
                    name: name.clone(),
                })?;
            payload.extend(attrs.clone());
        }

        payload.extend(request.options.clone());

        if !payload.contains_key("id") {
            payload.insert("id".to_string(), Value::from(self.next_id(model_type)));
        }

        Ok(payload)
    }
}

#[async_trait]
impl FixtureFactory for FixtureRegistry {
    async fn lookup_model_for_fixture_name(&self, name: &str) -> Result<String, FactoryError> {
        self.model_for(name)
    }

    async fn build(
        &self,
        request: &MockRequestDescriptor,
    ) -> Result<Map<String, Value>, FactoryError> {
        let model_type = self.model_for(&request.fixture_name)?;
        self.build_one(&model_type, request)
    }

    async fn build_list(
        &self,
        request: &MockRequestDescriptor,
        count: usize,
    ) -> Result<Vec<Map<String, Value>>, FactoryError> {
        let model_type = self.model_for(&request.fixture_name)?;
        (0..count)
            .map(|_| self.build_one(&model_type, request))
            .collect()
    }

    async fn reset_models(&self, store: &dyn RecordStore) -> Result<(), FactoryError> {
        self.next_ids.write().clear();
        self.sequence_counters.write().clear();
        store.unload_all().await;
        tracing::debug!("reset fixture counters and unloaded store");
        Ok(())
    }
}

fn into_attributes(name: &str, value: Value) -> Result<Map<String, Value>, FactoryError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(FactoryError::InvalidAttributes(format!(
            "attributes for '{}' must be an object, got {}",
            name, other
        ))),
    }
}
