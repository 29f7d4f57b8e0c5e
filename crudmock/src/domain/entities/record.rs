//! Records held by the store and fixtures handed back to tests

use serde::Serialize;
use serde_json::{Map, Value};

/// Normalizes a JSON id (`1` or `"1"`) to its string form
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A store-managed record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub model_type: String,
    /// Lookup key, the string form of `id_value`
    pub id: String,
    /// The id as it was pushed, `1` or `"1"`
    #[serde(skip)]
    pub id_value: Value,
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Attributes plus `id`, the shape the record was pushed with
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("id".to_string(), self.id_value.clone());
        for (key, value) in &self.attributes {
            payload.insert(key.clone(), value.clone());
        }
        payload
    }
}

/// What a fixture build hands back: plain JSON (fixture adapter) or a record
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureRecord {
    Json(Map<String, Value>),
    Record(Record),
}

impl FixtureRecord {
    pub fn id(&self) -> Option<String> {
        match self {
            FixtureRecord::Json(map) => map.get("id").and_then(id_from_value),
            FixtureRecord::Record(record) => Some(record.id.clone()),
        }
    }

    pub fn to_payload(&self) -> Map<String, Value> {
        match self {
            FixtureRecord::Json(map) => map.clone(),
            FixtureRecord::Record(record) => record.to_payload(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FixtureRecord::Record(record) => Some(record),
            FixtureRecord::Json(_) => None,
        }
    }
}
