//! Response body shaping
//!
//! Snake-case APIs get their fixture keys de-camelized. Only top-level keys
//! are rewritten; nested objects and arrays pass through untouched.

use serde_json::{Map, Value};

use crate::domain::entities::{FixtureRecord, NamingConvention};
use crate::inflection::decamelize;

/// Rename each top-level key whose de-camelized form differs
pub fn to_snake_case(fixture: Map<String, Value>) -> Map<String, Value> {
    let mut shaped = Map::new();
    for (key, value) in fixture {
        let snake = decamelize(&key);
        if snake != key {
            shaped.insert(snake, value);
        } else {
            shaped.insert(key, value);
        }
    }
    shaped
}

/// `{ <model_type>: payload }`
pub fn envelope(model_type: &str, payload: Value) -> Value {
    let mut wrapped = Map::new();
    wrapped.insert(model_type.to_string(), payload);
    Value::Object(wrapped)
}

/// The single-resource body an API client expects for `fixture`
pub fn shape(model_type: &str, naming: NamingConvention, fixture: &FixtureRecord) -> Value {
    let payload = fixture.to_payload();
    let payload = match naming {
        NamingConvention::SnakeCase => to_snake_case(payload),
        NamingConvention::CamelCase => payload,
    };
    envelope(model_type, Value::Object(payload))
}
