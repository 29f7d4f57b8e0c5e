//! Mock endpoint entities
//!
//! A `MockEndpoint` is one canned request/response pair. It serializes to the
//! descriptor shape interception layers expect:
//! `{url, dataType: "json", responseText, type, status, data?}`.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(format!("Unsupported HTTP method: {}", s)),
        }
    }
}

/// Restricts a stub to requests whose body fits
#[derive(Clone)]
pub enum RequestBodyMatcher {
    /// Every key of the expected object must be present with an equal value.
    /// Non-object expectations compare the whole body.
    Partial(Value),
    Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl RequestBodyMatcher {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        RequestBodyMatcher::Predicate(Arc::new(f))
    }

    pub fn matches(&self, body: Option<&Value>) -> bool {
        let Some(body) = body else {
            return false;
        };

        match self {
            RequestBodyMatcher::Partial(Value::Object(expected)) => match body {
                Value::Object(actual) => expected
                    .iter()
                    .all(|(key, value)| actual.get(key) == Some(value)),
                _ => false,
            },
            RequestBodyMatcher::Partial(expected) => expected == body,
            RequestBodyMatcher::Predicate(f) => f(body),
        }
    }
}

impl fmt::Debug for RequestBodyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBodyMatcher::Partial(value) => f.debug_tuple("Partial").field(value).finish(),
            RequestBodyMatcher::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl Serialize for RequestBodyMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RequestBodyMatcher::Partial(value) => value.serialize(serializer),
            RequestBodyMatcher::Predicate(_) => serializer.serialize_str("<predicate>"),
        }
    }
}

/// Per-stub knobs for `register_stub`
#[derive(Debug, Clone)]
pub struct StubOptions {
    pub method: HttpMethod,
    pub status: u16,
    pub request_body: Option<RequestBodyMatcher>,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            status: 200,
            request_body: None,
        }
    }
}

impl StubOptions {
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_request_body(mut self, matcher: RequestBodyMatcher) -> Self {
        self.request_body = Some(matcher);
        self
    }
}

/// A canned response for one (url, method) pair
#[derive(Debug, Clone)]
pub struct MockEndpoint {
    pub url: String,
    pub http_method: HttpMethod,
    pub status: u16,
    pub response_body: Value,
    pub request_body_matcher: Option<RequestBodyMatcher>,
}

impl MockEndpoint {
    pub fn new(url: &str, response_body: Value, options: StubOptions) -> Self {
        Self {
            url: url.to_string(),
            http_method: options.method,
            status: options.status,
            response_body,
            request_body_matcher: options.request_body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Two stubs on the same route replace each other
    pub fn same_route(&self, other: &MockEndpoint) -> bool {
        self.url == other.url && self.http_method == other.http_method
    }

    pub fn matches(&self, method: HttpMethod, url: &str, body: Option<&Value>) -> bool {
        if self.http_method != method || self.url != url {
            return false;
        }
        match &self.request_body_matcher {
            Some(matcher) => matcher.matches(body),
            None => true,
        }
    }
}

impl Serialize for MockEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.request_body_matcher.is_some() { 6 } else { 5 };
        let mut state = serializer.serialize_struct("MockEndpoint", len)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("dataType", "json")?;
        state.serialize_field("responseText", &self.response_body)?;
        state.serialize_field("type", &self.http_method)?;
        state.serialize_field("status", &self.status)?;
        if let Some(matcher) = &self.request_body_matcher {
            state.serialize_field("data", matcher)?;
        }
        state.end()
    }
}
