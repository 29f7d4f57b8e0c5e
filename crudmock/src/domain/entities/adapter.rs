//! Store adapter settings and the URL rules they imply

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::inflection::{camelize, pluralize, underscore};

/// Key casing an API uses for payload attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// `firstName` - plain REST/JSON APIs
    CamelCase,
    /// `first_name` - ActiveModel-style APIs
    SnakeCase,
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingConvention::CamelCase => write!(f, "camel"),
            NamingConvention::SnakeCase => write!(f, "snake"),
        }
    }
}

impl std::str::FromStr for NamingConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "camel" | "camelcase" | "camel_case" | "rest" => Ok(NamingConvention::CamelCase),
            "snake" | "snakecase" | "snake_case" | "active_model" => {
                Ok(NamingConvention::SnakeCase)
            }
            _ => Err(format!("Unknown naming convention: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    Rest,
    ActiveModel,
    /// Records live in the store's fixture table, nothing goes over the wire
    Fixture,
}

/// How the store talks to its (mocked) backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreAdapter {
    pub kind: AdapterKind,
    pub host: Option<String>,
    pub namespace: Option<String>,
    pub simulate_remote_response: bool,
}

impl StoreAdapter {
    pub fn new(kind: AdapterKind) -> Self {
        Self {
            kind,
            host: None,
            namespace: None,
            simulate_remote_response: true,
        }
    }

    pub fn rest() -> Self {
        Self::new(AdapterKind::Rest)
    }

    pub fn active_model() -> Self {
        Self::new(AdapterKind::ActiveModel)
    }

    pub fn fixture() -> Self {
        Self {
            simulate_remote_response: false,
            ..Self::new(AdapterKind::Fixture)
        }
    }

    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    /// Resource path segment for a model type: `users`, `project_users`
    pub fn path_for_type(&self, model_type: &str) -> String {
        match self.kind {
            AdapterKind::ActiveModel => pluralize(&underscore(model_type)),
            AdapterKind::Rest | AdapterKind::Fixture => pluralize(&camelize(model_type)),
        }
    }

    /// `[host]/[namespace]/<path>[/<id>]`, rooted at `/` when there is no host
    pub fn build_url(&self, model_type: &str, id: Option<&str>) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            parts.push(host.to_string());
        }
        if let Some(namespace) = self.namespace.as_deref().filter(|n| !n.is_empty()) {
            parts.push(namespace.to_string());
        }
        parts.push(self.path_for_type(model_type));
        if let Some(id) = id {
            parts.push(urlencoding::encode(id).into_owned());
        }

        let url = parts.join("/");
        if self.host.as_deref().map_or(true, str::is_empty) {
            format!("/{}", url)
        } else {
            url
        }
    }
}
