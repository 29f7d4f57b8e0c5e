use serde_json::{Map, Value};

/// A normalized request for a mock: which fixture to build and how
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequestDescriptor {
    pub fixture_name: String,
    /// Trait names in the order the caller gave them
    pub traits: Vec<String>,
    /// Attribute overrides applied last
    pub options: Map<String, Value>,
    pub succeed: bool,
    /// Number of records to build; only set for list requests
    pub count: Option<usize>,
}

impl MockRequestDescriptor {
    pub fn new(fixture_name: &str) -> Self {
        Self {
            fixture_name: fixture_name.to_string(),
            traits: Vec::new(),
            options: Map::new(),
            succeed: true,
            count: None,
        }
    }

    pub fn with_traits(mut self, traits: &[&str]) -> Self {
        self.traits = traits.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    pub fn with_succeed(mut self, succeed: bool) -> Self {
        self.succeed = succeed;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}
