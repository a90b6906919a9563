//! Render context handed to the template engine

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Variables available to a template render
///
/// Keys are kept sorted so a given spec always produces the same context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    pub variables: BTreeMap<String, JsonValue>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the render context
    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value);
    }

    /// Check if a variable exists
    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    /// Convert into the Tera representation
    pub fn to_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(key.as_str(), value);
        }
        context
    }
}
