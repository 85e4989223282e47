use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single conversation context as exchanged with the agent platform.
///
/// `lifespan_count` and `parameters` keep absence distinct from an explicit
/// zero or empty map; both are dropped from the JSON form when absent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub name: String,

    /// Remaining turns before the platform drops the context. `Some(0)` expires it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan_count: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, serde_json::Value>>,
}

impl Context {
    /// A context holding only its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifespan_count: None,
            parameters: None,
        }
    }

    pub fn with_lifespan(mut self, lifespan_count: i32) -> Self {
        self.lifespan_count = Some(lifespan_count);
        self
    }

    pub fn with_parameters(mut self, parameters: HashMap<String, serde_json::Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Active unless a lifespan has been set and has run out.
    pub fn is_active(&self) -> bool {
        self.lifespan_count.map_or(true, |count| count > 0)
    }

    pub fn is_expired(&self) -> bool {
        !self.is_active()
    }

    /// Looks up a single parameter value.
    pub fn parameter(&self, key: &str) -> Option<&serde_json::Value> {
        self.parameters.as_ref().and_then(|params| params.get(key))
    }
}
