use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const OUTPUT_POLICY_ENV: &str = "FULFILLMENT_OUTPUT_POLICY";

/// When a response carries `outputContexts`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPolicy {
    /// Only when the request arrived with at least one active context.
    #[default]
    WhenInboundPresent,
    /// Whenever the store holds a context, including ones created by the handler.
    Always,
}

impl OutputPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "when_inbound_present" => Some(OutputPolicy::WhenInboundPresent),
            "always" => Some(OutputPolicy::Always),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default)]
    pub output_policy: OutputPolicy,
}

impl ContextConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str::<ContextConfig>(content)?)
    }

    /// Reads a TOML config file. Missing keys fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded context config from {}", path.display());
        Ok(config)
    }

    /// Applies `FULFILLMENT_OUTPUT_POLICY` when it is set to a known value.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(OUTPUT_POLICY_ENV) {
            Ok(value) => self.with_policy_override(&value),
            Err(_) => self,
        }
    }

    fn with_policy_override(mut self, value: &str) -> Self {
        match OutputPolicy::parse(value) {
            Some(policy) => self.output_policy = policy,
            None => log::warn!("Ignoring unknown {OUTPUT_POLICY_ENV} value: {value}"),
        }
        self
    }
}
