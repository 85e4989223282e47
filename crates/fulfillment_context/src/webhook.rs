//! Extraction of the context list from an inbound webhook request and
//! assembly of the outbound `outputContexts` payload.
//!
//! Only `session` and `queryResult.outputContexts` are read; every other field
//! of the request belongs to the transport layer and is ignored here.

use serde::{Deserialize, Serialize};

use crate::config::{ContextConfig, OutputPolicy};
use crate::error::{ContextError, Result};
use crate::structs::context::Context;
use crate::structs::store::ContextStore;

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// e.g. `projects/{project}/agent/sessions/{session}`
    pub session: String,

    #[serde(default)]
    pub query_result: QueryResult,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub output_contexts: Vec<Context>,
}

impl WebhookRequest {
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ContextError::InvalidRequest(
                "request must be a JSON object".to_string(),
            ));
        }
        Self::deserialize(value).map_err(|e| ContextError::InvalidRequest(e.to_string()))
    }

    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| ContextError::InvalidRequest(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn contexts(&self) -> &[Context] {
        &self.query_result.output_contexts
    }

    pub fn into_store(self) -> ContextStore {
        ContextStore::new(self.query_result.output_contexts, self.session)
    }
}

/// The context-bearing part of the webhook response.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_contexts: Option<Vec<Context>>,
}

impl WebhookResponse {
    /// Renders the store according to the configured [`OutputPolicy`].
    pub fn from_store(store: &ContextStore, config: &ContextConfig) -> Self {
        let emit = match config.output_policy {
            OutputPolicy::WhenInboundPresent => !store.input_contexts().is_empty(),
            OutputPolicy::Always => !store.is_empty(),
        };

        tracing::debug!(
            session = %store.session(),
            policy = ?config.output_policy,
            emit,
            "WebhookResponse: assembling output contexts"
        );

        Self {
            output_contexts: emit.then(|| store.output_contexts()),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}
