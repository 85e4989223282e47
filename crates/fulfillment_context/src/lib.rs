//! `fulfillment_context` manages the conversation contexts that a webhook
//! fulfillment handler receives from the agent platform and sends back.
//!
//! A [`ContextStore`] is built per inbound request, mutated while the intent
//! handler runs, and drained once into the outbound `outputContexts` list.

pub mod config;
pub mod error;
pub mod structs;
pub mod webhook;

pub use config::{ContextConfig, OutputPolicy};
pub use error::{ContextError, Result};
pub use structs::context::Context;
pub use structs::name::{qualify_name, short_name};
pub use structs::store::ContextStore;
pub use webhook::{WebhookRequest, WebhookResponse};
