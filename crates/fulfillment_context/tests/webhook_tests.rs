//! Tests for webhook request extraction and response assembly

use fulfillment_context::{ContextConfig, OutputPolicy, WebhookRequest, WebhookResponse};
use serde_json::json;

fn sample_request() -> serde_json::Value {
    json!({
        "responseId": "b4f1e5a0-0000",
        "session": "projects/pizza/agent/sessions/abc",
        "queryResult": {
            "queryText": "large please",
            "languageCode": "en",
            "intent": { "displayName": "order.size" },
            "parameters": { "size": "large" },
            "outputContexts": [
                {
                    "name": "projects/pizza/agent/sessions/abc/contexts/order",
                    "lifespanCount": 4,
                    "parameters": { "size": "large" }
                },
                {
                    "name": "projects/pizza/agent/sessions/abc/contexts/__system_counters__",
                    "parameters": { "no-input": 0.0 }
                }
            ]
        },
        "originalDetectIntentRequest": { "source": "DIALOGFLOW_CONSOLE" }
    })
}

#[test]
fn test_request_extracts_session_and_contexts() {
    let request = WebhookRequest::from_value(&sample_request()).unwrap();

    assert_eq!(request.session, "projects/pizza/agent/sessions/abc");
    assert_eq!(request.contexts().len(), 2);

    let store = request.into_store();
    assert_eq!(store.session(), "projects/pizza/agent/sessions/abc");
    assert_eq!(store.get("order").unwrap().lifespan_count, Some(4));
    assert!(store.get("__system_counters__").unwrap().lifespan_count.is_none());
}

#[test]
fn test_handler_round_trip() {
    let request = WebhookRequest::from_json(&sample_request().to_string()).unwrap();
    let mut store = request.into_store();

    store.delete("order");
    store.set("awaiting-confirmation", Some(2), None);

    let response = WebhookResponse::from_store(&store, &ContextConfig::default());
    assert_eq!(
        response.to_value(),
        json!({
            "outputContexts": [
                {
                    "name": "projects/pizza/agent/sessions/abc/contexts/order",
                    "lifespanCount": 0,
                    "parameters": { "size": "large" }
                },
                {
                    "name": "projects/pizza/agent/sessions/abc/contexts/__system_counters__",
                    "parameters": { "no-input": 0.0 }
                },
                {
                    "name": "projects/pizza/agent/sessions/abc/contexts/awaiting-confirmation",
                    "lifespanCount": 2
                }
            ]
        })
    );
}

#[test]
fn test_default_policy_skips_output_without_inbound_contexts() {
    let request = WebhookRequest::from_value(&json!({
        "session": "projects/pizza/agent/sessions/abc",
        "queryResult": { "queryText": "hi" }
    }))
    .unwrap();
    let mut store = request.into_store();
    store.set("greeted", Some(3), None);

    let response = WebhookResponse::from_store(&store, &ContextConfig::default());
    assert!(response.output_contexts.is_none());
    assert_eq!(response.to_value(), json!({}));
}

#[test]
fn test_always_policy_emits_created_contexts() {
    let request = WebhookRequest::from_value(&json!({
        "session": "projects/pizza/agent/sessions/abc",
        "queryResult": {}
    }))
    .unwrap();
    let mut store = request.into_store();

    let config = ContextConfig {
        output_policy: OutputPolicy::Always,
    };
    assert!(WebhookResponse::from_store(&store, &config).output_contexts.is_none());

    store.set("greeted", Some(3), None);
    let response = WebhookResponse::from_store(&store, &config);
    let contexts = response.output_contexts.expect("output contexts");
    assert_eq!(contexts.len(), 1);
    assert_eq!(
        contexts[0].name,
        "projects/pizza/agent/sessions/abc/contexts/greeted"
    );
}

#[test]
fn test_malformed_context_list_is_invalid_request() {
    let result = WebhookRequest::from_value(&json!({
        "session": "projects/pizza/agent/sessions/abc",
        "queryResult": { "outputContexts": [{ "lifespanCount": 1 }] }
    }));
    assert!(result.is_err());
}
