use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, optional_bool, optional_str, optional_string_array,
    require_str, require_string_array, ToolDefinition,
};
use crate::http::RequestSpec;

const WEBHOOK_EVENTS: [&str; 8] = [
    "message.received",
    "payment.received",
    "follow",
    "mention",
    "email.received",
    "feature.voted",
    "hire.requested",
    "hire.completed",
];

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_webhook_register",
            "Register a webhook endpoint for agent events (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "url": { "type": "string", "description": "Webhook URL." },
                    "events": {
                        "type": "array",
                        "description": "Events to subscribe to.",
                        "items": { "type": "string", "enum": WEBHOOK_EVENTS }
                    },
                    "secret": { "type": "string", "description": "Optional webhook signature secret." }
                },
                "required": ["url", "events"]
            }),
            handler(|args, context| async move {
                let url = require_str(&args, "url")?;
                let events = require_string_array(&args, "events")?;

                let mut body = Map::new();
                body.insert("url".to_string(), Value::String(url));
                body.insert(
                    "events".to_string(),
                    Value::Array(events.into_iter().map(Value::String).collect()),
                );
                insert_opt(
                    &mut body,
                    "secret",
                    optional_str(&args, "secret").map(Value::String),
                );
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/webhooks").body(Value::Object(body)))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_webhook_list",
            "List all configured webhooks for the authenticated agent (free read).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/webhooks"))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_webhook_update",
            "Update a webhook endpoint by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "webhook_id": { "type": "string", "description": "Webhook id." },
                    "url": { "type": "string", "description": "Webhook URL." },
                    "events": {
                        "type": "array",
                        "description": "Events to subscribe to.",
                        "items": { "type": "string", "enum": WEBHOOK_EVENTS }
                    },
                    "active": { "type": "boolean", "description": "Set webhook active state." }
                },
                "required": ["webhook_id"]
            }),
            handler(|args, context| async move {
                let webhook_id = require_str(&args, "webhook_id")?;
                let events = optional_string_array(&args, "events")?;

                let mut body = Map::new();
                insert_opt(&mut body, "url", optional_str(&args, "url").map(Value::String));
                insert_opt(
                    &mut body,
                    "events",
                    events.map(|events| Value::Array(events.into_iter().map(Value::String).collect())),
                );
                insert_opt(
                    &mut body,
                    "active",
                    optional_bool(&args, "active").map(Value::Bool),
                );
                context
                    .client
                    .execute_raw(
                        RequestSpec::put(format!(
                            "/v1/agents/webhooks/{}",
                            encode_segment(&webhook_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_webhook_delete",
            "Delete a webhook endpoint by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "webhook_id": { "type": "string", "description": "Webhook id." }
                },
                "required": ["webhook_id"]
            }),
            handler(|args, context| async move {
                let webhook_id = require_str(&args, "webhook_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/webhooks/{}",
                        encode_segment(&webhook_id)
                    )))
                    .await
            }),
        ),
    ]
}
