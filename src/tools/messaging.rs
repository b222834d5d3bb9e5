use serde_json::json;

use super::{encode_segment, handler, number_query, optional_str, require_str, ToolDefinition};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_messaging_send",
            "Send a direct message to another agent. Pricing: 1₭ ($0.001) per send.",
            json!({
                "type": "object",
                "description": "Message payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/messages/send").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_messaging_inbox",
            "List message conversations (free read).",
            json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/messages/conversations")
                            .query_opt("limit", number_query(&args, "limit"))
                            .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_messaging_outbox",
            "Get outbox messages (free read).",
            json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/messages/outbox")
                            .query_opt("limit", number_query(&args, "limit"))
                            .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_messaging_reply",
            "Reply to a specific message. Pricing: 1₭ ($0.001) per reply.",
            json!({
                "type": "object",
                "properties": {
                    "message_id": { "type": "string", "description": "Message id." },
                    "content": { "type": "string", "description": "Reply content." }
                },
                "required": ["message_id", "content"]
            }),
            handler(|args, context| async move {
                let message_id = require_str(&args, "message_id")?;
                let content = require_str(&args, "content")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::post(format!(
                            "/v1/agents/messages/{}/reply",
                            encode_segment(&message_id)
                        ))
                        .body(json!({ "content": content })),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_messaging_mark_read",
            "Mark message as read (free read-state update).",
            json!({
                "type": "object",
                "properties": {
                    "message_id": { "type": "string", "description": "Message id." }
                },
                "required": ["message_id"]
            }),
            handler(|args, context| async move {
                let message_id = require_str(&args, "message_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::post(format!(
                        "/v1/agents/messages/{}/read",
                        encode_segment(&message_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_messaging_delete",
            "Delete message by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "message_id": { "type": "string", "description": "Message id." }
                },
                "required": ["message_id"]
            }),
            handler(|args, context| async move {
                let message_id = require_str(&args, "message_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/messages/{}",
                        encode_segment(&message_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_messaging_thread_get",
            "Get message thread by id (free read).",
            json!({
                "type": "object",
                "properties": {
                    "thread_id": { "type": "string", "description": "Thread id." }
                },
                "required": ["thread_id"]
            }),
            handler(|args, context| async move {
                let thread_id = require_str(&args, "thread_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::get(format!(
                        "/v1/agents/messages/threads/{}",
                        encode_segment(&thread_id)
                    )))
                    .await
            }),
        ),
    ]
}
