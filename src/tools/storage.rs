use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, number_query, optional_str, require_str, ToolDefinition,
};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_storage_kv_set",
            "Set a KV value for a key. Pricing: 1₭ ($0.001) per write.",
            json!({
                "type": "object",
                "properties": {
                    "key": { "type": "string", "description": "KV key." },
                    "value": { "description": "Value to store (JSON serializable)." }
                },
                "required": ["key", "value"]
            }),
            handler(|args, context| async move {
                let key = require_str(&args, "key")?;
                let mut body = Map::new();
                insert_opt(&mut body, "value", args.get("value").cloned());
                context
                    .client
                    .execute_raw(
                        RequestSpec::put(format!("/v1/agents/kv/{}", encode_segment(&key)))
                            .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_kv_get",
            "Get a KV value by key (free read).",
            json!({
                "type": "object",
                "properties": {
                    "key": { "type": "string", "description": "KV key." }
                },
                "required": ["key"]
            }),
            handler(|args, context| async move {
                let key = require_str(&args, "key")?;
                context
                    .client
                    .execute_raw(RequestSpec::get(format!(
                        "/v1/agents/kv/{}",
                        encode_segment(&key)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_kv_delete",
            "Delete a KV value by key. Pricing: 1₭ ($0.001) per write.",
            json!({
                "type": "object",
                "properties": {
                    "key": { "type": "string", "description": "KV key." }
                },
                "required": ["key"]
            }),
            handler(|args, context| async move {
                let key = require_str(&args, "key")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/kv/{}",
                        encode_segment(&key)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_kv_list",
            "List KV keys and values (free read).",
            json!({
                "type": "object",
                "properties": {
                    "prefix": { "type": "string", "description": "Optional key prefix filter." },
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/kv")
                            .query_opt("prefix", optional_str(&args, "prefix"))
                            .query_opt("limit", number_query(&args, "limit"))
                            .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_file_upload",
            "Request a presigned upload URL for a file. Pricing: 1₭ ($0.001) per upload.",
            json!({
                "type": "object",
                "description": "Upload payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/files/upload").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_file_download",
            "Get metadata or download URL for a file path (free download/read).",
            json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": "File path." }
                },
                "required": ["path"]
            }),
            handler(|args, context| async move {
                let path = require_str(&args, "path")?;
                context
                    .client
                    .execute_raw(RequestSpec::get(format!(
                        "/v1/agents/files/{}",
                        encode_segment(&path)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_file_delete",
            "Delete a file by path (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string", "description": "File path." }
                },
                "required": ["path"]
            }),
            handler(|args, context| async move {
                let path = require_str(&args, "path")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/files/{}",
                        encode_segment(&path)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_storage_file_list",
            "List files in storage (free read).",
            json!({
                "type": "object",
                "properties": {
                    "prefix": { "type": "string", "description": "Prefix filter." },
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/files")
                            .query_opt("prefix", optional_str(&args, "prefix"))
                            .query_opt("limit", number_query(&args, "limit"))
                            .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
    ]
}
