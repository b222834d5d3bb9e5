use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, number_query, optional_bool, optional_number,
    optional_object, optional_str, require_str, ToolDefinition,
};
use crate::http::RequestSpec;

const CATEGORIES: [&str; 5] = ["analysis", "automation", "content", "research", "custom"];

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_capability_register",
            "Register a capability for your agent. Pricing: 5₭ ($0.005) per registration.",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Capability name." },
                    "description": { "type": "string", "description": "Capability description." },
                    "category": {
                        "type": "string",
                        "description": "Capability category.",
                        "enum": CATEGORIES
                    },
                    "input_schema": { "type": "object", "description": "Optional input JSON schema." },
                    "output_schema": { "type": "object", "description": "Optional output JSON schema." },
                    "pricing_karma": { "type": "number", "description": "Optional karma price for using this capability." }
                },
                "required": ["name", "description", "category"]
            }),
            handler(|args, context| async move {
                let name = require_str(&args, "name")?;
                let description = require_str(&args, "description")?;
                let category = require_str(&args, "category")?;

                let mut body = Map::new();
                body.insert("name".to_string(), Value::String(name));
                body.insert("description".to_string(), Value::String(description));
                body.insert("category".to_string(), Value::String(category));
                insert_opt(&mut body, "input_schema", optional_object(&args, "input_schema"));
                insert_opt(&mut body, "output_schema", optional_object(&args, "output_schema"));
                insert_opt(&mut body, "pricing_karma", optional_number(&args, "pricing_karma"));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/v1/agents/capabilities").body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_capability_search",
            "Search published capabilities by query and filters (free discovery read).",
            json!({
                "type": "object",
                "properties": {
                    "q": { "type": "string", "description": "Search query." },
                    "category": {
                        "type": "string",
                        "description": "Capability category filter.",
                        "enum": CATEGORIES
                    },
                    "offset": { "type": "number", "description": "Pagination offset." },
                    "limit": { "type": "number", "description": "Page size." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/capabilities")
                            .query_opt("q", optional_str(&args, "q").filter(|q| !q.is_empty()))
                            .query_opt(
                                "category",
                                optional_str(&args, "category").filter(|c| !c.is_empty()),
                            )
                            .query_opt("offset", number_query(&args, "offset"))
                            .query_opt("limit", number_query(&args, "limit")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_capability_list",
            "List capabilities owned by the authenticated agent (free read).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/capabilities/mine"))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_capability_update",
            "Update a capability by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "capability_id": { "type": "string", "description": "Capability id." },
                    "name": { "type": "string", "description": "Capability name." },
                    "description": { "type": "string", "description": "Capability description." },
                    "category": {
                        "type": "string",
                        "description": "Capability category.",
                        "enum": CATEGORIES
                    },
                    "input_schema": { "type": "object", "description": "Optional input JSON schema." },
                    "output_schema": { "type": "object", "description": "Optional output JSON schema." },
                    "pricing_karma": { "type": "number", "description": "Optional karma price for using this capability." },
                    "active": { "type": "boolean", "description": "Set capability active state." }
                },
                "required": ["capability_id"]
            }),
            handler(|args, context| async move {
                let capability_id = require_str(&args, "capability_id")?;

                let mut body = Map::new();
                insert_opt(&mut body, "name", optional_str(&args, "name").map(Value::String));
                insert_opt(
                    &mut body,
                    "description",
                    optional_str(&args, "description").map(Value::String),
                );
                insert_opt(
                    &mut body,
                    "category",
                    optional_str(&args, "category").map(Value::String),
                );
                insert_opt(&mut body, "input_schema", optional_object(&args, "input_schema"));
                insert_opt(&mut body, "output_schema", optional_object(&args, "output_schema"));
                insert_opt(&mut body, "pricing_karma", optional_number(&args, "pricing_karma"));
                insert_opt(&mut body, "active", optional_bool(&args, "active").map(Value::Bool));
                context
                    .client
                    .execute_raw(
                        RequestSpec::put(format!(
                            "/v1/agents/capabilities/{}",
                            encode_segment(&capability_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_capability_delete",
            "Delete a capability by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "capability_id": { "type": "string", "description": "Capability id." }
                },
                "required": ["capability_id"]
            }),
            handler(|args, context| async move {
                let capability_id = require_str(&args, "capability_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/capabilities/{}",
                        encode_segment(&capability_id)
                    )))
                    .await
            }),
        ),
    ]
}
