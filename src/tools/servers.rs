use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, optional_str, require_str, ToolDefinition,
};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_server_provision",
            "Provision a managed agent server instance (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "tier": { "type": "string", "description": "Server tier.", "enum": ["FREE", "SMALL", "MEDIUM"] },
                    "name": { "type": "string", "description": "Optional server name." },
                    "description": { "type": "string", "description": "Optional server description." }
                },
                "required": ["tier"]
            }),
            handler(|args, context| async move {
                let tier = require_str(&args, "tier")?;
                let mut body = Map::new();
                body.insert("tier".to_string(), Value::String(tier));
                insert_opt(&mut body, "name", optional_str(&args, "name").map(Value::String));
                insert_opt(
                    &mut body,
                    "description",
                    optional_str(&args, "description").map(Value::String),
                );
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/servers").body(Value::Object(body)))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_server_list",
            "List provisioned agent servers (free read).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/servers"))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_server_delete",
            "Delete a provisioned server by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "server_id": { "type": "string", "description": "Server id." }
                },
                "required": ["server_id"]
            }),
            handler(|args, context| async move {
                let server_id = require_str(&args, "server_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/servers/{}",
                        encode_segment(&server_id)
                    )))
                    .await
            }),
        ),
    ]
}
