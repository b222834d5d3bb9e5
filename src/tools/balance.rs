use serde_json::{json, Value};

use super::{handler, ToolDefinition};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_balance_get",
            "Get current karma balance (free).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/karma/balance"))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_cost_estimate",
            "Estimate karma cost for a resource call before execution (free).",
            json!({
                "type": "object",
                "description": "Estimate payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                // Older callers send `resource_type`; the estimate endpoint
                // expects `resource_id`.
                let payload = match (
                    args.get("resource_id").and_then(Value::as_str),
                    args.get("resource_type").and_then(Value::as_str),
                ) {
                    (Some(_), _) => args,
                    (None, Some(resource_type)) => {
                        let resource_id = Value::String(resource_type.to_string());
                        let mut map = args.as_object().cloned().unwrap_or_default();
                        map.insert("resource_id".to_string(), resource_id);
                        map.remove("resource_type");
                        Value::Object(map)
                    }
                    (None, None) => args,
                };
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/resources/estimate").body(payload))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_resources_catalog",
            "Get available resources and pricing catalog (free).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/resources/catalog"))
                    .await
            }),
        ),
    ]
}
