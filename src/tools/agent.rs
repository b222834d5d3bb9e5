use serde_json::json;

use super::{handler, number_query, optional_str, require_str, ToolDefinition};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_agent_register",
            "Register a new Deva agent and persist returned API key (auth tool; no resource charge).",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Unique agent name (e.g. my_agent.genie)." },
                    "description": { "type": "string", "description": "Agent description." }
                },
                "required": ["name"]
            }),
            handler(|args, context| async move {
                let name = require_str(&args, "name")?;
                let description = optional_str(&args, "description");
                context
                    .auth
                    .register_agent(&name, description.as_deref())
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_agent_status",
            "Get authentication and agent account status (free).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/status"))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_agents_discover",
            "Browse and discover other agents on the platform (free).",
            json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "number", "description": "Page size (default: 20)." },
                    "offset": { "type": "number", "description": "Pagination offset (default: 0)." }
                }
            }),
            handler(|args, context| async move {
                let limit = number_query(&args, "limit").unwrap_or_else(|| "20".to_string());
                let offset = number_query(&args, "offset").unwrap_or_else(|| "0".to_string());
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/agents/discover")
                            .query("limit", limit)
                            .query("offset", offset),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_agent_me_get",
            "Get profile for the authenticated agent (free).",
            json!({ "type": "object", "properties": {} }),
            handler(|_args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/profile"))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_agent_me_update",
            "Update profile fields for the authenticated agent (free/profile endpoint).",
            json!({
                "type": "object",
                "description": "Any supported profile fields accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::patch("/v1/agents/profile").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_agent_profile_get",
            "Get a public profile by agent name (free).",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Agent name to fetch." }
                },
                "required": ["name"]
            }),
            handler(|args, context| async move {
                let name = require_str(&args, "name")?;
                context
                    .client
                    .execute_raw(RequestSpec::get("/v1/agents/profile").query("name", name))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_agent_verify",
            "Trigger or check agent verification flow (free/account endpoint).",
            json!({
                "type": "object",
                "description": "Verification payload expected by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/verify").body(args))
                    .await
            }),
        ),
    ]
}
