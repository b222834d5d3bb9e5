use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, number_query, optional_bool, optional_number,
    optional_object, optional_str, require_object, require_str, ToolDefinition,
};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_cron_create",
            "Create a scheduled cron or interval job for your agent (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Job name." },
                    "schedule": {
                        "type": "object",
                        "description": "Schedule config.",
                        "properties": {
                            "type": { "type": "string", "enum": ["cron", "interval"] },
                            "expression": { "type": "string", "description": "Cron expression when type=cron." },
                            "interval_minutes": { "type": "number", "description": "Interval minutes when type=interval." },
                            "timezone": { "type": "string", "description": "Optional timezone identifier." }
                        },
                        "required": ["type"]
                    },
                    "task": {
                        "type": "object",
                        "description": "Task request to execute.",
                        "properties": {
                            "method": { "type": "string", "enum": ["GET", "POST", "PUT", "PATCH", "DELETE"] },
                            "endpoint": { "type": "string", "description": "API endpoint path to call." },
                            "body": { "type": "object", "description": "Optional request body." },
                            "headers": { "type": "object", "description": "Optional request headers." }
                        },
                        "required": ["method", "endpoint"]
                    },
                    "enabled": { "type": "boolean", "description": "Enable job immediately." },
                    "max_retries": { "type": "number", "description": "Maximum retries (0-3)." },
                    "timeout_seconds": { "type": "number", "description": "Task timeout in seconds (5-300)." },
                    "description": { "type": "string", "description": "Optional job description." }
                },
                "required": ["name", "schedule", "task"]
            }),
            handler(|args, context| async move {
                let name = require_str(&args, "name")?;
                let schedule = require_object(&args, "schedule")?;
                let task = require_object(&args, "task")?;

                let mut body = Map::new();
                body.insert("name".to_string(), Value::String(name));
                body.insert("schedule".to_string(), schedule);
                body.insert("task".to_string(), task);
                insert_opt(&mut body, "enabled", optional_bool(&args, "enabled").map(Value::Bool));
                insert_opt(&mut body, "max_retries", optional_number(&args, "max_retries"));
                insert_opt(
                    &mut body,
                    "timeout_seconds",
                    optional_number(&args, "timeout_seconds"),
                );
                insert_opt(
                    &mut body,
                    "description",
                    optional_str(&args, "description").map(Value::String),
                );
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/cron").body(Value::Object(body)))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_cron_list",
            "List cron jobs for the authenticated agent (free read).",
            json!({
                "type": "object",
                "properties": {
                    "offset": { "type": "number", "description": "Pagination offset." },
                    "limit": { "type": "number", "description": "Page size." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/cron")
                            .query_opt("offset", number_query(&args, "offset"))
                            .query_opt("limit", number_query(&args, "limit")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_cron_update",
            "Update a cron job by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "job_id": { "type": "string", "description": "Cron job id." },
                    "name": { "type": "string", "description": "Job name." },
                    "schedule": { "type": "object", "description": "Schedule config." },
                    "task": { "type": "object", "description": "Task request to execute." },
                    "enabled": { "type": "boolean", "description": "Enable or disable job." },
                    "max_retries": { "type": "number", "description": "Maximum retries (0-3)." },
                    "timeout_seconds": { "type": "number", "description": "Task timeout in seconds (5-300)." },
                    "description": { "type": "string", "description": "Optional job description." }
                },
                "required": ["job_id"]
            }),
            handler(|args, context| async move {
                let job_id = require_str(&args, "job_id")?;

                let mut body = Map::new();
                insert_opt(&mut body, "name", optional_str(&args, "name").map(Value::String));
                insert_opt(&mut body, "schedule", optional_object(&args, "schedule"));
                insert_opt(&mut body, "task", optional_object(&args, "task"));
                insert_opt(&mut body, "enabled", optional_bool(&args, "enabled").map(Value::Bool));
                insert_opt(&mut body, "max_retries", optional_number(&args, "max_retries"));
                insert_opt(
                    &mut body,
                    "timeout_seconds",
                    optional_number(&args, "timeout_seconds"),
                );
                insert_opt(
                    &mut body,
                    "description",
                    optional_str(&args, "description").map(Value::String),
                );
                context
                    .client
                    .execute_raw(
                        RequestSpec::patch(format!(
                            "/v1/agents/cron/{}",
                            encode_segment(&job_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_cron_delete",
            "Delete a cron job by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "job_id": { "type": "string", "description": "Cron job id." }
                },
                "required": ["job_id"]
            }),
            handler(|args, context| async move {
                let job_id = require_str(&args, "job_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/cron/{}",
                        encode_segment(&job_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_cron_runs",
            "List execution runs for a cron job (free read).",
            json!({
                "type": "object",
                "properties": {
                    "job_id": { "type": "string", "description": "Cron job id." },
                    "offset": { "type": "number", "description": "Pagination offset." },
                    "limit": { "type": "number", "description": "Page size." }
                },
                "required": ["job_id"]
            }),
            handler(|args, context| async move {
                let job_id = require_str(&args, "job_id")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::get(format!(
                            "/v1/agents/cron/{}/runs",
                            encode_segment(&job_id)
                        ))
                        .query_opt("offset", number_query(&args, "offset"))
                        .query_opt("limit", number_query(&args, "limit")),
                    )
                    .await
            }),
        ),
    ]
}
