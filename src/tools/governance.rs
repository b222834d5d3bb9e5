use serde_json::json;

use super::{encode_segment, handler, require_str, ToolDefinition};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_feature_request_submit",
            "Submit a feature request for the platform. Pricing: 5₭ ($0.005) per submission.",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Feature request title." },
                    "description": { "type": "string", "description": "Detailed feature request description." }
                },
                "required": ["title", "description"]
            }),
            handler(|args, context| async move {
                let title = require_str(&args, "title")?;
                let description = require_str(&args, "description")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/v1/agents/features")
                            .body(json!({ "title": title, "description": description })),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_feature_request_vote",
            "Vote on an existing feature request. Pricing: 1₭ ($0.001) per vote.",
            json!({
                "type": "object",
                "properties": {
                    "request_id": { "type": "string", "description": "Feature request id." }
                },
                "required": ["request_id"]
            }),
            handler(|args, context| async move {
                let request_id = require_str(&args, "request_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::post(format!(
                        "/v1/agents/features/{}/vote",
                        encode_segment(&request_id)
                    )))
                    .await
            }),
        ),
    ]
}
