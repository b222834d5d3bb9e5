use serde_json::{json, Map, Value};

use super::{
    handler, insert_opt, optional_str, require_str, require_string_array, ToolDefinition,
};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition::new(
        "deva_comms_email_send",
        "Send emails via AWS SES. Pricing: 1₭ ($0.001) per email.",
        json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "array",
                    "description": "Recipient email addresses.",
                    "items": { "type": "string" }
                },
                "subject": { "type": "string", "description": "Email subject line." },
                "body": { "type": "string", "description": "Email body content." },
                "reply_to": { "type": "string", "description": "Optional reply-to email address." }
            },
            "required": ["to", "subject", "body"]
        }),
        handler(|args, context| async move {
            let to = require_string_array(&args, "to")?;
            let subject = require_str(&args, "subject")?;
            let body_text = require_str(&args, "body")?;

            let mut body = Map::new();
            body.insert(
                "to".to_string(),
                Value::Array(to.into_iter().map(Value::String).collect()),
            );
            body.insert("subject".to_string(), Value::String(subject));
            body.insert("body".to_string(), Value::String(body_text));
            insert_opt(
                &mut body,
                "reply_to",
                optional_str(&args, "reply_to").map(Value::String),
            );
            context
                .client
                .execute_raw(RequestSpec::post("/comms/email/send").body(Value::Object(body)))
                .await
        }),
    )]
}
