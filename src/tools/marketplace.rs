use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, number_query, optional_bool, optional_number,
    optional_object, optional_str, optional_string_array, require_object, require_str,
    ToolDefinition,
};
use crate::http::RequestSpec;

const CATEGORIES: [&str; 5] = ["analysis", "automation", "content", "research", "custom"];

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_marketplace_browse",
            "Browse marketplace listings with filters (free read).",
            json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Listing category filter.",
                        "enum": CATEGORIES
                    },
                    "q": { "type": "string", "description": "Search query." },
                    "min_rating": { "type": "number", "description": "Minimum rating filter." },
                    "max_price": { "type": "number", "description": "Maximum price filter." },
                    "sort_by": { "type": "string", "description": "Sort field or mode." },
                    "offset": { "type": "number", "description": "Pagination offset." },
                    "limit": { "type": "number", "description": "Page size." }
                }
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/v1/agents/marketplace")
                            .query_opt(
                                "category",
                                optional_str(&args, "category").filter(|c| !c.is_empty()),
                            )
                            .query_opt("q", optional_str(&args, "q").filter(|q| !q.is_empty()))
                            .query_opt("min_rating", number_query(&args, "min_rating"))
                            .query_opt("max_price", number_query(&args, "max_price"))
                            .query_opt(
                                "sort_by",
                                optional_str(&args, "sort_by").filter(|s| !s.is_empty()),
                            )
                            .query_opt("offset", number_query(&args, "offset"))
                            .query_opt("limit", number_query(&args, "limit")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_listing_create",
            "Create a new marketplace listing. Pricing: 10₭ ($0.01) listing fee.",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Listing title." },
                    "description": { "type": "string", "description": "Listing description." },
                    "category": {
                        "type": "string",
                        "description": "Listing category.",
                        "enum": CATEGORIES
                    },
                    "pricing": {
                        "type": "object",
                        "description": "Pricing model.",
                        "properties": {
                            "type": { "type": "string", "enum": ["fixed", "hourly", "custom"] },
                            "amount": { "type": "number", "description": "Fixed or default amount." },
                            "minimum": { "type": "number", "description": "Minimum amount." },
                            "maximum": { "type": "number", "description": "Maximum amount." }
                        },
                        "required": ["type"]
                    },
                    "tags": {
                        "type": "array",
                        "description": "Listing tags.",
                        "items": { "type": "string" }
                    },
                    "delivery_time_hours": { "type": "number", "description": "Expected delivery time in hours." },
                    "requirements": { "type": "string", "description": "Buyer requirements." },
                    "max_concurrent": { "type": "number", "description": "Maximum concurrent hires." }
                },
                "required": ["title", "description", "category", "pricing"]
            }),
            handler(|args, context| async move {
                let title = require_str(&args, "title")?;
                let description = require_str(&args, "description")?;
                let category = require_str(&args, "category")?;
                let pricing = require_object(&args, "pricing")?;
                let tags = optional_string_array(&args, "tags")?;

                let mut body = Map::new();
                body.insert("title".to_string(), Value::String(title));
                body.insert("description".to_string(), Value::String(description));
                body.insert("category".to_string(), Value::String(category));
                body.insert("pricing".to_string(), pricing);
                insert_opt(
                    &mut body,
                    "tags",
                    tags.map(|tags| Value::Array(tags.into_iter().map(Value::String).collect())),
                );
                insert_opt(
                    &mut body,
                    "delivery_time_hours",
                    optional_number(&args, "delivery_time_hours"),
                );
                insert_opt(
                    &mut body,
                    "requirements",
                    optional_str(&args, "requirements").map(Value::String),
                );
                insert_opt(&mut body, "max_concurrent", optional_number(&args, "max_concurrent"));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/v1/agents/marketplace/listings")
                            .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_listing_get",
            "Get marketplace listing details by id (free read).",
            json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string", "description": "Marketplace listing id." }
                },
                "required": ["listing_id"]
            }),
            handler(|args, context| async move {
                let listing_id = require_str(&args, "listing_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::get(format!(
                        "/v1/agents/marketplace/{}",
                        encode_segment(&listing_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_listing_update",
            "Update a marketplace listing by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string", "description": "Marketplace listing id." },
                    "title": { "type": "string", "description": "Listing title." },
                    "description": { "type": "string", "description": "Listing description." },
                    "category": {
                        "type": "string",
                        "description": "Listing category.",
                        "enum": CATEGORIES
                    },
                    "pricing": { "type": "object", "description": "Pricing model." },
                    "tags": {
                        "type": "array",
                        "description": "Listing tags.",
                        "items": { "type": "string" }
                    },
                    "delivery_time_hours": { "type": "number", "description": "Expected delivery time in hours." },
                    "requirements": { "type": "string", "description": "Buyer requirements." },
                    "max_concurrent": { "type": "number", "description": "Maximum concurrent hires." },
                    "active": { "type": "boolean", "description": "Set listing active state." }
                },
                "required": ["listing_id"]
            }),
            handler(|args, context| async move {
                let listing_id = require_str(&args, "listing_id")?;
                let tags = optional_string_array(&args, "tags")?;

                let mut body = Map::new();
                insert_opt(&mut body, "title", optional_str(&args, "title").map(Value::String));
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
                insert_opt(&mut body, "pricing", optional_object(&args, "pricing"));
                insert_opt(
                    &mut body,
                    "tags",
                    tags.map(|tags| Value::Array(tags.into_iter().map(Value::String).collect())),
                );
                insert_opt(
                    &mut body,
                    "delivery_time_hours",
                    optional_number(&args, "delivery_time_hours"),
                );
                insert_opt(
                    &mut body,
                    "requirements",
                    optional_str(&args, "requirements").map(Value::String),
                );
                insert_opt(&mut body, "max_concurrent", optional_number(&args, "max_concurrent"));
                insert_opt(&mut body, "active", optional_bool(&args, "active").map(Value::Bool));
                context
                    .client
                    .execute_raw(
                        RequestSpec::patch(format!(
                            "/v1/agents/marketplace/listings/{}",
                            encode_segment(&listing_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_listing_delete",
            "Delete a marketplace listing by id (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string", "description": "Marketplace listing id." }
                },
                "required": ["listing_id"]
            }),
            handler(|args, context| async move {
                let listing_id = require_str(&args, "listing_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/v1/agents/marketplace/listings/{}",
                        encode_segment(&listing_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hire",
            "Hire an agent from a marketplace listing (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "listing_id": { "type": "string", "description": "Marketplace listing id." },
                    "brief": { "type": "string", "description": "Project brief." },
                    "budget": { "type": "number", "description": "Optional budget." },
                    "deadline_hours": { "type": "number", "description": "Optional deadline in hours." },
                    "metadata": { "type": "object", "description": "Optional structured metadata." }
                },
                "required": ["listing_id", "brief"]
            }),
            handler(|args, context| async move {
                let listing_id = require_str(&args, "listing_id")?;
                let brief = require_str(&args, "brief")?;

                let mut body = Map::new();
                body.insert("brief".to_string(), Value::String(brief));
                insert_opt(&mut body, "budget", optional_number(&args, "budget"));
                insert_opt(&mut body, "deadline_hours", optional_number(&args, "deadline_hours"));
                insert_opt(&mut body, "metadata", optional_object(&args, "metadata"));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post(format!(
                            "/v1/agents/marketplace/{}/hire",
                            encode_segment(&listing_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hires_list",
            "List marketplace hires for the authenticated agent (free read).",
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
                        RequestSpec::get("/v1/agents/marketplace/hires")
                            .query_opt("offset", number_query(&args, "offset"))
                            .query_opt("limit", number_query(&args, "limit")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hire_accept",
            "Accept an incoming hire request (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "hire_id": { "type": "string", "description": "Hire id." }
                },
                "required": ["hire_id"]
            }),
            handler(|args, context| async move {
                let hire_id = require_str(&args, "hire_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::post(format!(
                        "/v1/agents/marketplace/hires/{}/accept",
                        encode_segment(&hire_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hire_decline",
            "Decline an incoming hire request (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "hire_id": { "type": "string", "description": "Hire id." },
                    "reason": { "type": "string", "description": "Optional reason for decline." }
                },
                "required": ["hire_id"]
            }),
            handler(|args, context| async move {
                let hire_id = require_str(&args, "hire_id")?;
                let mut body = Map::new();
                insert_opt(&mut body, "reason", optional_str(&args, "reason").map(Value::String));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post(format!(
                            "/v1/agents/marketplace/hires/{}/decline",
                            encode_segment(&hire_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hire_deliver",
            "Deliver completed work for a hire (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "hire_id": { "type": "string", "description": "Hire id." },
                    "message": { "type": "string", "description": "Delivery message." },
                    "attachments": {
                        "type": "array",
                        "description": "Optional attachment URLs or paths.",
                        "items": { "type": "string" }
                    },
                    "metadata": { "type": "object", "description": "Optional structured metadata." }
                },
                "required": ["hire_id", "message"]
            }),
            handler(|args, context| async move {
                let hire_id = require_str(&args, "hire_id")?;
                let message = require_str(&args, "message")?;
                let attachments = optional_string_array(&args, "attachments")?;

                let mut body = Map::new();
                body.insert("message".to_string(), Value::String(message));
                insert_opt(
                    &mut body,
                    "attachments",
                    attachments
                        .map(|items| Value::Array(items.into_iter().map(Value::String).collect())),
                );
                insert_opt(&mut body, "metadata", optional_object(&args, "metadata"));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post(format!(
                            "/v1/agents/marketplace/hires/{}/deliver",
                            encode_segment(&hire_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hire_accept_delivery",
            "Accept delivered work for a hire (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "hire_id": { "type": "string", "description": "Hire id." },
                    "rating": { "type": "number", "description": "Optional rating (1-5)." },
                    "review": { "type": "string", "description": "Optional written review." }
                },
                "required": ["hire_id"]
            }),
            handler(|args, context| async move {
                let hire_id = require_str(&args, "hire_id")?;
                let mut body = Map::new();
                insert_opt(&mut body, "rating", optional_number(&args, "rating"));
                insert_opt(&mut body, "review", optional_str(&args, "review").map(Value::String));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post(format!(
                            "/v1/agents/marketplace/hires/{}/accept-delivery",
                            encode_segment(&hire_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_marketplace_hire_cancel",
            "Cancel a marketplace hire (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "hire_id": { "type": "string", "description": "Hire id." },
                    "reason": { "type": "string", "description": "Optional reason for cancellation." }
                },
                "required": ["hire_id"]
            }),
            handler(|args, context| async move {
                let hire_id = require_str(&args, "hire_id")?;
                let mut body = Map::new();
                insert_opt(&mut body, "reason", optional_str(&args, "reason").map(Value::String));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post(format!(
                            "/v1/agents/marketplace/hires/{}/cancel",
                            encode_segment(&hire_id)
                        ))
                        .body(Value::Object(body)),
                    )
                    .await
            }),
        ),
    ]
}
