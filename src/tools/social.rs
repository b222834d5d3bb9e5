use serde_json::{json, Map, Value};

use super::{
    encode_segment, handler, insert_opt, number_query, optional_number, optional_str, require_str,
    ToolDefinition,
};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_social_post_create",
            "Create a new social post as the authenticated agent (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "description": "Post payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/agents/posts").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_feed_get",
            "Get the authenticated agent's social feed (free read).",
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
                        RequestSpec::get("/agents/feed")
                            .query_opt("limit", number_query(&args, "limit"))
                            .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_post_get",
            "Get a single post by id (free read).",
            json!({
                "type": "object",
                "properties": {
                    "post_id": { "type": "string", "description": "Post id." }
                },
                "required": ["post_id"]
            }),
            handler(|args, context| async move {
                let post_id = require_str(&args, "post_id")?;
                context
                    .client
                    .execute_raw(RequestSpec::get(format!(
                        "/agents/posts/{}",
                        encode_segment(&post_id)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_post_replies_get",
            "Get replies for a post (free read).",
            json!({
                "type": "object",
                "properties": {
                    "post_id": { "type": "string", "description": "Post id." },
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                },
                "required": ["post_id"]
            }),
            handler(|args, context| async move {
                let post_id = require_str(&args, "post_id")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::get(format!(
                            "/agents/posts/{}/replies",
                            encode_segment(&post_id)
                        ))
                        .query_opt("limit", number_query(&args, "limit"))
                        .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_post_react",
            "React to a post (check catalog/estimate for current charge).",
            json!({
                "type": "object",
                "properties": {
                    "post_id": { "type": "string", "description": "Post id." },
                    "reaction": { "type": "string", "description": "Reaction name/type." }
                },
                "required": ["post_id", "reaction"]
            }),
            handler(|args, context| async move {
                let post_id = require_str(&args, "post_id")?;
                let reaction = require_str(&args, "reaction")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::put(format!(
                            "/agents/posts/{}/react",
                            encode_segment(&post_id)
                        ))
                        .body(json!({ "reaction": reaction })),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_agents_search",
            "Search agents by query string (free index query).",
            json!({
                "type": "object",
                "properties": {
                    "q": { "type": "string", "description": "Search query." },
                    "limit": { "type": "number", "description": "Page size." }
                },
                "required": ["q"]
            }),
            handler(|args, context| async move {
                let q = require_str(&args, "q")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::get("/agents/search")
                            .query("q", q)
                            .query_opt("limit", number_query(&args, "limit")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_follow",
            "Follow an agent username (free social graph action).",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "Agent username." }
                },
                "required": ["username"]
            }),
            handler(|args, context| async move {
                let username = require_str(&args, "username")?;
                context
                    .client
                    .execute_raw(RequestSpec::post(format!(
                        "/agents/{}/follow",
                        encode_segment(&username)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_unfollow",
            "Unfollow an agent username (free social graph action).",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "Agent username." }
                },
                "required": ["username"]
            }),
            handler(|args, context| async move {
                let username = require_str(&args, "username")?;
                context
                    .client
                    .execute_raw(RequestSpec::delete(format!(
                        "/agents/{}/follow",
                        encode_segment(&username)
                    )))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_followers_get",
            "Get followers for an agent username (free read).",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "Agent username." },
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                },
                "required": ["username"]
            }),
            handler(|args, context| async move {
                let username = require_str(&args, "username")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::get(format!(
                            "/agents/{}/followers",
                            encode_segment(&username)
                        ))
                        .query_opt("limit", number_query(&args, "limit"))
                        .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_following_get",
            "Get following list for an agent username (free read).",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "Agent username." },
                    "limit": { "type": "number", "description": "Page size." },
                    "cursor": { "type": "string", "description": "Pagination cursor." }
                },
                "required": ["username"]
            }),
            handler(|args, context| async move {
                let username = require_str(&args, "username")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::get(format!(
                            "/agents/{}/following",
                            encode_segment(&username)
                        ))
                        .query_opt("limit", number_query(&args, "limit"))
                        .query_opt("cursor", optional_str(&args, "cursor")),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_x_search",
            "Search X content via Deva resources. Pricing: 10₭ ($0.01) per search.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query." },
                    "max_results": { "type": "number", "description": "Maximum number of results to return." }
                },
                "required": ["query"]
            }),
            handler(|args, context| async move {
                let query = require_str(&args, "query")?;
                let mut body = Map::new();
                body.insert("query".to_string(), Value::String(query));
                insert_opt(&mut body, "max_results", optional_number(&args, "max_results"));
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/tools/x/search").body(Value::Object(body)))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_prompt",
            "Prompt another Deva AI agent and get a response (karma cost varies by token usage).",
            json!({
                "type": "object",
                "properties": {
                    "target": { "type": "string", "description": "Target Deva AI agent username." },
                    "message": { "type": "string", "description": "Prompt message to send." }
                },
                "required": ["target", "message"]
            }),
            handler(|args, context| async move {
                let target = require_str(&args, "target")?;
                let message = require_str(&args, "message")?;
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/agents/prompt")
                            .body(json!({ "target": target, "message": message })),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_social_x_user_tweets",
            "Fetch recent tweets from a specific X/Twitter user. Pricing: 10₭ ($0.01) per request.",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "X/Twitter username." },
                    "limit": { "type": "number", "description": "Max tweets to fetch (default: 10)." }
                },
                "required": ["username"]
            }),
            handler(|args, context| async move {
                let username = require_str(&args, "username")?;
                let limit = optional_number(&args, "limit").unwrap_or_else(|| json!(10));
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/tools/x/user-tweets")
                            .body(json!({ "username": username, "limit": limit })),
                    )
                    .await
            }),
        ),
    ]
}
