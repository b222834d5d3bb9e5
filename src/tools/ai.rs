use serde_json::{json, Map, Value};

use super::{handler, insert_opt, optional_number, optional_str, require_str, ToolDefinition};
use crate::errors::DevaError;
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "deva_ai_tts",
            "Generate text-to-speech audio. Pricing: 1₭ ($0.001) per 100 chars.",
            json!({
                "type": "object",
                "description": "TTS payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/ai/tts").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_ai_image_generate",
            "Generate image content. Pricing: 80₭ ($0.08) standard or 160₭ ($0.16) HD per image.",
            json!({
                "type": "object",
                "description": "Image generation payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/v1/agents/resources/images/generate").body(args),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_ai_embeddings",
            "Create embeddings for input text. Pricing: 1₭ ($0.001) per 1K tokens.",
            json!({
                "type": "object",
                "description": "Embeddings payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/resources/embeddings").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_ai_vision_analyze",
            "Analyze image/video content using vision models. Pricing: 20₭ ($0.02) per image.",
            json!({
                "type": "object",
                "description": "Vision payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(
                        RequestSpec::post("/v1/agents/resources/vision/analyze").body(args),
                    )
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_ai_web_search",
            "Run Deva web search resource. Pricing: 10₭ ($0.01) per search.",
            json!({
                "type": "object",
                "description": "Search payload accepted by Deva API.",
                "additionalProperties": true
            }),
            handler(|args, context| async move {
                context
                    .client
                    .execute_raw(RequestSpec::post("/v1/agents/resources/search").body(args))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_ai_llm_completion",
            "Send chat completion requests via OpenRouter. Supports all major LLM models. Pricing: dynamic, about 20₭ ($0.02) base and ~2x OpenRouter cost.",
            json!({
                "type": "object",
                "properties": {
                    "model": { "type": "string", "description": "LLM model identifier (for example openai/gpt-4o-mini)." },
                    "messages": {
                        "type": "array",
                        "description": "Chat messages in OpenAI-compatible format.",
                        "items": {
                            "type": "object",
                            "properties": {
                                "role": { "type": "string", "description": "Message role (system, user, assistant)." },
                                "content": { "type": "string", "description": "Message content." }
                            },
                            "required": ["role", "content"]
                        }
                    },
                    "max_tokens": { "type": "number", "description": "Maximum output tokens." },
                    "temperature": { "type": "number", "description": "Sampling temperature." }
                },
                "required": ["model", "messages"]
            }),
            handler(|args, context| async move {
                let model = require_str(&args, "model")?;
                let messages = args
                    .get("messages")
                    .and_then(Value::as_array)
                    .filter(|messages| !messages.is_empty())
                    .cloned()
                    .ok_or_else(|| DevaError::message("messages is required"))?;

                let mut body = Map::new();
                body.insert("model".to_string(), Value::String(model));
                body.insert("messages".to_string(), Value::Array(messages));
                insert_opt(&mut body, "max_tokens", optional_number(&args, "max_tokens"));
                insert_opt(&mut body, "temperature", optional_number(&args, "temperature"));
                context
                    .client
                    .execute_raw(RequestSpec::post("/chat/completions").body(Value::Object(body)))
                    .await
            }),
        ),
        ToolDefinition::new(
            "deva_ai_transcription",
            "Transcribe audio using Groq Whisper. Supports mp3, wav, m4a, webm. Pricing: 5₭ ($0.005) per 24s audio.",
            json!({
                "type": "object",
                "properties": {
                    "audio_url": { "type": "string", "description": "URL to an audio file to transcribe." },
                    "language": { "type": "string", "description": "Optional language hint." }
                },
                "required": ["audio_url"]
            }),
            handler(|args, context| async move {
                let audio_url = require_str(&args, "audio_url")?;
                let mut body = Map::new();
                body.insert("audio_url".to_string(), Value::String(audio_url));
                insert_opt(
                    &mut body,
                    "language",
                    optional_str(&args, "language").map(Value::String),
                );
                context
                    .client
                    .execute_raw(RequestSpec::post("/ai/transcribe").body(Value::Object(body)))
                    .await
            }),
        ),
    ]
}
