//! Tool catalog: thin mappings from MCP tool calls onto API endpoints.
//!
//! Each tool is data — a name, a description, a JSON schema, and an async
//! handler taking the raw argument object and the shared context. Handlers do
//! required-field checks and hand a [`RequestSpec`] to the client; they carry
//! no business logic of their own.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

use crate::auth::AuthManager;
use crate::client::DevaClient;
use crate::errors::{DevaError, Result};

mod agent;
mod ai;
mod balance;
mod capabilities;
mod comms;
mod cron;
mod governance;
mod marketplace;
mod messaging;
mod servers;
mod social;
mod storage;
mod wallet;
mod webhooks;

/// Shared state handed to every tool invocation.
#[derive(Clone)]
pub struct ToolContext {
    pub client: DevaClient,
    pub auth: AuthManager,
}

/// A boxed future type for async tool handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Handler function type: parsed JSON arguments plus context in, payload or
/// normalized error out.
pub type ToolHandler = Arc<dyn Fn(Value, ToolContext) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Wraps an async closure into a [`ToolHandler`].
pub fn handler<F, Fut>(f: F) -> ToolHandler
where
    F: Fn(Value, ToolContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |args, context| Box::pin(f(args, context)))
}

/// One callable tool exposed over the protocol.
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    handler: ToolHandler,
}

impl ToolDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        input_schema: Value,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name,
            description,
            input_schema,
            handler,
        }
    }

    pub async fn execute(&self, args: Value, context: ToolContext) -> Result<Value> {
        (self.handler)(args, context).await
    }
}

/// Name-indexed collection of tool definitions.
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
    index: HashMap<&'static str, usize>,
}

impl ToolCatalog {
    /// The full platform catalog.
    pub fn standard() -> Self {
        let mut tools = Vec::new();
        tools.extend(agent::tools());
        tools.extend(social::tools());
        tools.extend(ai::tools());
        tools.extend(storage::tools());
        tools.extend(balance::tools());
        tools.extend(messaging::tools());
        tools.extend(comms::tools());
        tools.extend(wallet::tools());
        tools.extend(governance::tools());
        tools.extend(webhooks::tools());
        tools.extend(capabilities::tools());
        tools.extend(cron::tools());
        tools.extend(marketplace::tools());
        tools.extend(servers::tools());
        Self::from_tools(tools)
    }

    pub fn from_tools(tools: Vec<ToolDefinition>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(position, tool)| (tool.name, position))
            .collect();
        Self { tools, index }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Looks up a tool by name and runs it. Unknown names surface as a
    /// normalized error rather than a protocol failure.
    pub async fn dispatch(&self, name: &str, args: Value, context: ToolContext) -> Result<Value> {
        match self.get(name) {
            Some(tool) => tool.execute(args, context).await,
            None => Err(DevaError::message(format!("Unknown tool: {name}"))),
        }
    }
}

// Path segments come from tool arguments; encode everything a URL could
// misread, keeping the unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

pub(crate) fn require_str(args: &Value, field: &str) -> Result<String> {
    args.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DevaError::message(format!("Expected non-empty string for '{field}'")))
}

pub(crate) fn optional_str(args: &Value, field: &str) -> Option<String> {
    args.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Numeric argument kept as a JSON number so integers stay integers.
pub(crate) fn optional_number(args: &Value, field: &str) -> Option<Value> {
    args.get(field).filter(|value| value.is_number()).cloned()
}

pub(crate) fn optional_bool(args: &Value, field: &str) -> Option<bool> {
    args.get(field).and_then(Value::as_bool)
}

pub(crate) fn optional_object(args: &Value, field: &str) -> Option<Value> {
    args.get(field).filter(|value| value.is_object()).cloned()
}

pub(crate) fn require_object(args: &Value, field: &str) -> Result<Value> {
    optional_object(args, field)
        .ok_or_else(|| DevaError::message(format!("{field} is required")))
}

/// Required non-empty array of strings, e.g. email recipients.
pub(crate) fn require_string_array(args: &Value, field: &str) -> Result<Vec<String>> {
    let invalid =
        || DevaError::message(format!("{field} is required and must be a non-empty string array"));
    let items = args.get(field).and_then(Value::as_array).ok_or_else(invalid)?;
    if items.is_empty() {
        return Err(invalid());
    }
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

/// Optional array of strings; present-but-malformed is an error rather than
/// silently dropped.
pub(crate) fn optional_string_array(args: &Value, field: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = args.get(field) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    let invalid = || DevaError::message(format!("{field} must be a string array"));
    let items = value.as_array().ok_or_else(invalid)?;
    let collected = items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(collected))
}

/// Stringified numeric argument for query parameters.
pub(crate) fn number_query(args: &Value, field: &str) -> Option<String> {
    optional_number(args, field).map(|value| value.to_string())
}

pub(crate) fn insert_opt(body: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        body.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_names_are_unique() {
        let catalog = ToolCatalog::standard();
        let mut seen = std::collections::HashSet::new();
        for tool in catalog.iter() {
            assert!(seen.insert(tool.name), "duplicate tool name: {}", tool.name);
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn every_tool_has_an_object_schema() {
        for tool in ToolCatalog::standard().iter() {
            assert_eq!(
                tool.input_schema.get("type").and_then(Value::as_str),
                Some("object"),
                "{} schema must be an object schema",
                tool.name
            );
            assert!(!tool.description.is_empty(), "{} has no description", tool.name);
        }
    }

    #[test]
    fn require_str_rejects_missing_and_empty() {
        let err = require_str(&json!({}), "name").unwrap_err();
        assert_eq!(err.message, "Expected non-empty string for 'name'");

        let err = require_str(&json!({ "name": "" }), "name").unwrap_err();
        assert_eq!(err.message, "Expected non-empty string for 'name'");

        assert_eq!(require_str(&json!({ "name": "ok" }), "name").unwrap(), "ok");
    }

    #[test]
    fn string_array_helpers_validate_shape() {
        let err = require_string_array(&json!({ "to": [] }), "to").unwrap_err();
        assert!(err.message.contains("non-empty string array"));

        let err = require_string_array(&json!({ "to": ["a", 1] }), "to").unwrap_err();
        assert!(err.message.contains("non-empty string array"));

        assert_eq!(
            require_string_array(&json!({ "to": ["a", "b"] }), "to").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );

        assert_eq!(optional_string_array(&json!({}), "tags").unwrap(), None);
        assert!(optional_string_array(&json!({ "tags": "x" }), "tags").is_err());
    }

    #[test]
    fn numbers_keep_their_json_representation() {
        assert_eq!(number_query(&json!({ "limit": 20 }), "limit").as_deref(), Some("20"));
        assert_eq!(
            number_query(&json!({ "limit": 1.5 }), "limit").as_deref(),
            Some("1.5")
        );
        assert_eq!(number_query(&json!({ "limit": "20" }), "limit"), None);
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_segment("docs/readme.md"), "docs%2Freadme.md");
        assert_eq!(encode_segment("plain-key_1.txt"), "plain-key_1.txt");
        assert_eq!(encode_segment("a b"), "a%20b");
    }
}
