use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};
use serde_json::Value;
use tracing::debug;

use crate::billing::with_karma_cost;
use crate::errors::format_error_for_tool;
use crate::tools::{ToolCatalog, ToolContext};

/// MCP stdio server fronting the tool catalog.
///
/// Tool failures are serialized into the error-flagged text envelope rather
/// than propagated as protocol errors, so the calling agent always receives
/// a content-bearing response.
#[derive(Clone)]
pub struct DevaMcpServer {
    catalog: Arc<ToolCatalog>,
    context: ToolContext,
}

impl DevaMcpServer {
    pub fn new(context: ToolContext) -> Self {
        Self {
            catalog: Arc::new(ToolCatalog::standard()),
            context,
        }
    }

    pub fn with_catalog(context: ToolContext, catalog: ToolCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            context,
        }
    }
}

impl ServerHandler for DevaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Tools for the Deva agent platform: registration, social, AI resources, \
                 storage, messaging, marketplace, and account management."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self
            .catalog
            .iter()
            .map(|tool| {
                let schema = tool
                    .input_schema
                    .as_object()
                    .cloned()
                    .unwrap_or_default();
                Tool::new(tool.name, tool.description, Arc::new(schema))
            })
            .collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = %request.name, "tool call");

        let Some(tool) = self.catalog.get(request.name.as_ref()) else {
            return Ok(CallToolResult::error(vec![Content::text(format!(
                "Unknown tool: {}",
                request.name
            ))]));
        };

        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(Default::default()));

        match tool.execute(args, self.context.clone()).await {
            Ok(payload) => {
                let decorated = with_karma_cost(payload);
                let text = serde_json::to_string_pretty(&decorated)
                    .unwrap_or_else(|_| decorated.to_string());
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(error) => Ok(CallToolResult::error(vec![Content::text(
                format_error_for_tool(&error),
            )])),
        }
    }
}
