//! MCP server handler backed by a [`ToolRegistry`]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::streamable_http_server::{session::local::LocalSessionManager, StreamableHttpService},
    ErrorData, RoleServer, ServerHandler,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

use crate::logging::Logger;
use crate::tools::ToolRegistry;
use crate::types::{ContentBlock, ToolDefinition, ToolResult};

/// Name reported in the handshake and by `/health`
pub const SERVER_NAME: &str = "hello-mcp-server";

/// Serves every tool of a registry over MCP
#[derive(Clone)]
pub struct ToolServer {
    registry: Arc<ToolRegistry>,
    logger: Arc<dyn Logger>,
}

impl ToolServer {
    pub fn new(registry: Arc<ToolRegistry>, logger: Arc<dyn Logger>) -> Self {
        Self { registry, logger }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a call; dispatch errors are reported as tool errors
    pub fn handle_call(&self, name: &str, arguments: Option<Map<String, Value>>) -> CallToolResult {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        let result = match self.registry.dispatch(name, &arguments) {
            Ok(result) => result,
            Err(e) => {
                self.logger.warn(&format!("[ToolServer] {}", e));
                ToolResult::error(e.to_string())
            }
        };
        to_call_tool_result(result)
    }
}

impl ServerHandler for ToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("Hello MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
            instructions: Some("Periodic table lookups by element name or atomic number".to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self.registry.list().into_iter().map(to_rmcp_tool).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.handle_call(&request.name, request.arguments))
    }
}

fn to_rmcp_tool(definition: ToolDefinition) -> Tool {
    let schema = match definition.input_schema {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Tool::new(definition.name, definition.description, Arc::new(schema))
}

/// Every block is sent as text. A single structured block is also sent as
/// `structuredContent` so clients can restore it.
fn to_call_tool_result(result: ToolResult) -> CallToolResult {
    let mut structured = result.content.iter().filter_map(|block| match block {
        ContentBlock::Structured { value } => Some(value),
        ContentBlock::Text { .. } => None,
    });
    let structured_content = match (structured.next(), structured.next()) {
        (Some(value), None) => Some(value.clone()),
        _ => None,
    };

    let content = result
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => Content::text(text.clone()),
            ContentBlock::Structured { value } => Content::text(value.to_string()),
        })
        .collect();

    let mut converted = if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    };
    converted.structured_content = structured_content;
    converted
}

/// Router with the MCP endpoint at `/mcp` and a `/health` check
pub fn mcp_router(registry: Arc<ToolRegistry>, logger: Arc<dyn Logger>) -> Router {
    let server = ToolServer::new(registry, logger);
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    Router::new()
        .nest_service("/mcp", service)
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP", "server": SERVER_NAME }))
}

/// Serve `router` on an already bound listener until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    router: Router,
    logger: Arc<dyn Logger>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    logger.info(&format!("[ToolServer] Listening on http://{}/mcp", addr));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    logger.info("[ToolServer] Shut down");
    Ok(())
}
