//! Protocol session over the rmcp streamable HTTP client transport
//!
//! A session is bound to one endpoint and lives for one unit of work:
//! open (initialize handshake), discover and/or invoke, close.

use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation, RawContent,
        Tool,
    },
    service::RunningService,
    transport::StreamableHttpClientTransport,
    RoleClient, ServiceExt,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::logging::Logger;
use crate::types::{ContentBlock, ToolDefinition, ToolResult};

/// Default per-operation timeout
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Protocol session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Tool {tool} returned no content")]
    EmptyResult { tool: String },

    #[error("Session is closed")]
    Closed,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Where a tool server lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Full URL of the MCP endpoint, e.g. `http://localhost:9900/mcp`
    pub url: String,
    /// Timeout applied to the handshake and to every request
    pub call_timeout: Duration,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// `http://localhost:<port>/mcp`
    pub fn localhost(port: u16) -> Self {
        Self::new(format!("http://localhost:{}/mcp", port))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

/// An open MCP session
pub struct McpSession {
    /// `None` once closed
    client: Option<RunningService<RoleClient, ClientInfo>>,
    endpoint: Endpoint,
    logger: Arc<dyn Logger>,
}

impl McpSession {
    /// Connect and perform the initialize handshake
    pub async fn open(endpoint: &Endpoint, logger: Arc<dyn Logger>) -> SessionResult<Self> {
        logger.debug(&format!("[McpSession] Connecting to {}", endpoint.url));

        let transport = StreamableHttpClientTransport::from_uri(endpoint.url.as_str());
        let client_info = ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "hello-mcp-client".to_string(),
                title: Some("Hello MCP Client".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        };

        let client = tokio::time::timeout(endpoint.call_timeout, client_info.serve(transport))
            .await
            .map_err(|_| {
                SessionError::Connection(format!(
                    "handshake with {} timed out after {:?}",
                    endpoint.url, endpoint.call_timeout
                ))
            })?
            .map_err(|e| SessionError::Connection(format!("{}: {}", endpoint.url, e)))?;

        logger.debug("[McpSession] Connected and initialized");

        Ok(Self {
            client: Some(client),
            endpoint: endpoint.clone(),
            logger,
        })
    }

    fn client(&self) -> SessionResult<&RunningService<RoleClient, ClientInfo>> {
        self.client.as_ref().ok_or(SessionError::Closed)
    }

    /// Discover the server's tools
    pub async fn list_tools(&self) -> SessionResult<Vec<ToolDefinition>> {
        let client = self.client()?;
        let result = tokio::time::timeout(self.endpoint.call_timeout, client.list_tools(Default::default()))
            .await
            .map_err(|_| SessionError::Protocol("tools/list timed out".to_string()))?
            .map_err(|e| SessionError::Protocol(e.to_string()))?;

        let tools = result
            .tools
            .into_iter()
            .map(tool_definition)
            .collect::<SessionResult<Vec<_>>>()?;

        self.logger.info(&format!("[McpSession] Listed {} tools", tools.len()));
        Ok(tools)
    }

    /// Invoke one tool.
    ///
    /// Tool-reported failures come back as `Ok` with `is_error` set.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> SessionResult<ToolResult> {
        let client = self.client()?;
        self.logger.info(&format!("[McpSession] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments),
            task: None,
        };

        let result = tokio::time::timeout(self.endpoint.call_timeout, client.call_tool(params))
            .await
            .map_err(|_| SessionError::Protocol(format!("tools/call {} timed out", name)))?
            .map_err(|e| SessionError::Protocol(e.to_string()))?;

        tool_result(name, result)
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Close the session. Calling it again is a no-op.
    pub async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            self.logger.debug("[McpSession] Closing session");
            if let Err(e) = client.cancel().await {
                self.logger.warn(&format!("[McpSession] Close failed: {}", e));
            }
        }
    }
}

impl std::fmt::Debug for McpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpSession")
            .field("endpoint", &self.endpoint)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn tool_definition(tool: Tool) -> SessionResult<ToolDefinition> {
    if tool.name.trim().is_empty() {
        return Err(SessionError::Protocol("tool with empty name".to_string()));
    }

    let schema = tool.input_schema.as_ref().clone();
    if let Some(kind) = schema.get("type") {
        if kind != "object" {
            return Err(SessionError::Protocol(format!(
                "tool {} has a non-object input schema",
                tool.name
            )));
        }
    }

    Ok(ToolDefinition::new(
        tool.name.to_string(),
        tool.description.map(|d| d.to_string()).unwrap_or_default(),
        Value::Object(schema),
    ))
}

/// Convert a call result into the domain form.
///
/// A text block that carries the serialized `structuredContent` is restored
/// to the structured value it was rendered from.
pub(super) fn tool_result(name: &str, result: CallToolResult) -> SessionResult<ToolResult> {
    let structured = result.structured_content;
    let rendered = structured.as_ref().map(Value::to_string);

    let mut content = result
        .content
        .into_iter()
        .map(|c| match c.raw {
            RawContent::Text(t) if rendered.as_deref() == Some(t.text.as_str()) => Ok(ContentBlock::Structured {
                value: structured.clone().unwrap_or_default(),
            }),
            other => content_block(name, other),
        })
        .collect::<SessionResult<Vec<_>>>()?;

    if content.is_empty() {
        if let Some(value) = structured {
            content.push(ContentBlock::Structured { value });
        }
    }

    if content.is_empty() {
        return Err(SessionError::EmptyResult { tool: name.to_string() });
    }

    Ok(ToolResult {
        content,
        is_error: result.is_error.unwrap_or(false),
    })
}

fn content_block(name: &str, raw: RawContent) -> SessionResult<ContentBlock> {
    match raw {
        RawContent::Text(t) => Ok(ContentBlock::text(t.text)),
        other => serde_json::to_value(&other)
            .map(|value| ContentBlock::Structured { value })
            .map_err(|e| SessionError::Protocol(format!("unreadable content from {}: {}", name, e))),
    }
}
