//! MCP (Model Context Protocol) plumbing
//!
//! Both sides use the official rmcp SDK over streamable HTTP:
//! - `server`: exposes a [`ToolRegistry`](crate::tools::ToolRegistry) at `/mcp`
//! - `session`: one client session per unit of work (open, list/call, close)
//! - `executor`: the [`ToolExecutor`] seam the orchestrator drives
//!
//! # Example
//!
//! ```rust,ignore
//! use hello_mcp_core::mcp::{Endpoint, McpSession};
//!
//! let mut session = McpSession::open(&Endpoint::localhost(9900), logger).await?;
//! let tools = session.list_tools().await?;
//! let result = session.call_tool("get_element", args).await?;
//! session.close().await;
//! ```

mod executor;
mod server;
mod session;

pub use executor::{RemoteToolExecutor, ToolExecutor};
pub use server::{mcp_router, serve, ToolServer, SERVER_NAME};
pub use session::{Endpoint, McpSession, SessionError, SessionResult, DEFAULT_CALL_TIMEOUT};
