//! Hello MCP Core
//!
//! Tool serving and model-driven tool use over the Model Context Protocol.
//! This crate holds everything the `hello-mcp-server` and `hello-mcp-client`
//! binaries are made of:
//!
//! - `tools`: schema-typed tool registry and the bundled periodic table tools
//! - `mcp`: rmcp server handler, per-operation client sessions, `ToolExecutor`
//! - `gateway`: chat model gateways (Ollama, scripted)
//! - `orchestrator`: the multi-turn loop between a model and the tools
//!
//! ## Orchestration
//!
//! ```rust,ignore
//! use hello_mcp_core::{
//!     CancellationToken, Endpoint, OllamaConfig, OllamaGateway, Orchestrator, RemoteToolExecutor,
//! };
//!
//! let tools = Arc::new(RemoteToolExecutor::new(Endpoint::localhost(9900), logger.clone()));
//! let gateway = Arc::new(OllamaGateway::new(OllamaConfig::default(), logger.clone())?);
//!
//! let outcome = Orchestrator::new(gateway, tools, logger)
//!     .run("氢元素的详细信息是什么？", CancellationToken::new())
//!     .await?;
//! println!("{}", outcome.into_answer()?);
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod tools;
pub mod mcp;
pub mod gateway;
pub mod orchestrator;

// Re-export commonly used types
pub use types::{
    CancellationToken, ContentBlock, Conversation, Message, MessageRole, ToolCallRequest, ToolDefinition,
    ToolResult,
};

pub use logging::{ConsoleLogger, Logger, NoOpLogger};

pub use config::{ClientConfig, ConfigError, ConfigFile, ServerConfig};

pub use tools::{element_registry, DispatchError, ParamKind, ParameterSchema, ToolRegistry, ToolSpec};

pub use mcp::{mcp_router, Endpoint, McpSession, RemoteToolExecutor, SessionError, ToolExecutor, ToolServer};

pub use gateway::{GatewayError, ModelGateway, ModelReply, OllamaConfig, OllamaGateway, ScriptedGateway};

pub use orchestrator::{OrchestrationError, Orchestrator, OrchestratorConfig, RunFailure, RunOutcome};
