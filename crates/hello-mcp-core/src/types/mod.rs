//! Core types shared by the registry, the protocol session and the orchestrator

mod message;
mod tool;
mod cancellation;

pub use message::{Conversation, Message, MessageRole};
pub use tool::{ContentBlock, ToolCallRequest, ToolDefinition, ToolResult};
pub use cancellation::CancellationToken;
