//! Model gateway trait definition

use async_trait::async_trait;

use super::error::GatewayResult;
use crate::types::{Message, ToolCallRequest, ToolDefinition};

/// One model turn: either final text or a batch of tool calls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    /// Assistant text, possibly empty when tools are requested
    pub content: String,
    /// Requested tool calls, in the order the model listed them
    pub tool_calls: Vec<ToolCallRequest>,
}

impl ModelReply {
    /// A final text answer
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// A reply that requests tools
    pub fn tool_calls(calls: Vec<ToolCallRequest>) -> Self {
        Self {
            content: String::new(),
            tool_calls: calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A chat model that can request tools
///
/// The conversation and the tool definitions are the only inputs of a turn.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Gateway name used in logs and errors (e.g. "ollama")
    fn name(&self) -> &str;

    /// Run one chat turn
    async fn chat(&self, conversation: &[Message], tools: &[ToolDefinition]) -> GatewayResult<ModelReply>;
}
