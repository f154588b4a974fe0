//! Scripted gateway for tests and offline runs
//!
//! Replies deterministically without any network access, and records every
//! conversation it was shown.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{GatewayError, GatewayResult};
use super::traits::{ModelGateway, ModelReply};
use crate::logging::Logger;
use crate::types::{Message, MessageRole, ToolCallRequest, ToolDefinition};

/// How the scripted gateway answers
#[derive(Debug, Clone)]
pub enum ScriptMode {
    /// Play back the replies in order; running out is an error
    Turns(Vec<ModelReply>),
    /// Request the same tool call on every turn
    AlwaysTool(ToolCallRequest),
    /// Echo back the last user message
    Echo,
    /// Fail every turn with the given message
    Error(String),
}

impl Default for ScriptMode {
    fn default() -> Self {
        ScriptMode::Echo
    }
}

/// Deterministic [`ModelGateway`]
pub struct ScriptedGateway {
    mode: ScriptMode,
    /// Remaining replies in `Turns` mode
    queue: Mutex<VecDeque<ModelReply>>,
    /// Every conversation received, in call order
    received: Mutex<Vec<Vec<Message>>>,
    delay: Option<Duration>,
    logger: Arc<dyn Logger>,
}

impl ScriptedGateway {
    pub fn new(mode: ScriptMode, logger: Arc<dyn Logger>) -> Self {
        let queue = match &mode {
            ScriptMode::Turns(turns) => turns.iter().cloned().collect(),
            _ => VecDeque::new(),
        };
        Self {
            mode,
            queue: Mutex::new(queue),
            received: Mutex::new(Vec::new()),
            delay: None,
            logger,
        }
    }

    /// Play back `turns` in order
    pub fn turns(turns: Vec<ModelReply>, logger: Arc<dyn Logger>) -> Self {
        Self::new(ScriptMode::Turns(turns), logger)
    }

    /// Request `call` forever
    pub fn always_tool(call: ToolCallRequest, logger: Arc<dyn Logger>) -> Self {
        Self::new(ScriptMode::AlwaysTool(call), logger)
    }

    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::new(ScriptMode::Echo, logger)
    }

    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::new(ScriptMode::Error(message.into()), logger)
    }

    /// Wait this long before every reply
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Conversations seen so far, one per turn
    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received.lock().clone()
    }

    /// Number of turns served
    pub fn call_count(&self) -> usize {
        self.received.lock().len()
    }

    fn next_reply(&self, conversation: &[Message]) -> GatewayResult<ModelReply> {
        match &self.mode {
            ScriptMode::Turns(_) => self
                .queue
                .lock()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("script exhausted".to_string())),
            ScriptMode::AlwaysTool(call) => Ok(ModelReply::tool_calls(vec![call.clone()])),
            ScriptMode::Echo => {
                let last_user = conversation
                    .iter()
                    .rev()
                    .find(|m| m.role == MessageRole::User)
                    .map(|m| m.content.clone())
                    .unwrap_or_else(|| "Hello from ScriptedGateway!".to_string());
                Ok(ModelReply::text(last_user))
            }
            ScriptMode::Error(message) => Err(GatewayError::Other(message.clone())),
        }
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, conversation: &[Message], tools: &[ToolDefinition]) -> GatewayResult<ModelReply> {
        self.logger.debug(&format!(
            "[ScriptedGateway] Turn with {} messages, {} tools",
            conversation.len(),
            tools.len()
        ));
        self.received.lock().push(conversation.to_vec());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.next_reply(conversation)
    }
}
