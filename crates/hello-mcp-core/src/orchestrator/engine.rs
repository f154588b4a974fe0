//! The turn loop
//!
//! ```text
//!   AwaitingModel ──no tool calls──────────────▶ Done (Answered)
//!        │  ▲
//!   tool │  │ results appended
//!  calls ▼  │
//!   ExecutingTools
//!
//!   AwaitingModel ──tool calls at max_turns───▶ Done (TurnLimitExceeded)
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;

use super::error::{OrchestrationError, OrchestrationResult, RunFailure, RunOutcome};
use crate::gateway::{ModelGateway, ModelReply};
use crate::logging::Logger;
use crate::mcp::{SessionError, ToolExecutor};
use crate::types::{CancellationToken, Conversation, Message, ToolCallRequest, ToolDefinition, ToolResult};

pub const DEFAULT_MAX_TURNS: usize = 5;

/// Loop limits and failure policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Maximum number of model calls per run (at least 1)
    pub max_turns: usize,
    /// Fail the run when a tool call cannot be delivered, instead of handing
    /// the failure to the model as an error result
    pub abort_on_tool_transport_error: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            abort_on_tool_transport_error: false,
        }
    }
}

impl OrchestratorConfig {
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    pub fn with_abort_on_tool_transport_error(mut self, abort: bool) -> Self {
        self.abort_on_tool_transport_error = abort;
        self
    }
}

enum RunState {
    AwaitingModel,
    ExecutingTools(Vec<ToolCallRequest>),
    Done(Terminal),
}

enum Terminal {
    Answered(String),
    TurnLimitExceeded(ModelReply),
}

/// Drives a model and a tool executor until the model answers
pub struct Orchestrator {
    gateway: Arc<dyn ModelGateway>,
    tools: Arc<dyn ToolExecutor>,
    config: OrchestratorConfig,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn ModelGateway>, tools: Arc<dyn ToolExecutor>, logger: Arc<dyn Logger>) -> Self {
        Self {
            gateway,
            tools,
            config: OrchestratorConfig::default(),
            logger,
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        let max_turns = config.max_turns.max(1);
        self.config = OrchestratorConfig { max_turns, ..config };
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run one exchange, starting from `query` as the only message
    pub async fn run(&self, query: &str, cancel: CancellationToken) -> Result<RunOutcome, RunFailure> {
        let mut conversation = Conversation::from_query(query);
        let mut turns = 0;

        match self.drive(&mut conversation, &mut turns, &cancel).await {
            Ok(Terminal::Answered(answer)) => {
                self.logger.info(&format!("[Orchestrator] Answered after {} turn(s)", turns));
                Ok(RunOutcome::Answered {
                    answer,
                    conversation,
                    turns,
                })
            }
            Ok(Terminal::TurnLimitExceeded(last_reply)) => {
                self.logger.warn(&format!(
                    "[Orchestrator] Turn limit of {} reached without a final answer",
                    self.config.max_turns
                ));
                Ok(RunOutcome::TurnLimitExceeded {
                    conversation,
                    last_reply,
                    turns,
                })
            }
            Err(error) => {
                self.logger.error(&format!("[Orchestrator] Run failed: {}", error));
                Err(RunFailure { error, conversation })
            }
        }
    }

    async fn drive(
        &self,
        conversation: &mut Conversation,
        turns: &mut usize,
        cancel: &CancellationToken,
    ) -> OrchestrationResult<Terminal> {
        let tools = until_cancelled(cancel, self.tools.list_tools()).await??;
        self.logger.info(&format!("[Orchestrator] Discovered {} tools", tools.len()));

        let mut state = RunState::AwaitingModel;
        loop {
            state = match state {
                RunState::AwaitingModel => self.model_turn(conversation, &tools, turns, cancel).await?,
                RunState::ExecutingTools(calls) => {
                    let (results, transport_error) = self.execute_batch(&calls, cancel).await?;
                    for result in results {
                        conversation.push(Message::tool(result.to_message_content()));
                    }
                    if let Some(e) = transport_error {
                        return Err(e.into());
                    }
                    RunState::AwaitingModel
                }
                RunState::Done(terminal) => return Ok(terminal),
            };
        }
    }

    async fn model_turn(
        &self,
        conversation: &mut Conversation,
        tools: &[ToolDefinition],
        turns: &mut usize,
        cancel: &CancellationToken,
    ) -> OrchestrationResult<RunState> {
        if cancel.is_cancelled() {
            return Err(OrchestrationError::Cancelled);
        }

        *turns += 1;
        self.logger.debug(&format!(
            "[Orchestrator] Model turn {}/{} via {}",
            turns,
            self.config.max_turns,
            self.gateway.name()
        ));

        let reply = until_cancelled(cancel, self.gateway.chat(conversation.messages(), tools)).await??;
        conversation.push(Message::assistant(reply.content.clone()));

        if !reply.has_tool_calls() {
            return Ok(RunState::Done(Terminal::Answered(reply.content)));
        }
        if *turns >= self.config.max_turns {
            return Ok(RunState::Done(Terminal::TurnLimitExceeded(reply)));
        }
        Ok(RunState::ExecutingTools(reply.tool_calls))
    }

    /// Run every call of the batch concurrently; results come back in request order.
    ///
    /// Failed deliveries are folded into error results. The first one is also
    /// returned when the run is configured to abort on it.
    async fn execute_batch(
        &self,
        calls: &[ToolCallRequest],
        cancel: &CancellationToken,
    ) -> OrchestrationResult<(Vec<ToolResult>, Option<SessionError>)> {
        self.logger.info(&format!("[Orchestrator] Executing {} tool call(s)", calls.len()));

        let batch = join_all(calls.iter().map(|call| self.tools.call_tool(call)));
        let outcomes = until_cancelled(cancel, batch).await?;

        let mut results = Vec::with_capacity(outcomes.len());
        let mut transport_error = None;
        for (call, outcome) in calls.iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    self.logger.warn(&format!("[Orchestrator] Tool {} failed: {}", call.name, e));
                    results.push(ToolResult::error(e.to_string()));
                    if self.config.abort_on_tool_transport_error && transport_error.is_none() {
                        transport_error = Some(e);
                    }
                }
            }
        }

        Ok((results, transport_error))
    }
}

async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> OrchestrationResult<F::Output> {
    cancel.run_until_cancelled(fut).await.ok_or(OrchestrationError::Cancelled)
}
