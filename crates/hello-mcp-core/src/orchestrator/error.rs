//! Orchestration error and outcome types

use thiserror::Error;

use crate::gateway::{GatewayError, ModelReply};
use crate::mcp::SessionError;
use crate::types::Conversation;

/// Why a run stopped without an answer
#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("Tool session failed: {0}")]
    Session(#[from] SessionError),

    #[error("Model gateway failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Run cancelled")]
    Cancelled,

    #[error("No final answer after {max_turns} model turns")]
    TurnLimitExceeded { max_turns: usize },
}

pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// A failed run: the error plus the conversation as far as it got
#[derive(Error, Debug)]
#[error("{error}")]
pub struct RunFailure {
    pub error: OrchestrationError,
    pub conversation: Conversation,
}

/// Terminal state of a completed run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The model produced a reply without tool calls
    Answered {
        answer: String,
        conversation: Conversation,
        turns: usize,
    },
    /// The model was still requesting tools when the turn cap was reached
    TurnLimitExceeded {
        conversation: Conversation,
        last_reply: ModelReply,
        turns: usize,
    },
}

impl RunOutcome {
    pub fn conversation(&self) -> &Conversation {
        match self {
            RunOutcome::Answered { conversation, .. } | RunOutcome::TurnLimitExceeded { conversation, .. } => {
                conversation
            }
        }
    }

    /// Number of model calls made
    pub fn turns(&self) -> usize {
        match self {
            RunOutcome::Answered { turns, .. } | RunOutcome::TurnLimitExceeded { turns, .. } => *turns,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, RunOutcome::Answered { .. })
    }

    /// The final answer, or `TurnLimitExceeded` if there is none
    pub fn into_answer(self) -> OrchestrationResult<String> {
        match self {
            RunOutcome::Answered { answer, .. } => Ok(answer),
            RunOutcome::TurnLimitExceeded { turns, .. } => {
                Err(OrchestrationError::TurnLimitExceeded { max_turns: turns })
            }
        }
    }
}
