//! Multi-turn orchestration
//!
//! The [`Orchestrator`] discovers tools once, then alternates between model
//! turns and tool batches until the model answers without requesting tools or
//! the turn cap is reached.

mod engine;
mod error;

pub use engine::{Orchestrator, OrchestratorConfig, DEFAULT_MAX_TURNS};
pub use error::{OrchestrationError, OrchestrationResult, RunFailure, RunOutcome};
