//! Model gateways
//!
//! A gateway sends the conversation plus the available tool definitions to a
//! chat model and returns either final text or tool-call requests.
//!
//! - [`OllamaGateway`]: Ollama's native `/api/chat` over reqwest
//! - [`ScriptedGateway`]: deterministic replies for tests and offline demos

mod error;
mod ollama;
mod scripted;
mod traits;

pub use error::{GatewayError, GatewayResult};
pub use ollama::{OllamaConfig, OllamaGateway, DEFAULT_MODEL_TIMEOUT, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
pub use scripted::{ScriptMode, ScriptedGateway};
pub use traits::{ModelGateway, ModelReply};
