//! Client and server settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::gateway::{OllamaConfig, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use crate::mcp::Endpoint;
use crate::orchestrator::{OrchestratorConfig, DEFAULT_MAX_TURNS};

pub const DEFAULT_PORT: u16 = 9900;

/// Location of the MCP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            path: "/mcp".to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("http://{}:{}{}", self.host, self.port, path)
    }
}

/// Settings for `hello-mcp-client`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: EndpointConfig,
    pub ollama_base_url: String,
    pub model: String,
    /// Maximum model calls per run
    pub max_turns: usize,
    pub tool_timeout_secs: u64,
    pub model_timeout_secs: u64,
    pub abort_on_tool_transport_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            ollama_base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
            tool_timeout_secs: 30,
            model_timeout_secs: 300,
            abort_on_tool_transport_error: false,
        }
    }
}

impl ClientConfig {
    /// Reject values the client cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_turns == 0 {
            return Err(ConfigError::Invalid("max_turns must be at least 1".to_string()));
        }
        if self.tool_timeout_secs == 0 || self.model_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least 1 second".to_string()));
        }
        if self.endpoint.host.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint host must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.endpoint.url()).with_timeout(Duration::from_secs(self.tool_timeout_secs))
    }

    pub fn ollama(&self) -> OllamaConfig {
        OllamaConfig::default()
            .with_base_url(self.ollama_base_url.clone())
            .with_model(self.model.clone())
            .with_timeout(Duration::from_secs(self.model_timeout_secs))
    }

    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_max_turns(self.max_turns)
            .with_abort_on_tool_transport_error(self.abort_on_tool_transport_error)
    }
}

/// Settings for `hello-mcp-server`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint().url, "http://localhost:9900/mcp");
        assert_eq!(config.endpoint().call_timeout, Duration::from_secs(30));
        assert_eq!(config.ollama().timeout, Duration::from_secs(300));
        assert_eq!(config.orchestrator().max_turns, 5);
        assert!(!config.orchestrator().abort_on_tool_transport_error);
    }

    #[test]
    fn test_endpoint_url_normalizes_path() {
        let endpoint = EndpointConfig {
            host: "10.0.0.2".to_string(),
            port: 8080,
            path: "mcp".to_string(),
        };
        assert_eq!(endpoint.url(), "http://10.0.0.2:8080/mcp");
    }

    #[test]
    fn test_validation() {
        let zero_turns = ClientConfig {
            max_turns: 0,
            ..Default::default()
        };
        assert!(matches!(zero_turns.validate(), Err(ConfigError::Invalid(_))));

        let zero_timeout = ClientConfig {
            tool_timeout_secs: 0,
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_server_bind_addr() {
        assert_eq!(ServerConfig::default().bind_addr(), "127.0.0.1:9900");
    }
}
