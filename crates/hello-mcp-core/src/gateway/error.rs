//! Model gateway error types

use thiserror::Error;

/// Errors that can occur while talking to a model
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API request failed
    #[error("{gateway} API error ({status}): {message}")]
    Api {
        gateway: String,
        status: u16,
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Invalid response from {gateway}: {message}")]
    InvalidResponse { gateway: String, message: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model call timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Create an API error
    pub fn api(gateway: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            gateway: gateway.into(),
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(gateway: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            gateway: gateway.into(),
            message: message.into(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
