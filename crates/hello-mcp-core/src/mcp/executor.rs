//! Tool execution seam used by the orchestrator

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::session::{Endpoint, McpSession, SessionResult};
use crate::logging::Logger;
use crate::tools::ToolRegistry;
use crate::types::{ToolCallRequest, ToolDefinition, ToolResult};

/// Discovers and invokes tools
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// All tools available to the model
    async fn list_tools(&self) -> SessionResult<Vec<ToolDefinition>>;

    /// Execute a single call. Tool-level failures are `Ok` with `is_error` set.
    async fn call_tool(&self, call: &ToolCallRequest) -> SessionResult<ToolResult>;
}

/// Executes tools on a remote MCP server, one session per operation
#[derive(Clone)]
pub struct RemoteToolExecutor {
    endpoint: Endpoint,
    logger: Arc<dyn Logger>,
}

impl RemoteToolExecutor {
    pub fn new(endpoint: Endpoint, logger: Arc<dyn Logger>) -> Self {
        Self { endpoint, logger }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl ToolExecutor for RemoteToolExecutor {
    async fn list_tools(&self) -> SessionResult<Vec<ToolDefinition>> {
        let mut session = McpSession::open(&self.endpoint, self.logger.clone()).await?;
        let tools = session.list_tools().await;
        session.close().await;
        tools
    }

    async fn call_tool(&self, call: &ToolCallRequest) -> SessionResult<ToolResult> {
        let mut session = McpSession::open(&self.endpoint, self.logger.clone()).await?;
        let result = session.call_tool(&call.name, call.arguments.clone()).await;
        session.close().await;
        result
    }
}

impl std::fmt::Debug for RemoteToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteToolExecutor")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// In-process execution straight against a registry
#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn list_tools(&self) -> SessionResult<Vec<ToolDefinition>> {
        Ok(self.list())
    }

    async fn call_tool(&self, call: &ToolCallRequest) -> SessionResult<ToolResult> {
        Ok(self.dispatch_lenient(&call.name, &Value::Object(call.arguments.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::tools::{element_registry, GET_ELEMENT, GET_ELEMENT_BY_POSITION};
    use serde_json::json;

    #[tokio::test]
    async fn test_registry_executor_lists_and_calls() {
        let executor: Arc<dyn ToolExecutor> = Arc::new(element_registry(Arc::new(NoOpLogger)).unwrap());

        let tools = executor.list_tools().await.unwrap();
        assert_eq!(tools.len(), 2);

        let result = executor
            .call_tool(&ToolCallRequest::from_value(GET_ELEMENT, json!({ "name": "氢" })))
            .await
            .unwrap();
        assert!(result.text().contains("symbol: H"));
    }

    #[tokio::test]
    async fn test_registry_executor_folds_dispatch_errors() {
        let executor = element_registry(Arc::new(NoOpLogger)).unwrap();

        let unknown = executor
            .call_tool(&ToolCallRequest::from_value("get_weather", json!({})))
            .await
            .unwrap();
        assert!(unknown.is_error);
        assert!(unknown.text().contains("Unknown tool"));

        let invalid = executor
            .call_tool(&ToolCallRequest::from_value(GET_ELEMENT_BY_POSITION, json!({ "position": "6" })))
            .await
            .unwrap();
        assert!(invalid.is_error);
    }

    #[tokio::test]
    async fn test_remote_executor_connection_failure() {
        let endpoint = Endpoint::new("http://127.0.0.1:9/mcp");
        let executor = RemoteToolExecutor::new(endpoint, Arc::new(NoOpLogger));
        assert!(executor.list_tools().await.is_err());
    }
}
