//! Tool registry and dispatcher
//!
//! The ToolRegistry is an explicit value built once at startup and handed to
//! whatever needs it (the MCP server handler, an in-process executor, tests).
//! It is responsible for:
//! - Keeping tool definitions unique and in registration order
//! - Binding call arguments against each tool's parameter schema
//! - Turning handler failures into `is_error` results

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::schema::{BoundArguments, ParameterSchema};
use crate::logging::Logger;
use crate::types::{ToolDefinition, ToolResult};

/// Dispatch-time failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid argument '{field}' for {tool}: {reason}")]
    InvalidArgument {
        tool: String,
        field: String,
        reason: String,
    },

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Business-rule or execution failure reported by a handler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ToolFailure(pub String);

impl ToolFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Executes a tool once its arguments are bound
pub trait ToolHandler: Send + Sync {
    fn call(&self, arguments: &BoundArguments) -> Result<ToolResult, ToolFailure>;
}

/// Adapts a plain function or closure into a [`ToolHandler`]
struct FnHandler<F>(F);

impl<F> ToolHandler for FnHandler<F>
where
    F: Fn(&BoundArguments) -> Result<ToolResult, ToolFailure> + Send + Sync,
{
    fn call(&self, arguments: &BoundArguments) -> Result<ToolResult, ToolFailure> {
        (self.0)(arguments)
    }
}

/// Name, description and parameters of a tool to register
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ParameterSchema::new(),
        }
    }

    /// Set the parameter schema
    pub fn with_parameters(mut self, parameters: ParameterSchema) -> Self {
        self.parameters = parameters;
        self
    }

    /// Wire-level definition with the rendered JSON Schema
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            self.name.clone(),
            self.description.clone(),
            self.parameters.to_json_schema(),
        )
    }
}

struct RegisteredTool {
    definition: ToolDefinition,
    parameters: ParameterSchema,
    handler: Arc<dyn ToolHandler>,
}

/// Registry of named, schema-typed tools
pub struct ToolRegistry {
    /// Tools in registration order
    tools: Vec<RegisteredTool>,
    /// Name -> index into `tools`
    index: HashMap<String, usize>,
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            logger,
        }
    }

    /// Register a tool. Fails if the name is already taken.
    pub fn register(&mut self, spec: ToolSpec, handler: impl ToolHandler + 'static) -> DispatchResult<()> {
        if self.index.contains_key(&spec.name) {
            return Err(DispatchError::DuplicateTool(spec.name));
        }

        self.logger.debug(&format!("[ToolRegistry] Registered tool: {}", spec.name));

        self.index.insert(spec.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            definition: spec.definition(),
            parameters: spec.parameters,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Register a function or closure as a tool
    pub fn register_fn<F>(&mut self, spec: ToolSpec, handler: F) -> DispatchResult<()>
    where
        F: Fn(&BoundArguments) -> Result<ToolResult, ToolFailure> + Send + Sync + 'static,
    {
        self.register(spec, FnHandler(handler))
    }

    /// All tool definitions, in registration order
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&i| &self.tools[i].definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get count of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Bind `arguments` and invoke the named tool.
    ///
    /// Unknown names and arguments that fail to bind are errors; everything the
    /// handler reports, including its own failures, comes back as a `ToolResult`.
    pub fn dispatch(&self, name: &str, arguments: &Value) -> DispatchResult<ToolResult> {
        let tool = self
            .index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let bound = tool
            .parameters
            .bind(arguments)
            .map_err(|e| DispatchError::InvalidArgument {
                tool: name.to_string(),
                field: e.field,
                reason: e.reason,
            })?;

        self.logger.info(&format!("[ToolRegistry] Dispatching tool: {}", name));

        let result = match tool.handler.call(&bound) {
            Ok(result) if result.content.is_empty() => {
                self.logger.warn(&format!("[ToolRegistry] Tool {} returned no content", name));
                ToolResult::error(format!("Tool {} returned no content", name))
            }
            Ok(result) => result,
            Err(failure) => {
                self.logger.warn(&format!("[ToolRegistry] Tool {} failed: {}", name, failure));
                ToolResult::error(failure.to_string())
            }
        };

        Ok(result)
    }

    /// Like `dispatch`, but folds dispatch errors into an `is_error` result so a
    /// caller can hand them to a model as context.
    pub fn dispatch_lenient(&self, name: &str, arguments: &Value) -> ToolResult {
        self.dispatch(name, arguments).unwrap_or_else(|e| {
            self.logger.warn(&format!("[ToolRegistry] Dispatch rejected: {}", e));
            ToolResult::error(e.to_string())
        })
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| &t.definition.name).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::tools::ParamKind;
    use serde_json::json;

    fn echo_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry
            .register_fn(
                ToolSpec::new("echo", "Echo a word")
                    .with_parameters(ParameterSchema::new().required("word", ParamKind::String, "word")),
                |args: &BoundArguments| Ok(ToolResult::success(args.get_str("word").unwrap_or_default())),
            )
            .unwrap();
        registry
            .register_fn(
                ToolSpec::new("fail", "Always fails"),
                |_: &BoundArguments| Err(ToolFailure::new("boom")),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = echo_registry();
        let err = registry
            .register_fn(ToolSpec::new("echo", "again"), |_: &BoundArguments| {
                Ok(ToolResult::success("x"))
            })
            .unwrap_err();
        assert_eq!(err, DispatchError::DuplicateTool("echo".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let names: Vec<_> = echo_registry().list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["echo", "fail"]);
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let err = echo_registry().dispatch("missing", &json!({})).unwrap_err();
        assert_eq!(err, DispatchError::UnknownTool("missing".to_string()));
    }

    #[test]
    fn test_dispatch_invalid_argument_skips_handler() {
        let err = echo_registry().dispatch("echo", &json!({ "word": 3 })).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArgument { ref field, .. } if field == "word"));
    }

    #[test]
    fn test_handler_failure_becomes_error_result() {
        let result = echo_registry().dispatch("fail", &json!({})).unwrap();
        assert!(result.is_error);
        assert_eq!(result.text(), "boom");
    }

    #[test]
    fn test_dispatch_lenient_folds_errors() {
        let registry = echo_registry();
        let result = registry.dispatch_lenient("missing", &json!({}));
        assert!(result.is_error);
        assert!(result.text().contains("Unknown tool"));

        let ok = registry.dispatch_lenient("echo", &json!({ "word": "hi" }));
        assert!(!ok.is_error);
        assert_eq!(ok.text(), "hi");
    }

    #[test]
    fn test_empty_handler_output_is_an_error() {
        let mut registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry
            .register_fn(ToolSpec::new("silent", "Returns nothing"), |_: &BoundArguments| {
                Ok(ToolResult { content: vec![], is_error: false })
            })
            .unwrap();
        let result = registry.dispatch("silent", &json!({})).unwrap();
        assert!(result.is_error);
        assert!(!result.content.is_empty());
    }
}
