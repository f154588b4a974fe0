//! Tool definition, call and result types

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Tool definition advertised by a server and offered to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (function name), unique within a registry
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Names listed in the schema's `required` array
    pub fn required_parameters(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool being called
    pub name: String,
    /// Untyped argument bag, validated against the schema at dispatch time
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    /// Create a new tool call
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Create a tool call from a JSON object literal. Non-object values give an empty bag.
    pub fn from_value(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(name, arguments)
    }

    /// Get an input argument by key
    pub fn get_arg(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }
}

/// One unit of tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Structured { value: Value },
}

impl ContentBlock {
    /// Create a text content block
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Render this block as plain text (structured values as compact JSON)
    pub fn render(&self) -> String {
        match self {
            ContentBlock::Text { text } => text.clone(),
            ContentBlock::Structured { value } => value.to_string(),
        }
    }
}

/// Result of a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// The result content
    pub content: Vec<ContentBlock>,
    /// Whether this result represents a tool-level failure
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful single-text result
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(message)],
            is_error: true,
        }
    }

    /// All blocks rendered and joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(ContentBlock::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text handed back to the model in a `tool` message.
    ///
    /// Errors are wrapped as `{"error": "..."}` so the model can tell them apart
    /// from a record.
    pub fn to_message_content(&self) -> String {
        if self.is_error {
            json!({ "error": self.text() }).to_string()
        } else {
            self.text()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new(
            "get_element",
            "Look up an element",
            json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            }),
        );

        assert_eq!(tool.name, "get_element");
        assert_eq!(tool.required_parameters(), vec!["name"]);

        let json = serde_json::to_value(&tool).unwrap();
        assert!(json.get("inputSchema").is_some());
    }

    #[test]
    fn test_tool_call_from_value() {
        let call = ToolCallRequest::from_value("get_element", json!({ "name": "氢" }));
        assert_eq!(call.get_arg("name"), Some(&json!("氢")));

        let empty = ToolCallRequest::from_value("get_element", Value::Null);
        assert!(empty.arguments.is_empty());
    }

    #[test]
    fn test_tool_result_message_content() {
        let ok = ToolResult::success("Element: 碳");
        assert!(!ok.is_error);
        assert_eq!(ok.to_message_content(), "Element: 碳");

        let err = ToolResult::error("atomic number must be between 1 and 118");
        let parsed: Value = serde_json::from_str(&err.to_message_content()).unwrap();
        assert_eq!(parsed["error"], "atomic number must be between 1 and 118");
    }

    #[test]
    fn test_structured_block_renders_as_json() {
        let result = ToolResult {
            content: vec![
                ContentBlock::text("header"),
                ContentBlock::Structured { value: json!({ "symbol": "H" }) },
            ],
            is_error: false,
        };
        assert_eq!(result.text(), "header\n{\"symbol\":\"H\"}");
    }
}
