//! Ollama chat gateway
//!
//! Talks to the native `/api/chat` endpoint in non-streaming mode. Tool
//! definitions are sent as OpenAI-style `function` tools; tool results go back
//! as `tool` role messages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{GatewayError, GatewayResult};
use super::traits::{ModelGateway, ModelReply};
use crate::logging::Logger;
use crate::types::{Message, ToolCallRequest, ToolDefinition};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:latest";
/// Local models can take minutes on a cold start
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(300);

const GATEWAY_NAME: &str = "ollama";

/// Ollama connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }
}

impl OllamaConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: &'a [Message],
    tools: Vec<FunctionTool<'a>>,
}

#[derive(Debug, Serialize)]
struct FunctionTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionSpec<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionSpec<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

fn build_request<'a>(model: &'a str, conversation: &'a [Message], tools: &'a [ToolDefinition]) -> ChatRequest<'a> {
    ChatRequest {
        model,
        stream: false,
        messages: conversation,
        tools: tools
            .iter()
            .map(|t| FunctionTool {
                kind: "function",
                function: FunctionSpec {
                    name: &t.name,
                    description: &t.description,
                    parameters: &t.input_schema,
                },
            })
            .collect(),
    }
}

/// Parse a `/api/chat` response body
fn parse_response(body: &str) -> GatewayResult<ModelReply> {
    let json: Value = serde_json::from_str(body)?;
    let message = json
        .get("message")
        .and_then(Value::as_object)
        .ok_or_else(|| GatewayError::invalid_response(GATEWAY_NAME, "missing 'message' object"))?;

    let content = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let tool_calls = match message.get("tool_calls") {
        Some(Value::Array(calls)) => calls.iter().map(parse_tool_call).collect::<GatewayResult<Vec<_>>>()?,
        _ => Vec::new(),
    };

    Ok(ModelReply { content, tool_calls })
}

fn parse_tool_call(call: &Value) -> GatewayResult<ToolCallRequest> {
    let function = call
        .get("function")
        .ok_or_else(|| GatewayError::invalid_response(GATEWAY_NAME, "tool call without 'function'"))?;

    let name = function
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| GatewayError::invalid_response(GATEWAY_NAME, "tool call without a name"))?;

    // Some models send the arguments as a JSON-encoded string
    let arguments = match function.get("arguments") {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(raw)) if raw.trim().is_empty() => Map::new(),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => {
                return Err(GatewayError::invalid_response(
                    GATEWAY_NAME,
                    format!("arguments of {} are not an object", name),
                ))
            }
        },
        None | Some(Value::Null) => Map::new(),
        Some(_) => {
            return Err(GatewayError::invalid_response(
                GATEWAY_NAME,
                format!("arguments of {} are not an object", name),
            ))
        }
    };

    Ok(ToolCallRequest::new(name, arguments))
}

/// Error text from a non-2xx body (`{"error": "..."}` or raw text)
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Gateway for a local or remote Ollama server
pub struct OllamaGateway {
    config: OllamaConfig,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl OllamaGateway {
    pub fn new(config: OllamaConfig, logger: Arc<dyn Logger>) -> GatewayResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http, logger })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    fn name(&self) -> &str {
        GATEWAY_NAME
    }

    async fn chat(&self, conversation: &[Message], tools: &[ToolDefinition]) -> GatewayResult<ModelReply> {
        self.logger.info(&format!(
            "[OllamaGateway] Chat request: model={}, messages={}, tools={}",
            self.config.model,
            conversation.len(),
            tools.len()
        ));

        let request = build_request(&self.config.model, conversation, tools);
        let response = self
            .http
            .post(self.config.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(self.config.timeout)
                } else {
                    GatewayError::Http(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            self.logger.error(&format!("[OllamaGateway] Request failed ({}): {}", status, body));
            return Err(GatewayError::api(GATEWAY_NAME, status.as_u16(), error_message(&body)));
        }

        self.logger.debug(&format!("[OllamaGateway] Response: {}", body));
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::json;

    fn definitions() -> Vec<ToolDefinition> {
        vec![ToolDefinition::new(
            "get_element",
            "Look up an element",
            json!({ "type": "object", "properties": { "name": { "type": "string" } }, "required": ["name"] }),
        )]
    }

    #[test]
    fn test_default_config() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "qwen2.5:latest");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.with_base_url("http://gpu:11434/").chat_url(), "http://gpu:11434/api/chat");
    }

    #[test]
    fn test_request_shape() {
        let conversation = vec![Message::user("氢元素的详细信息是什么？"), Message::tool("{\"error\":\"x\"}")];
        let tools = definitions();
        let request = serde_json::to_value(build_request("qwen2.5:latest", &conversation, &tools)).unwrap();

        assert_eq!(request["model"], "qwen2.5:latest");
        assert_eq!(request["stream"], false);
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][1]["role"], "tool");
        assert_eq!(request["tools"][0]["type"], "function");
        assert_eq!(request["tools"][0]["function"]["name"], "get_element");
        assert_eq!(request["tools"][0]["function"]["parameters"]["required"][0], "name");
    }

    #[test]
    fn test_parse_text_reply() {
        let reply = parse_response(r#"{"model":"m","message":{"role":"assistant","content":"Hi"},"done":true}"#).unwrap();
        assert_eq!(reply, ModelReply::text("Hi"));
        assert!(!reply.has_tool_calls());
    }

    #[test]
    fn test_parse_tool_calls_in_order() {
        let body = json!({
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    { "function": { "name": "get_element", "arguments": { "name": "氢" } } },
                    { "function": { "name": "get_element_by_position", "arguments": "{\"position\": 6}" } }
                ]
            }
        })
        .to_string();

        let reply = parse_response(&body).unwrap();
        assert_eq!(reply.tool_calls.len(), 2);
        assert_eq!(reply.tool_calls[0].name, "get_element");
        assert_eq!(reply.tool_calls[0].get_arg("name"), Some(&json!("氢")));
        assert_eq!(reply.tool_calls[1].get_arg("position"), Some(&json!(6)));
    }

    #[test]
    fn test_parse_invalid_responses() {
        assert!(matches!(parse_response("{}"), Err(GatewayError::InvalidResponse { .. })));
        assert!(matches!(parse_response("not json"), Err(GatewayError::Json(_))));

        let nameless = json!({ "message": { "content": "", "tool_calls": [{ "function": { "arguments": {} } }] } });
        assert!(matches!(
            parse_response(&nameless.to_string()),
            Err(GatewayError::InvalidResponse { .. })
        ));

        let list_args = json!({ "message": { "tool_calls": [{ "function": { "name": "f", "arguments": [1] } }] } });
        assert!(parse_response(&list_args.to_string()).is_err());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error":"model 'x' not found"}"#), "model 'x' not found");
        assert_eq!(error_message("bad gateway\n"), "bad gateway");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let config = OllamaConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(5));
        let gateway = OllamaGateway::new(config, Arc::new(NoOpLogger)).unwrap();
        let err = gateway.chat(&[Message::user("hi")], &[]).await.unwrap_err();
        assert!(matches!(err, GatewayError::Http(_) | GatewayError::Timeout(_)));
    }
}
