//! hello-mcp-client: talks to hello-mcp-server.
//!
//! - `test`: calls the tools directly over MCP sessions
//! - `ollama`: lets a local Ollama model decide which tools to call

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use serde_json::json;
use thiserror::Error;

use hello_mcp_core::config::{ClientConfig, ConfigError, ConfigFile};
use hello_mcp_core::mcp::McpSession;
use hello_mcp_core::tools::{GET_ELEMENT, GET_ELEMENT_BY_POSITION};
use hello_mcp_core::{
    CancellationToken, ConsoleLogger, Conversation, GatewayError, Logger, OllamaGateway, OrchestrationError,
    Orchestrator, RemoteToolExecutor, RunFailure, RunOutcome, SessionError,
};

const DEFAULT_QUERY: &str = "氢元素的详细信息是什么？";

#[derive(Error, Debug)]
enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Call each tool directly
    Test,
    /// Answer a question with an Ollama model driving the tools
    Ollama,
}

#[derive(Parser)]
#[command(name = "hello-mcp-client", version, about = "MCP client for hello-mcp-server")]
struct Args {
    #[arg(value_enum)]
    mode: Mode,

    /// Server port (default 9900).
    #[arg(short, long)]
    port: Option<u16>,

    /// Question for ollama mode.
    #[arg(short, long)]
    query: Option<String>,

    /// Ollama model (default qwen2.5:latest).
    #[arg(short, long)]
    model: Option<String>,

    /// Config file (default: <config_dir>/hello-mcp/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print debug logs.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::with_prefix("[hello-mcp-client]").verbose(args.verbose));

    match run(args, logger.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, logger: Arc<dyn Logger>) -> Result<(), ClientError> {
    let config = client_config(&args, ConfigFile::load_or_default(args.config.as_deref())?.client);
    config.validate()?;

    match args.mode {
        Mode::Test => run_test(&config, logger).await,
        Mode::Ollama => {
            let query = args.query.unwrap_or_else(|| DEFAULT_QUERY.to_string());
            run_ollama(&config, &query, logger).await
        }
    }
}

/// Apply command-line overrides on top of the file configuration
fn client_config(args: &Args, mut config: ClientConfig) -> ClientConfig {
    if let Some(port) = args.port {
        config.endpoint.port = port;
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    config
}

/// List the tools, then look up hydrogen by name and carbon by position
async fn run_test(config: &ClientConfig, logger: Arc<dyn Logger>) -> Result<(), ClientError> {
    let endpoint = config.endpoint();

    let mut session = McpSession::open(&endpoint, logger.clone()).await?;
    let tools = session.list_tools().await;
    session.close().await;
    for tool in tools? {
        println!("Tool: {} - {}", tool.name, tool.description);
    }

    let lookups = [
        (GET_ELEMENT, json!({ "name": "氢" })),
        (GET_ELEMENT_BY_POSITION, json!({ "position": 6 })),
    ];
    for (name, arguments) in lookups {
        let mut session = McpSession::open(&endpoint, logger.clone()).await?;
        let result = session
            .call_tool(name, arguments.as_object().cloned().unwrap_or_default())
            .await;
        session.close().await;
        println!("{}: {}", name, result?.to_message_content());
    }

    Ok(())
}

async fn run_ollama(config: &ClientConfig, query: &str, logger: Arc<dyn Logger>) -> Result<(), ClientError> {
    let gateway = OllamaGateway::new(config.ollama(), logger.clone())?;
    let tools = RemoteToolExecutor::new(config.endpoint(), logger.clone());
    let orchestrator = Orchestrator::new(Arc::new(gateway), Arc::new(tools), logger.clone())
        .with_config(config.orchestrator());

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    println!("Query: {}", query);
    match orchestrator.run(query, cancel).await {
        Ok(RunOutcome::Answered { answer, turns, .. }) => {
            logger.debug(&format!("Answered in {} turn(s)", turns));
            println!("Answer: {}", answer);
            Ok(())
        }
        Ok(RunOutcome::TurnLimitExceeded {
            conversation,
            last_reply,
            turns,
        }) => {
            logger.warn(&format!("Model still wanted {} tool call(s)", last_reply.tool_calls.len()));
            print!("{}", transcript(&conversation));
            println!("{}", NO_ANSWER);
            Err(OrchestrationError::TurnLimitExceeded { max_turns: turns }.into())
        }
        Err(RunFailure { error, conversation }) => {
            print!("{}", transcript(&conversation));
            println!("{}", NO_ANSWER);
            Err(error.into())
        }
    }
}

const NO_ANSWER: &str = "(no final answer reached)";

/// One `[role] content` line per message
fn transcript(conversation: &Conversation) -> String {
    conversation
        .messages()
        .iter()
        .map(|m| format!("[{}] {}\n", m.role, m.content))
        .collect()
}
