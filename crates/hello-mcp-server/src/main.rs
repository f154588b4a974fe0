//! hello-mcp-server: serves the periodic table tools over MCP.
//!
//! Streamable HTTP at `/mcp`, plus a `/health` check.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tokio::net::TcpListener;

use hello_mcp_core::config::{ConfigError, ConfigFile, ServerConfig};
use hello_mcp_core::mcp::{mcp_router, serve};
use hello_mcp_core::{element_registry, ConsoleLogger, DispatchError, Logger};

#[derive(Error, Debug)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Tool registration failed: {0}")]
    Registry(#[from] DispatchError),

    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "hello-mcp-server", version, about = "MCP server exposing periodic table lookups")]
struct Args {
    /// Port to listen on (default 9900).
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (default 127.0.0.1).
    #[arg(long)]
    host: Option<String>,

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
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::with_prefix("[hello-mcp-server]").verbose(args.verbose));

    match run(args, logger.clone()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, logger: Arc<dyn Logger>) -> Result<(), ServerError> {
    let server = server_config(&args, ConfigFile::load_or_default(args.config.as_deref())?.server);

    let registry = element_registry(logger.clone())?;
    logger.info(&format!("Registered {} tools", registry.len()));

    let addr = server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr: addr.clone(), source })?;

    let shutdown_logger = logger.clone();
    let shutdown = async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_logger.info("Ctrl-C received, shutting down");
        }
    };

    serve(listener, mcp_router(Arc::new(registry), logger.clone()), logger, shutdown).await?;
    Ok(())
}

/// Apply command-line overrides on top of the file configuration
fn server_config(args: &Args, mut config: ServerConfig) -> ServerConfig {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("hello-mcp-server").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults_to_localhost_9900() {
        let args = parse(&[]).unwrap();
        let config = server_config(&args, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:9900");
    }

    #[test]
    fn test_flags_override_file_config() {
        let args = parse(&["-p", "9911", "--host", "0.0.0.0"]).unwrap();
        let file = ServerConfig {
            host: "10.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(server_config(&args, file).bind_addr(), "0.0.0.0:9911");
    }

    #[test]
    fn test_file_config_kept_without_flags() {
        let args = parse(&["-v"]).unwrap();
        assert!(args.verbose);
        let file = ServerConfig {
            host: "10.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(server_config(&args, file).bind_addr(), "10.0.0.1:9000");
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse(&["-p", "70000"]).is_err());
        assert!(parse(&["serve"]).is_err());
    }
}
