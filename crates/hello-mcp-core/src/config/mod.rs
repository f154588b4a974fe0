//! Configuration for the client and server binaries
//!
//! Values come from an optional YAML file; command-line flags override them.

mod error;
mod file;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use file::ConfigFile;
pub use settings::{ClientConfig, EndpointConfig, ServerConfig, DEFAULT_PORT};
