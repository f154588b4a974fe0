//! YAML configuration file
//!
//! Default location is `<config_dir>/hello-mcp/config.yaml`
//! (`~/.config/hello-mcp/config.yaml` on Linux). A missing file means all
//! defaults; every key is optional.
//!
//! ```yaml
//! client:
//!   endpoint:
//!     host: localhost
//!     port: 9900
//!   model: qwen2.5:latest
//!   max_turns: 5
//! server:
//!   port: 9900
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use super::settings::{ClientConfig, ServerConfig};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub client: ClientConfig,
    pub server: ServerConfig,
}

impl ConfigFile {
    /// `<config_dir>/hello-mcp/config.yaml`
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("hello-mcp").join("config.yaml")
    }

    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ConfigFile = serde_yaml::from_str(&content)?;
        config.client.validate()?;
        Ok(config)
    }

    /// Load from an explicit path if given, otherwise from the default location
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load(Self::default_path()),
        }
    }

    /// Write as YAML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}
