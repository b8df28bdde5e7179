//! Configuration module
//!
//! Handles loading and saving CirrusNet node configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::protocol::WireLimits;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Wire protocol limits
    #[serde(default)]
    pub protocol: ProtocolConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            protocol: ProtocolConfig::default(),
        }
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Unique node identifier (auto-generated if not set)
    pub node_id: Option<String>,
    /// Human-readable name for this node
    pub name: String,
    /// Service groups this node manages
    #[serde(default)]
    pub groups: Vec<String>,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            node_id: None,
            name: hostname::get()
                .map(|h| h.to_string_lossy().to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            groups: Vec::new(),
            verbose: false,
        }
    }
}

/// Decode-side limits applied to peer-supplied lengths before allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Maximum decoded string length in bytes
    #[serde(default = "default_max_string_len")]
    pub max_string_len: usize,
    /// Maximum decoded byte-array length
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    /// Maximum string-list element count
    #[serde(default = "default_max_list_len")]
    pub max_list_len: usize,
}

fn default_max_string_len() -> usize {
    64 * 1024
}

fn default_max_array_len() -> usize {
    1024 * 1024
}

fn default_max_list_len() -> usize {
    4096
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_string_len: default_max_string_len(),
            max_array_len: default_max_array_len(),
            max_list_len: default_max_list_len(),
        }
    }
}

impl ProtocolConfig {
    /// The configured caps as codec decode limits
    pub fn wire_limits(&self) -> WireLimits {
        WireLimits {
            max_string_len: self.max_string_len,
            max_array_len: self.max_array_len,
            max_list_len: self.max_list_len,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load_default() -> ConfigResult<Self> {
        let config_paths = [
            default_config_path(),
            Some(PathBuf::from("./cirrusnet.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                return Self::load(path);
            }
        }

        // Return default config if no file found
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the node ID, generating one if not set
    pub fn node_id(&self) -> String {
        self.general
            .node_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}

/// Default on-disk location for the configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cirrusnet/config.toml"))
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> String {
    let config = Config {
        general: GeneralConfig {
            node_id: Some("node-1".to_string()),
            name: "Node 1".to_string(),
            groups: vec!["lobby".to_string(), "proxy".to_string()],
            verbose: false,
        },
        ..Default::default()
    };

    toml::to_string_pretty(&config).unwrap()
}
