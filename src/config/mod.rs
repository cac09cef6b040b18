//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Server-side configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Console-side configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the REST API the console talks to
    pub api_base: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Complete configuration for the back office
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StayConfig {
    pub server: ServerConfig,
    pub console: ConsoleConfig,
}

impl StayConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
