//! Gateway configuration
//!
//! Loaded from YAML, then overridden from the environment:
//!
//! - `TAXONOMY_GATEWAY_CONFIG` - path of the YAML file (default `config/taxonomy_gateway.yaml`)
//! - `TAXONOMY_GATEWAY_ADDR`   - listen address
//! - `TAXONOMY_DATA_DIR`       - directory holding the JSON exports

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GatewayError;
use crate::Result;

/// Default configuration path
pub const DEFAULT_CONFIG_PATH: &str = "config/taxonomy_gateway.yaml";

/// Root configuration structure for the taxonomy gateway
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:4200".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Result caps per collection. They bound render cost in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Limits {
    #[serde(default = "default_nice_limit")]
    pub nice_classes: usize,
    #[serde(default = "default_vienna_limit")]
    pub vienna_classes: usize,
    #[serde(default = "default_reference_limit")]
    pub reference_lists: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            nice_classes: default_nice_limit(),
            vienna_classes: default_vienna_limit(),
            reference_lists: default_reference_limit(),
        }
    }
}

fn default_nice_limit() -> usize {
    500
}

fn default_vienna_limit() -> usize {
    200
}

fn default_reference_limit() -> usize {
    1000
}

impl GatewayConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GatewayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: GatewayConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration the way the server binary does: YAML file if
    /// present, defaults otherwise, then environment overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("TAXONOMY_GATEWAY_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            tracing::info!(path = %path, "Loading gateway configuration");
            Self::from_file(&path)?
        } else {
            tracing::info!(path = %path, "No configuration file, using defaults");
            Self::default()
        };

        if let Ok(addr) = std::env::var("TAXONOMY_GATEWAY_ADDR") {
            config.server.bind_addr = addr;
        }
        if let Ok(dir) = std::env::var("TAXONOMY_DATA_DIR") {
            config.data.dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.limits.nice_classes == 0
            || self.limits.vienna_classes == 0
            || self.limits.reference_lists == 0
        {
            return Err(GatewayError::Config(
                "result limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
