use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl GatewayError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidQuery(_) => 400,
            Self::Io { .. } | Self::Parse { .. } | Self::Config(_) | Self::Yaml(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(GatewayError::InvalidQuery("x".into()).http_status(), 400);
        assert_eq!(GatewayError::Config("x".into()).http_status(), 500);
    }
}
