//! Server configuration

use kairos_repository::RepositoryConfig;
use kairos_sdk::EngineConfig;
use serde::{Deserialize, Serialize};

/// Base name of the optional configuration file (`.toml`, `.yaml`, ...)
pub const DEFAULT_CONFIG_FILE: &str = "config/server";

/// Prefix of environment overrides, e.g. `KAIROS__PORT=9000`
pub const ENV_PREFIX: &str = "KAIROS";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level for the kairos crates when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,

    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,

    /// Storage backend
    pub repository: RepositoryConfig,

    /// Validation policies
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            repository: RepositoryConfig::memory(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, the default config file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the given file base name layered with environment variables
    pub fn load_from(file: &str) -> anyhow::Result<Self> {
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                tracing::info!("Could not read configuration ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_repository::RepositorySource;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.repository.source, RepositorySource::Memory);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load_from("does/not/exist/server").unwrap();
        assert_eq!(config.port, ServerConfig::default().port);
    }

    #[test]
    fn test_log_format_names() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }
}
