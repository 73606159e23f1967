use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://app.keyword.com";

/// Complete service configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Keyword.com API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Client-wide request timeout (seconds). Unset means the transport default.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("mindshare-connector/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl ServiceConfig {
    /// Build from the optional `MINDSHARE_CONFIG` TOML file, then apply env overrides.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var("MINDSHARE_CONFIG") {
            Ok(path) => load_config(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(v) = std::env::var("MINDSHARE_API_BASE_URL") {
            cfg.api.base_url = v;
        }
        if let Ok(v) = std::env::var("MINDSHARE_USER_AGENT") {
            cfg.api.user_agent = v;
        }
        if let Ok(v) = std::env::var("MINDSHARE_TIMEOUT_SECONDS") {
            let secs = v
                .parse::<u64>()
                .context("MINDSHARE_TIMEOUT_SECONDS must be a whole number of seconds")?;
            cfg.api.timeout_seconds = Some(secs);
        }
        if let Ok(v) = std::env::var("MINDSHARE_PORT") {
            cfg.server.port = v
                .parse()
                .context("MINDSHARE_PORT must be a valid port number")?;
        }

        Ok(cfg)
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<ServiceConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: ServiceConfig =
        toml::from_str(&contents).with_context(|| format!("Invalid config file {}", path))?;
    Ok(config)
}
