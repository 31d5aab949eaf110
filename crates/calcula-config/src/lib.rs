//! Server configuration loaded from the process environment.
//!
//! Every setting has a default except the API key, whose absence is only
//! reported when the completion client is first used.
//!
//! ```rust
//! use calcula_config::ServerConfig;
//!
//! let config = ServerConfig::from_lookup(|key| match key {
//!     "OPENAI_MODEL" => Some("gpt-4o".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.model, "gpt-4o");
//! assert_eq!(config.bind_addr.port(), 5000);
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INDEX_PATH: &str = "static/index.html";

/// Errors that can occur when reading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Settings for the HTTP server and its completion client.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// Completion API credential (`OPENAI_API_KEY`).
    pub api_key: Option<String>,
    /// Completion API base URL (`OPENAI_BASE_URL`).
    pub api_base: String,
    /// Model identifier sent with every request (`OPENAI_MODEL`).
    pub model: String,
    /// Upper bound on a single completion call (`UPSTREAM_TIMEOUT_SECS`).
    pub upstream_timeout: Duration,
    /// HTML document served on `GET /` (`INDEX_HTML_PATH`).
    pub index_path: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", bind_raw.clone(), e))?;

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::invalid(
                        "UPSTREAM_TIMEOUT_SECS",
                        raw,
                        "must be greater than zero",
                    ))
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => return Err(ConfigError::invalid("UPSTREAM_TIMEOUT_SECS", raw, e)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let api_key = get("OPENAI_API_KEY");
        if api_key.is_none() {
            warn!("OPENAI_API_KEY not set; completion requests will fail");
        }

        Ok(Self {
            bind_addr,
            api_key,
            api_base: get("OPENAI_BASE_URL")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            upstream_timeout,
            index_path: get("INDEX_HTML_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH)),
        })
    }
}
