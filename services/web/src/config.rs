//! services/web/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. The user's API key is never part of the
//! configuration; it is typed into the page and kept in the session only.

use std::net::SocketAddr;
use tracing::Level;

pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub completion_endpoint: String,
    pub completion_model: String,
    pub session_idle_timeout: chrono::Duration,
    pub cors_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Completion Endpoint Settings ---
        let completion_endpoint = lookup("COMPLETION_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_COMPLETION_ENDPOINT.to_string());
        if !(completion_endpoint.starts_with("http://")
            || completion_endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue(
                "COMPLETION_ENDPOINT".to_string(),
                format!("'{}' is not an http(s) URL", completion_endpoint),
            ));
        }
        let completion_model =
            lookup("COMPLETION_MODEL").unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string());

        // --- Session Settings ---
        let idle_minutes = match lookup("SESSION_IDLE_MINUTES") {
            Some(raw) => raw.parse::<u32>().ok().filter(|m| *m > 0).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SESSION_IDLE_MINUTES".to_string(),
                    format!("'{}' is not a positive number of minutes", raw),
                )
            })?,
            None => 60,
        };
        let session_idle_timeout = chrono::Duration::minutes(i64::from(idle_minutes));

        let cors_origin = lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty());

        Ok(Self {
            bind_address,
            log_level,
            completion_endpoint,
            completion_model,
            session_idle_timeout,
            cors_origin,
        })
    }
}
