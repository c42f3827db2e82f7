use thiserror::Error;

pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Startup-time configuration failures. Any of these aborts the process
/// before the router is built, so no analysis can run without a credential.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Required credential '{key}' is not set. Please check your .env file")]
    MissingCredential { key: &'static str },

    #[error("PORT must be a valid port number, got '{value}'")]
    InvalidPort { value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_base: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let groq_api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingCredential {
                key: "GROQ_API_KEY",
            })?;

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => 8080,
        };

        Ok(Config {
            groq_api_key,
            groq_api_base: lookup("GROQ_API_BASE")
                .unwrap_or_else(|| DEFAULT_GROQ_API_BASE.to_string()),
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
