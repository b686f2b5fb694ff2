//! Configuration management for the trip planner.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Model-provider API key. The server boots without
//!   it, but planning requests are rejected until it is set.
//! - `OPENWEATHER_API_KEY` - Optional. Enables real-time weather lookups;
//!   without it the weather tool degrades to a fixed advisory string.
//! - `DEFAULT_MODEL` - Optional. The LLM model to use (OpenRouter format).
//!   Defaults to `google/gemini-flash-1.5`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `8`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Timeout for model calls. Defaults to `60`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Planner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key. `None` means planning is disabled and every
    /// submission is answered with a configuration error.
    pub api_key: Option<String>,

    /// OpenWeather API key. `None` degrades the weather tool to its
    /// fallback string.
    pub weather_api_key: Option<String>,

    /// LLM model identifier (OpenRouter format)
    pub default_model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,

    /// Timeout applied to each model call, in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing credentials are not errors here: the server must come up and
    /// surface them in the UI instead of refusing to start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY").ok().filter(|k| !k.is_empty());

        let weather_api_key = std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let default_model = std::env::var("DEFAULT_MODEL")
            .unwrap_or_else(|_| "google/gemini-flash-1.5".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e))
            })?;

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            weather_api_key,
            default_model,
            host,
            port,
            max_iterations,
            request_timeout_secs,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: Option<String>, default_model: String) -> Self {
        Self {
            api_key,
            weather_api_key: None,
            default_model,
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_iterations: 8,
            request_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = Config::new(Some("key".to_string()), "test/model".to_string());
        assert_eq!(config.max_iterations, 8);
        assert_eq!(config.port, 3000);
        assert!(config.weather_api_key.is_none());
    }
}
