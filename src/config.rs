// Configuration management

use crate::core::errors::ClientError;
use std::env;
use std::path::Path;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // Query endpoint, e.g. https://<cluster>.kusto.windows.net/v1/rest/query
    pub endpoint: String,

    // Transport timeouts
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,

    // Sent as x-ms-user-id when present
    pub user_login: Option<String>,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    ///
    /// # Returns
    /// * `Result<Self, ClientError>` - Config instance or validation error
    pub fn from_env() -> Result<Self, ClientError> {
        dotenv::dotenv().ok(); // Ignore errors (file may not exist)
        Self::from_env_with_endpoint(None)
    }

    /// Read the configuration from the process environment only (no `.env`
    /// lookup). An explicit endpoint, e.g. from a command-line flag, replaces
    /// `ADX_ENDPOINT`.
    pub fn from_env_with_endpoint(endpoint: Option<&str>) -> Result<Self, ClientError> {
        let config = Self {
            endpoint: match endpoint {
                Some(endpoint) => endpoint.to_string(),
                None => Self::get_required_env("ADX_ENDPOINT")?,
            },
            request_timeout_secs: Self::parse_u64_or_default("ADX_REQUEST_TIMEOUT_SECS", 30)?,
            connect_timeout_secs: Self::parse_u64_or_default("ADX_CONNECT_TIMEOUT_SECS", 5)?,
            user_login: Self::get_optional_env("ADX_USER_LOGIN"),
            log_level: Self::get_env_or_default("LOG_LEVEL", "info"),
            log_format: Self::get_env_or_default("LOG_FORMAT", "text"),
        };

        config.validate()?;

        Ok(config)
    }

    /// Load variables from `path` into the process environment, then read the
    /// configuration. Variables already set in the environment take precedence;
    /// `./.env` is not consulted.
    pub fn from_env_file(path: &Path, endpoint: Option<&str>) -> Result<Self, ClientError> {
        dotenv::from_path(path)
            .map_err(|e| ClientError::Configuration(
                format!("Cannot read env file {:?}: {}", path, e)
            ))?;
        Self::from_env_with_endpoint(endpoint)
    }

    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    fn get_optional_env(key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    fn get_required_env(key: &str) -> Result<String, ClientError> {
        let value = env::var(key)
            .map_err(|_| ClientError::Configuration(format!("{} not set", key)))?;

        if value.is_empty() {
            return Err(ClientError::Configuration(format!("{} is empty", key)));
        }

        Ok(value)
    }

    /// Parse u64 from environment variable or return default; zero is rejected
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, ClientError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>()
                    .map_err(|e| ClientError::Configuration(
                        format!("Invalid {} value '{}': {}", key, value, e)
                    ))?;

                if parsed == 0 {
                    return Err(ClientError::Configuration(
                        format!("{} must be greater than 0", key)
                    ));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    fn validate(&self) -> Result<(), ClientError> {
        Self::validate_url(&self.endpoint)?;
        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;
        Ok(())
    }

    /// Endpoint must be an absolute http(s) URL
    fn validate_url(endpoint: &str) -> Result<(), ClientError> {
        let url = url::Url::parse(endpoint)
            .map_err(|e| ClientError::Configuration(
                format!("Invalid ADX_ENDPOINT URL '{}': {}", endpoint, e)
            ))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Configuration(
                format!("Invalid ADX_ENDPOINT scheme '{}': must be http or https", other)
            )),
        }
    }

    fn validate_log_level(level: &str) -> Result<(), ClientError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(ClientError::Configuration(
                format!("Invalid LOG_LEVEL '{}': must be one of {}", level, valid_levels.join(", "))
            ));
        }
        Ok(())
    }

    fn validate_log_format(format: &str) -> Result<(), ClientError> {
        if format != "json" && format != "text" {
            return Err(ClientError::Configuration(
                format!("Invalid LOG_FORMAT '{}': must be 'json' or 'text'", format)
            ));
        }
        Ok(())
    }
}
