//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3009";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin every request path is appended to. No trailing slash.
    pub api_base_url: String,
    /// Persistent storage key holding the bearer token.
    pub token_key: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `STAFFDESK_API_URL`: default `http://localhost:3009`
    /// - `STAFFDESK_TOKEN_KEY`: default `token`
    /// - `STAFFDESK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STAFFDESK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout does not parse or the token key is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("STAFFDESK_API_URL")
            .map_or_else(|_| DEFAULT_API_BASE_URL.to_owned(), |url| normalize_base_url(&url));

        let token_key = match std::env::var("STAFFDESK_TOKEN_KEY") {
            Ok(key) if key.trim().is_empty() => return Err(ConfigError::Empty { var: "STAFFDESK_TOKEN_KEY" }),
            Ok(key) => key.trim().to_owned(),
            Err(_) => DEFAULT_TOKEN_KEY.to_owned(),
        };

        let request_timeout_secs = env_parse_u64("STAFFDESK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let connect_timeout_secs = env_parse_u64("STAFFDESK_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?;

        Ok(Self { api_base_url, token_key, request_timeout_secs, connect_timeout_secs })
    }

    /// Replace the backend origin, trimming trailing slashes.
    #[must_use]
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}
