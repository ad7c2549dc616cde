//! Client configuration parsed from environment variables.

use std::time::Duration;

use crate::error::ApiError;

pub const BASE_URL_VAR: &str = "CHAT_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "CHAT_API_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "CHAT_API_CONNECT_TIMEOUT_SECS";

/// Optional HTTP timeouts. Both are unset by default, which leaves requests
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

impl ClientTimeouts {
    #[must_use]
    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Option<Duration> {
        self.connect_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `https://chat.example/api/v9`. Trailing slashes are
    /// trimmed when the client is built.
    pub base_url: String,
    pub timeouts: ClientTimeouts,
}

impl ClientConfig {
    /// Config with no timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeouts: ClientTimeouts::default() }
    }

    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `CHAT_API_BASE_URL`
    ///
    /// Optional:
    /// - `CHAT_API_REQUEST_TIMEOUT_SECS`: whole-request timeout, unset by default
    /// - `CHAT_API_CONNECT_TIMEOUT_SECS`: connect timeout, unset by default
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ConfigParse`] if the base URL is missing or a
    /// timeout is not an integer.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var(BASE_URL_VAR).map_err(|_| ApiError::ConfigParse(format!("{BASE_URL_VAR} not set")))?;
        let timeouts = ClientTimeouts {
            request_secs: env_parse_u64(REQUEST_TIMEOUT_VAR)?,
            connect_secs: env_parse_u64(CONNECT_TIMEOUT_VAR)?,
        };
        Ok(Self { timeouts, ..Self::new(base_url) })
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: ClientTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

fn env_parse_u64(key: &str) -> Result<Option<u64>, ApiError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ApiError::ConfigParse(format!("{key} must be a whole number of seconds, got '{raw}'"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
