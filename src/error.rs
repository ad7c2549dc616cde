//! Error type shared by the client, the batch helpers and configuration.
//!
//! Status failures carry only the operation and the observed status code.
//! Nothing here is retried; every error goes straight back to the caller.

use crate::operation::Operation;

/// Errors produced by chat API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Gateway discovery returned a non-success status.
    #[error("failed to connect ({operation}): status {status}")]
    Connection { operation: Operation, status: u16 },

    /// The API answered with a status other than the operation's success status.
    #[error("{operation} failed: status {status}")]
    Request { operation: Operation, status: u16 },

    /// A success status arrived but the body could not be decoded.
    #[error("{operation} response parse failed: {message}")]
    Decode { operation: Operation, message: String },

    /// The request never produced a status (DNS, refused, timeout, body read).
    #[error("{operation} request failed: {message}")]
    Transport { operation: Operation, message: String },

    /// A caller-supplied ID cannot be used as a path segment (empty, `.` or `..`).
    #[error("{operation} rejected path segment '{segment}'")]
    InvalidPathSegment { operation: Operation, segment: String },

    /// The client was closed before or while the request ran.
    #[error("{operation} aborted: client closed")]
    Closed { operation: Operation },

    /// The configured base URL is not an absolute URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

impl ApiError {
    /// Map an unexpected status to the error kind for `operation`.
    pub(crate) fn from_status(operation: Operation, status: u16) -> Self {
        match operation {
            Operation::Connect => Self::Connection { operation, status },
            _ => Self::Request { operation, status },
        }
    }

    pub(crate) fn transport(operation: Operation, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("timed out: {err}")
        } else {
            err.to_string()
        };
        Self::Transport { operation, message }
    }

    /// The operation that failed, if the error came from a request.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Connection { operation, .. }
            | Self::Request { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Transport { operation, .. }
            | Self::InvalidPathSegment { operation, .. }
            | Self::Closed { operation } => Some(*operation),
            Self::InvalidBaseUrl(_) | Self::HttpClientBuild(_) | Self::ConfigParse(_) => None,
        }
    }

    /// The HTTP status that caused the failure, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Connection { status, .. } | Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "E_CONNECTION",
            Self::Request { .. } => "E_REQUEST",
            Self::Decode { .. } => "E_DECODE",
            Self::Transport { .. } => "E_TRANSPORT",
            Self::InvalidPathSegment { .. } => "E_INVALID_PATH_SEGMENT",
            Self::Closed { .. } => "E_CLOSED",
            Self::InvalidBaseUrl(_) => "E_INVALID_BASE_URL",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
