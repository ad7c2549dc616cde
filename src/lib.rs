//! Thin async client for a chat platform's HTTP API.
//!
//! [`ApiClient`] owns one connection pool and a base URL and exposes one
//! method per endpoint (send, receive, edit and delete messages, user and
//! channel lookup, gateway discovery). The [`batch`] module adds list-shaped
//! helpers that take the client explicitly.
//!
//! No authentication, retries, rate limiting or gateway streaming: every
//! call is a single request and every failure goes back to the caller.

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod operation;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use client::ApiClient;
pub use config::{ClientConfig, ClientTimeouts};
pub use error::ApiError;
pub use operation::Operation;
pub use types::{Channel, ChannelType, Id, Message, User};
