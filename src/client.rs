//! Chat API client.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` (the connection pool) bound to a base URL. Each
//! public method is exactly one HTTP round trip: send, compare the status
//! against the operation's single success status, then decode the body.
//! Pure parsing lives in [`decode`] for testability.
//!
//! CONCURRENCY
//! ===========
//! Methods take `&self`, so overlapping calls share the pool with no
//! ordering or locking between them. [`ApiClient::close`] drops the pool and
//! flips a watch flag; in-flight calls observe the flag and fail with
//! [`ApiError::Closed`], which drops their connections.

use std::sync::{PoisonError, RwLock};

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::operation::Operation;
use crate::types::{Channel, GatewayInfo, Message, User};

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    base_url: String,
    base: Url,
    http: RwLock<Option<reqwest::Client>>,
    gateway_url: RwLock<Option<String>>,
    closed: watch::Sender<bool>,
}

impl ApiClient {
    /// Build a client for `base_url` with no timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client fails.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Build a client from environment variables (see [`ClientConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client fails.
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(format!("{base_url}: cannot carry a path")));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeouts.request() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.timeouts.connect() {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        let (closed, _) = watch::channel(false);
        Ok(Self { base_url, base, http: RwLock::new(Some(http)), gateway_url: RwLock::new(None), closed })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Gateway URL discovered by the last successful [`ApiClient::connect`].
    #[must_use]
    pub fn gateway_url(&self) -> Option<String> {
        self.gateway_url.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Discover the gateway URL via `GET /gateway` and remember it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Connection`] on any status other than 200.
    pub async fn connect(&self) -> Result<(), ApiError> {
        let op = Operation::Connect;
        let body = self.execute(op, &["gateway"], |req| req).await?;
        let info: GatewayInfo = decode(op, &body)?;
        tracing::info!(gateway_url = %info.url, "gateway discovered");
        *self.gateway_url.write().unwrap_or_else(PoisonError::into_inner) = Some(info.url);
        Ok(())
    }

    /// Post `content` to a channel. Success only on 200.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on any other status.
    pub async fn send_message(&self, channel_id: &str, content: &str) -> Result<bool, ApiError> {
        let path = ["channels", channel_id, "messages"];
        self.execute(Operation::SendMessage, &path, |req| req.form(&[("content", content)]))
            .await?;
        Ok(true)
    }

    /// Fetch the message the channel's messages endpoint returns as a single object.
    ///
    /// # Errors
    ///
    /// Fails on a non-200 status or a body that is not a complete message.
    pub async fn receive_message(&self, channel_id: &str) -> Result<Message, ApiError> {
        let op = Operation::ReceiveMessage;
        let body = self.execute(op, &["channels", channel_id, "messages"], |req| req).await?;
        decode(op, &body)
    }

    /// Replace a message's content. Success only on 200.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on any other status.
    pub async fn edit_message(&self, channel_id: &str, message_id: &str, content: &str) -> Result<bool, ApiError> {
        let path = ["channels", channel_id, "messages", message_id];
        self.execute(Operation::EditMessage, &path, |req| req.form(&[("content", content)]))
            .await?;
        Ok(true)
    }

    /// Delete a message. Success only on 204; a 200 is a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on any status other than 204.
    pub async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<bool, ApiError> {
        let path = ["channels", channel_id, "messages", message_id];
        self.execute(Operation::DeleteMessage, &path, |req| req).await?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Fails on a non-200 status or an incomplete user body.
    pub async fn get_user_info(&self, user_id: &str) -> Result<User, ApiError> {
        let op = Operation::GetUserInfo;
        let body = self.execute(op, &["users", user_id], |req| req).await?;
        decode(op, &body)
    }

    /// # Errors
    ///
    /// Fails on a non-200 status or an incomplete channel body.
    pub async fn get_channel_info(&self, channel_id: &str) -> Result<Channel, ApiError> {
        let op = Operation::GetChannelInfo;
        let body = self.execute(op, &["channels", channel_id], |req| req).await?;
        decode(op, &body)
    }

    /// Release the connection pool. In-flight calls fail with
    /// [`ApiError::Closed`]; later calls fail without touching the network.
    /// Calling it again is a no-op.
    pub fn close(&self) {
        let pool = self.http.write().unwrap_or_else(PoisonError::into_inner).take();
        if pool.is_some() {
            self.closed.send_replace(true);
            tracing::info!(base_url = %self.base_url, "client closed");
        }
    }

    // =========================================================================
    // REQUEST PLUMBING
    // =========================================================================

    fn session(&self, operation: Operation) -> Result<reqwest::Client, ApiError> {
        self.http
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ApiError::Closed { operation })
    }

    /// Base URL with `segments` appended, each percent-encoded as a single
    /// path segment so `/`, `?` and `#` inside an ID stay inside that segment.
    fn endpoint(&self, operation: Operation, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidPathSegment { operation, segment: (*bad).to_owned() });
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request to `segments` under the base URL and return the body
    /// if the status is the operation's success status.
    pub(crate) async fn execute<F>(&self, operation: Operation, segments: &[&str], build: F) -> Result<String, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint(operation, segments)?;
        let http = self.session(operation)?;
        let closed = self.closed.subscribe();
        let method = operation.method();
        tracing::debug!(%operation, %method, %url, "sending request");

        let request = build(http.request(method, url));
        let round_trip = async {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::transport(operation, &e))?;
            let status = response.status().as_u16();
            tracing::debug!(%operation, status, "response received");
            if status != operation.success_status() {
                tracing::warn!(%operation, status, expected = operation.success_status(), "unexpected status");
                return Err(ApiError::from_status(operation, status));
            }
            response
                .text()
                .await
                .map_err(|e| ApiError::transport(operation, &e))
        };

        tokio::select! {
            result = round_trip => result,
            () = wait_closed(closed) => Err(ApiError::Closed { operation }),
        }
    }
}

async fn wait_closed(mut closed: watch::Receiver<bool>) {
    while !*closed.borrow_and_update() {
        if closed.changed().await.is_err() {
            // Sender gone means the client itself was dropped; nothing left to signal.
            std::future::pending::<()>().await;
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode { operation, message: e.to_string() })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
