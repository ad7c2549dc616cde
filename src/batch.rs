//! Collection-level helpers built on an [`ApiClient`].
//!
//! Each helper takes the client explicitly and makes exactly one request.
//! Message limits are clamped to `1..=MAX_MESSAGE_LIMIT` before sending.

use crate::client::{ApiClient, decode};
use crate::error::ApiError;
use crate::operation::Operation;
use crate::types::{Channel, ChannelType, Message, User};

pub const DEFAULT_MESSAGE_LIMIT: u32 = 10;
pub const MIN_MESSAGE_LIMIT: u32 = 1;
pub const MAX_MESSAGE_LIMIT: u32 = 100;

/// Clamp a caller-supplied limit into the accepted range.
#[must_use]
pub fn clamp_limit(limit: u32) -> u32 {
    let clamped = limit.clamp(MIN_MESSAGE_LIMIT, MAX_MESSAGE_LIMIT);
    if clamped != limit {
        tracing::debug!(requested = limit, clamped, "message limit clamped");
    }
    clamped
}

/// Latest messages in a channel, newest first as the API orders them.
///
/// # Errors
///
/// Fails on a non-200 status or if any element is not a complete message.
pub async fn fetch_channel_messages(client: &ApiClient, channel_id: &str, limit: u32) -> Result<Vec<Message>, ApiError> {
    let op = Operation::FetchChannelMessages;
    let path = ["channels", channel_id, "messages"];
    let limit = clamp_limit(limit);
    let body = client.execute(op, &path, |req| req.query(&[("limit", limit)])).await?;
    decode(op, &body)
}

/// Latest messages sent by a user.
///
/// # Errors
///
/// Fails on a non-200 status or if any element is not a complete message.
pub async fn get_user_messages(client: &ApiClient, user_id: &str, limit: u32) -> Result<Vec<Message>, ApiError> {
    let op = Operation::GetUserMessages;
    let path = ["users", user_id, "messages"];
    let limit = clamp_limit(limit);
    let body = client.execute(op, &path, |req| req.query(&[("limit", limit)])).await?;
    decode(op, &body)
}

/// # Errors
///
/// Fails on a non-200 status or if any element is not a complete user.
pub async fn get_user_friends(client: &ApiClient, user_id: &str) -> Result<Vec<User>, ApiError> {
    let op = Operation::GetUserFriends;
    let body = client.execute(op, &["users", user_id, "friends"], |req| req).await?;
    decode(op, &body)
}

/// Create a channel and return it as the API stored it. Success only on 201.
///
/// # Errors
///
/// Fails on any status other than 201 or an incomplete channel body.
pub async fn create_channel(client: &ApiClient, name: &str, channel_type: &ChannelType) -> Result<Channel, ApiError> {
    let op = Operation::CreateChannel;
    let form = [("name", name), ("type", channel_type.as_str())];
    let body = client.execute(op, &["channels"], |req| req.form(&form)).await?;
    decode(op, &body)
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
