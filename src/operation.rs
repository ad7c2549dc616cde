//! Operation table — one row per API call.
//!
//! Every call site looks up its method, name and expected success status
//! here, so error messages and status checks never drift apart.

use std::fmt;

use reqwest::Method;

/// An API operation issued by [`crate::ApiClient`] or the [`crate::batch`] helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Connect,
    SendMessage,
    ReceiveMessage,
    EditMessage,
    DeleteMessage,
    GetUserInfo,
    GetChannelInfo,
    FetchChannelMessages,
    GetUserMessages,
    GetUserFriends,
    CreateChannel,
}

impl Operation {
    /// Snake-case name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::SendMessage => "send_message",
            Self::ReceiveMessage => "receive_message",
            Self::EditMessage => "edit_message",
            Self::DeleteMessage => "delete_message",
            Self::GetUserInfo => "get_user_info",
            Self::GetChannelInfo => "get_channel_info",
            Self::FetchChannelMessages => "fetch_channel_messages",
            Self::GetUserMessages => "get_user_messages",
            Self::GetUserFriends => "get_user_friends",
            Self::CreateChannel => "create_channel",
        }
    }

    /// HTTP method the operation is sent with.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::SendMessage | Self::CreateChannel => Method::POST,
            Self::EditMessage => Method::PUT,
            Self::DeleteMessage => Method::DELETE,
            Self::Connect
            | Self::ReceiveMessage
            | Self::GetUserInfo
            | Self::GetChannelInfo
            | Self::FetchChannelMessages
            | Self::GetUserMessages
            | Self::GetUserFriends => Method::GET,
        }
    }

    /// The only status code that counts as success. Anything else fails.
    #[must_use]
    pub const fn success_status(self) -> u16 {
        match self {
            Self::DeleteMessage => 204,
            Self::CreateChannel => 201,
            _ => 200,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "operation_test.rs"]
mod tests;
