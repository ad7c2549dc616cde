//! Decoded API records.
//!
//! Every record is built in one step by `serde`. A missing required field or
//! a field of the wrong JSON type rejects the whole body, so a partially
//! populated record can never escape a decode.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Platform-assigned identifier. The API sends these either as JSON strings
/// or as JSON integers; both are stored as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number(deserializer).map(Self)
    }
}

impl Id {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Unsigned(n) => n.to_string(),
        StringOrNumber::Signed(n) => n.to_string(),
    })
}

/// The key must be present; its value may be `null`.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

// =============================================================================
// MESSAGE
// =============================================================================

/// A chat message. `author` is the sender's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MessageWire")]
pub struct Message {
    pub id: Id,
    pub content: String,
    pub author: String,
}

#[derive(Deserialize)]
struct MessageWire {
    id: Id,
    content: String,
    author: AuthorWire,
}

#[derive(Deserialize)]
struct AuthorWire {
    username: String,
}

impl From<MessageWire> for Message {
    fn from(wire: MessageWire) -> Self {
        Self { id: wire.id, content: wire.content, author: wire.author.username }
    }
}

// =============================================================================
// USER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    /// Tag that tells apart users sharing a username. Kept as text so
    /// leading zeros (`"0001"`) survive.
    #[serde(deserialize_with = "string_or_number")]
    pub discriminator: String,
    /// Opaque avatar hash; `None` when the user has no avatar.
    #[serde(deserialize_with = "required_nullable")]
    pub avatar: Option<String>,
}

// =============================================================================
// CHANNEL
// =============================================================================

/// Kind of channel. Unrecognised kinds are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelType {
    Text,
    Voice,
    Category,
    Announcement,
    Other(String),
}

impl ChannelType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Category => "category",
            Self::Announcement => "announcement",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ChannelType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => Self::Text,
            "voice" => Self::Voice,
            "category" => Self::Category,
            "announcement" => Self::Announcement,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for ChannelType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<ChannelType> for String {
    fn from(kind: ChannelType) -> Self {
        match kind {
            ChannelType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
}

// =============================================================================
// GATEWAY
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayInfo {
    pub url: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
