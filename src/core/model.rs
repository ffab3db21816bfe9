//! # Inbox Data Model
//!
//! Conversations and the messages inside them. These are plain data: the
//! inbox never derives anything from timestamps or read state, it only
//! displays what it was given.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque conversation identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque message identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for a message authored locally.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who a conversation is with. The inbox shows one audience at a time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Parent,
    Support,
}

impl Audience {
    pub const ALL: [Audience; 2] = [Audience::Parent, Audience::Support];

    /// Tab label shown above the conversation list.
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Parent => "Parents",
            Audience::Support => "Support",
        }
    }

    /// The other audience. There are only two, so toggling is enough.
    pub fn toggled(&self) -> Audience {
        match self {
            Audience::Parent => Audience::Support,
            Audience::Support => Audience::Parent,
        }
    }

    pub fn parse(s: &str) -> Option<Audience> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" | "parents" => Some(Audience::Parent),
            "support" => Some(Audience::Support),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The operator using this console.
    Me,
    /// The parent or support agent on the other side.
    Them,
}

/// Delivery progress of a message. Ordered: `Sent < Delivered < Read`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    /// Display string ("10:45 AM", "Yesterday"). Never parsed or compared.
    pub timestamp: String,
    pub status: DeliveryStatus,
}

impl Message {
    pub fn is_mine(&self) -> bool {
        self.sender == Sender::Me
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    /// Avatar reference (URL in the fixtures). The terminal renders initials.
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "lastMessage", alias = "last_message", default)]
    pub last_message: String,
    #[serde(default)]
    pub time: String,
    /// Advisory badge count. Not derived from message read state.
    #[serde(rename = "unreadCount", alias = "unread_count", default)]
    pub unread_count: u32,
    #[serde(default)]
    pub online: bool,
    #[serde(rename = "type", alias = "audience")]
    pub audience: Audience,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Up to two uppercase initials from the display name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
