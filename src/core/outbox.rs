//! # Outbox
//!
//! Where accepted composer submissions go after they leave the inbox.
//!
//! The console has no backend, so the default [`LocalOutbox`] simply
//! acknowledges every message. A real transport implements [`Outbox`] and is
//! plugged in at start-up; the inbox only ever sees the resulting
//! [`DeliveryReceipt`] or [`OutboxError`], fed back through the action loop.

use async_trait::async_trait;
use log::info;
use std::fmt;

use crate::core::model::{ConversationId, DeliveryStatus, MessageId};

/// A message handed to the outbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboxError {
    /// The transport refused the message.
    Rejected(String),
    /// The transport could not be reached.
    Unavailable(String),
}

impl fmt::Display for OutboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutboxError::Rejected(reason) => write!(f, "message rejected: {reason}"),
            OutboxError::Unavailable(reason) => write!(f, "outbox unavailable: {reason}"),
        }
    }
}

impl std::error::Error for OutboxError {}

#[async_trait]
pub trait Outbox: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, outgoing: Outgoing) -> Result<DeliveryReceipt, OutboxError>;
}

/// Acknowledges everything as delivered. Nothing leaves the process.
pub struct LocalOutbox;

#[async_trait]
impl Outbox for LocalOutbox {
    fn name(&self) -> &str {
        "local"
    }

    async fn deliver(&self, outgoing: Outgoing) -> Result<DeliveryReceipt, OutboxError> {
        info!(
            "Local outbox accepted message {} for conversation {} ({} bytes)",
            outgoing.message_id,
            outgoing.conversation_id,
            outgoing.text.len()
        );
        Ok(DeliveryReceipt {
            conversation_id: outgoing.conversation_id,
            message_id: outgoing.message_id,
            status: DeliveryStatus::Delivered,
        })
    }
}
