//! # Inbox
//!
//! The conversation store plus the view state layered over it: which audience
//! is showing, which conversation is selected, and what is being typed.
//!
//! ```text
//! Inbox
//! ├── conversations: Vec<Conversation>   // fixture order, never re-sorted
//! ├── revisions: HashMap<id, u64>        // bumped when a thread grows
//! ├── audience: Audience                 // active tab
//! ├── selection: Option<ConversationId>  // None = empty state
//! └── composer: Composer                 // pending text
//! ```
//!
//! Selection and audience are independent. Switching tabs never clears the
//! selection, so the open thread can belong to a conversation that is no
//! longer in the visible list.

use std::collections::HashMap;

use crate::core::composer::Composer;
use crate::core::model::{
    Audience, Conversation, ConversationId, DeliveryStatus, Message, MessageId, Sender,
};
use crate::core::outbox::DeliveryReceipt;

/// Identifies one version of one conversation's message sequence.
///
/// Two equal keys mean the thread view is showing the same messages, so it
/// has nothing new to scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadKey {
    pub conversation_id: ConversationId,
    pub revision: u64,
}

pub struct Inbox {
    conversations: Vec<Conversation>,
    revisions: HashMap<ConversationId, u64>,
    audience: Audience,
    selection: Option<ConversationId>,
    pub composer: Composer,
}

impl Inbox {
    pub fn new(conversations: Vec<Conversation>, audience: Audience) -> Self {
        Self {
            conversations,
            revisions: HashMap::new(),
            audience,
            selection: None,
            composer: Composer::new(),
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    pub fn set_audience(&mut self, audience: Audience) {
        self.audience = audience;
    }

    /// Conversations for the active audience, in stored order.
    pub fn visible_conversations(&self) -> Vec<&Conversation> {
        self.conversations
            .iter()
            .filter(|c| c.audience == self.audience)
            .collect()
    }

    pub fn selection(&self) -> Option<&ConversationId> {
        self.selection.as_ref()
    }

    /// Select a conversation. Not checked against the visible list.
    pub fn select(&mut self, id: ConversationId) {
        self.selection = Some(id);
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    fn get_mut(&mut self, id: &ConversationId) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| &c.id == id)
    }

    /// The selected conversation, if the selection resolves to one.
    pub fn active_thread(&self) -> Option<&Conversation> {
        self.selection.as_ref().and_then(|id| self.get(id))
    }

    pub fn thread_key(&self) -> Option<ThreadKey> {
        self.active_thread().map(|c| ThreadKey {
            conversation_id: c.id.clone(),
            revision: self.revisions.get(&c.id).copied().unwrap_or(0),
        })
    }

    /// Whether the active thread is hidden by the current audience filter.
    pub fn selection_is_filtered_out(&self) -> bool {
        self.active_thread()
            .is_some_and(|c| c.audience != self.audience)
    }

    pub fn unread_total(&self, audience: Audience) -> u32 {
        self.conversations
            .iter()
            .filter(|c| c.audience == audience)
            .map(|c| c.unread_count)
            .fold(0u32, u32::saturating_add)
    }

    /// Append a message authored here. Updates the list preview and bumps the
    /// thread revision. Returns `None` if the conversation does not exist.
    pub fn append_local(
        &mut self,
        id: &ConversationId,
        text: String,
        timestamp: String,
    ) -> Option<MessageId> {
        let message_id = MessageId::generate();
        let conversation = self.get_mut(id)?;
        conversation.last_message = text.clone();
        conversation.time = timestamp.clone();
        conversation.messages.push(Message {
            id: message_id.clone(),
            text,
            sender: Sender::Me,
            timestamp,
            status: DeliveryStatus::Sent,
        });
        *self.revisions.entry(id.clone()).or_insert(0) += 1;
        Some(message_id)
    }

    /// Raise a message's delivery status. Never lowers it.
    /// Returns `true` if a message changed.
    pub fn apply_receipt(&mut self, receipt: &DeliveryReceipt) -> bool {
        let Some(conversation) = self.get_mut(&receipt.conversation_id) else {
            return false;
        };
        match conversation
            .messages
            .iter_mut()
            .find(|m| m.id == receipt.message_id)
        {
            Some(message) if receipt.status > message.status => {
                message.status = receipt.status;
                true
            }
            _ => false,
        }
    }

    pub fn mark_read(&mut self, id: &ConversationId) {
        if let Some(conversation) = self.get_mut(id) {
            conversation.unread_count = 0;
        }
    }
}
