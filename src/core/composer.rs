//! # Composer
//!
//! Pending message text and the rules for submitting it.
//!
//! A submission is accepted only when the trimmed text is non-empty and a
//! conversation is selected. A rejected submission leaves the text exactly as
//! it was, whitespace included.

use crate::core::model::ConversationId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Composer {
    text: String,
}

/// An accepted submission, ready to be appended and handed to the outbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub conversation_id: ConversationId,
    /// The text as typed. Trimming only decides acceptance.
    pub text: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the send affordance should be enabled.
    pub fn can_submit(&self, selection: Option<&ConversationId>) -> bool {
        selection.is_some() && !self.is_blank()
    }

    /// Take the pending text if the preconditions hold. Otherwise a no-op.
    pub fn submit(&mut self, selection: Option<&ConversationId>) -> Option<Submission> {
        let conversation_id = selection?.clone();
        if self.is_blank() {
            return None;
        }
        let text = std::mem::take(&mut self.text);
        Some(Submission {
            conversation_id,
            text,
        })
    }
}
