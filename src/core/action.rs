//! # Actions
//!
//! Everything that can happen in CareHub becomes an `Action`.
//! User presses Enter in the composer? That's `Action::Submit`.
//! The outbox acknowledges a message? That's `Action::DeliveryConfirmed`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing what the adapter must do next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Inbox state machine
//!
//! ```text
//!   NoSelection ──select(id)──▶ ViewingConversation(id) ──select(id')──▶ ViewingConversation(id')
//! ```
//!
//! Audience changes never move between these states.

use log::{debug, info, warn};

use crate::core::inbox::ThreadKey;
use crate::core::model::{Audience, ConversationId, MessageId};
use crate::core::outbox::{DeliveryReceipt, Outgoing, OutboxError};
use crate::core::route::Route;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Route),
    SetAudience(Audience),
    SelectConversation(ConversationId),
    /// Composer text after a keystroke.
    EditComposer(String),
    /// Send the composer text. Enter and the Send button both map here.
    Submit,
    DeliveryConfirmed(DeliveryReceipt),
    DeliveryFailed {
        message_id: MessageId,
        error: OutboxError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// The active thread's message sequence changed; bring the newest into view.
    ScrollToLatest,
    /// Hand a message to the outbox.
    Deliver {
        outgoing: Outgoing,
        scroll_to_latest: bool,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,
        Action::Navigate(route) => {
            app.route = route;
            Effect::None
        }
        Action::SetAudience(audience) => {
            app.inbox.set_audience(audience);
            Effect::None
        }
        Action::SelectConversation(id) => {
            let before = app.inbox.thread_key();
            if app.options.mark_read_on_open {
                app.inbox.mark_read(&id);
            }
            app.inbox.select(id);
            scroll_if_changed(before, app.inbox.thread_key())
        }
        Action::EditComposer(text) => {
            app.inbox.composer.set_text(text);
            Effect::None
        }
        Action::Submit => submit(app),
        Action::DeliveryConfirmed(receipt) => {
            if !app.inbox.apply_receipt(&receipt) {
                debug!("Receipt for {} changed nothing", receipt.message_id);
            }
            Effect::None
        }
        Action::DeliveryFailed { message_id, error } => {
            warn!("Delivery of {} failed: {}", message_id, error);
            app.status_message = format!("Delivery failed: {error}");
            Effect::None
        }
    }
}

fn scroll_if_changed(before: Option<ThreadKey>, after: Option<ThreadKey>) -> Effect {
    if after.is_some() && before != after {
        Effect::ScrollToLatest
    } else {
        Effect::None
    }
}

fn submit(app: &mut App) -> Effect {
    let selection = app.inbox.selection().cloned();
    let Some(submission) = app.inbox.composer.submit(selection.as_ref()) else {
        debug!("Submit ignored (blank text or no selection)");
        return Effect::None;
    };
    if app.inbox.get(&submission.conversation_id).is_none() {
        warn!(
            "Dropping message for unknown conversation {}",
            submission.conversation_id
        );
        return Effect::None;
    }

    let before = app.inbox.thread_key();
    let message_id = if app.options.append_sent_messages {
        app.inbox.append_local(
            &submission.conversation_id,
            submission.text.clone(),
            (app.clock)(),
        )
    } else {
        None
    };
    let message_id = message_id.unwrap_or_else(MessageId::generate);
    info!(
        "Message {} queued for conversation {}",
        message_id, submission.conversation_id
    );

    Effect::Deliver {
        outgoing: Outgoing {
            conversation_id: submission.conversation_id,
            message_id,
            text: submission.text,
        },
        scroll_to_latest: scroll_if_changed(before, app.inbox.thread_key())
            == Effect::ScrollToLatest,
    }
}
