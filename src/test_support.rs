//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::inbox::Inbox;
use crate::core::model::{
    Audience, Conversation, ConversationId, DeliveryStatus, Message, MessageId, Sender,
};
use crate::core::state::App;

fn fixed_clock() -> String {
    "12:00 PM".to_string()
}

fn message(id: &str, text: &str, sender: Sender) -> Message {
    Message {
        id: MessageId::new(id),
        text: text.to_string(),
        sender,
        timestamp: "9:00 AM".to_string(),
        status: DeliveryStatus::Read,
    }
}

fn conversation(id: &str, name: &str, unread: u32, audience: Audience) -> Conversation {
    Conversation {
        id: ConversationId::new(id),
        name: name.to_string(),
        avatar: String::new(),
        last_message: format!("last from {name}"),
        time: "9:00 AM".to_string(),
        unread_count: unread,
        online: id != "B",
        audience,
        messages: vec![
            message(&format!("{id}1"), &format!("hello from {name}"), Sender::Them),
            message(&format!("{id}2"), &format!("reply to {name}"), Sender::Me),
        ],
    }
}

/// Two parent conversations (A unread=2, B unread=0) and one support (C).
pub fn scenario_conversations() -> Vec<Conversation> {
    vec![
        conversation("A", "Amy Parent", 2, Audience::Parent),
        conversation("B", "Ben Parent", 0, Audience::Parent),
        conversation("C", "Carol Support", 1, Audience::Support),
    ]
}

pub fn scenario_inbox() -> Inbox {
    Inbox::new(scenario_conversations(), Audience::Parent)
}

/// App over the three-conversation scenario with a fixed clock.
pub fn scenario_app() -> App {
    let mut app = App::new(scenario_conversations(), Audience::Parent);
    app.clock = fixed_clock;
    app
}

/// App over the built-in demo conversations with a fixed clock.
pub fn test_app() -> App {
    let mut app = App::new(
        crate::core::fixtures::builtin_conversations(),
        Audience::Parent,
    );
    app.clock = fixed_clock;
    app
}
