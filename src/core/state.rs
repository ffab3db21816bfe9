//! # Application State
//!
//! Core business state for CareHub. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── inbox: Inbox                 // conversations + selection + composer
//! ├── route: Route                 // active sidebar page
//! ├── operator: Operator           // who is signed in (display only)
//! ├── options: InboxOptions        // resolved behaviour switches
//! ├── status_message: String       // status bar text
//! └── clock: fn() -> String        // display time for sent messages
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::ResolvedConfig;
use crate::core::inbox::Inbox;
use crate::core::model::{Audience, Conversation};
use crate::core::route::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboxOptions {
    /// Append accepted submissions to the thread as `Me` / `Sent`.
    pub append_sent_messages: bool,
    /// Zero the unread badge when a conversation is selected.
    pub mark_read_on_open: bool,
}

impl Default for InboxOptions {
    fn default() -> Self {
        Self {
            append_sent_messages: crate::core::config::DEFAULT_APPEND_SENT_MESSAGES,
            mark_read_on_open: crate::core::config::DEFAULT_MARK_READ_ON_OPEN,
        }
    }
}

pub struct App {
    pub inbox: Inbox,
    pub route: Route,
    pub operator: Operator,
    pub options: InboxOptions,
    pub status_message: String,
    pub clock: fn() -> String,
}

/// Wall-clock time in the same style as the fixture timestamps ("4:30 PM").
pub fn local_clock() -> String {
    chrono::Local::now().format("%-I:%M %p").to_string()
}

impl App {
    pub fn new(conversations: Vec<Conversation>, audience: Audience) -> Self {
        Self {
            inbox: Inbox::new(conversations, audience),
            route: Route::default(),
            operator: Operator {
                name: crate::core::config::DEFAULT_OPERATOR_NAME.to_string(),
                role: crate::core::config::DEFAULT_OPERATOR_ROLE.to_string(),
            },
            options: InboxOptions::default(),
            status_message: String::from("Welcome to CareHub!"),
            clock: local_clock,
        }
    }

    pub fn from_config(conversations: Vec<Conversation>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(conversations, config.audience);
        app.operator = Operator {
            name: config.operator_name.clone(),
            role: config.operator_role.clone(),
        };
        app.options = InboxOptions {
            append_sent_messages: config.append_sent_messages,
            mark_read_on_open: config.mark_read_on_open,
        };
        app
    }
}
