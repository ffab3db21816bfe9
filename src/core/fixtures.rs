//! # Conversation Fixtures
//!
//! The inbox is fed a complete, ordered list of conversations at start-up.
//! That list comes either from the built-in demo set or from a JSON file
//! holding an array of [`Conversation`] records.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::core::model::{
    Audience, Conversation, ConversationId, DeliveryStatus, Message, MessageId, Sender,
};

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Two records share an id, so selection would be ambiguous.
    DuplicateId(ConversationId),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::Io(e) => write!(f, "fixture I/O error: {e}"),
            FixtureError::Parse(e) => write!(f, "fixture parse error: {e}"),
            FixtureError::DuplicateId(id) => write!(f, "duplicate conversation id: {id}"),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Load conversations from a JSON array on disk, preserving file order.
pub fn load_fixtures(path: &Path) -> Result<Vec<Conversation>, FixtureError> {
    let json = fs::read_to_string(path).map_err(FixtureError::Io)?;
    let conversations = parse_fixtures(&json)?;
    info!(
        "Loaded {} conversations from {}",
        conversations.len(),
        path.display()
    );
    Ok(conversations)
}

pub fn parse_fixtures(json: &str) -> Result<Vec<Conversation>, FixtureError> {
    let conversations: Vec<Conversation> =
        serde_json::from_str(json).map_err(FixtureError::Parse)?;

    let mut seen = HashSet::new();
    for conversation in &conversations {
        if !seen.insert(&conversation.id) {
            return Err(FixtureError::DuplicateId(conversation.id.clone()));
        }
    }
    Ok(conversations)
}

/// Load from `path` if given, falling back to the demo set on any error.
pub fn load_or_builtin(path: Option<&Path>) -> Vec<Conversation> {
    match path {
        Some(path) => match load_fixtures(path) {
            Ok(conversations) => conversations,
            Err(e) => {
                warn!("Falling back to built-in conversations: {}", e);
                builtin_conversations()
            }
        },
        None => builtin_conversations(),
    }
}

fn message(id: &str, text: &str, sender: Sender, timestamp: &str) -> Message {
    Message {
        id: MessageId::new(id),
        text: text.to_string(),
        sender,
        timestamp: timestamp.to_string(),
        status: DeliveryStatus::Read,
    }
}

#[allow(clippy::too_many_arguments)]
fn conversation(
    id: &str,
    name: &str,
    avatar: &str,
    time: &str,
    unread_count: u32,
    online: bool,
    audience: Audience,
    messages: Vec<Message>,
) -> Conversation {
    let last_message = messages
        .last()
        .map(|m| m.text.clone())
        .unwrap_or_default();
    Conversation {
        id: ConversationId::new(id),
        name: name.to_string(),
        avatar: avatar.to_string(),
        last_message,
        time: time.to_string(),
        unread_count,
        online,
        audience,
        messages,
    }
}

/// The demo inbox: two parent threads followed by two support threads.
pub fn builtin_conversations() -> Vec<Conversation> {
    vec![
        conversation(
            "1",
            "Jessica Bloom",
            "https://picsum.photos/id/101/100/100",
            "10:45 AM",
            2,
            true,
            Audience::Parent,
            vec![
                message("m1", "Hi, I saw your center today.", Sender::Them, "10:40 AM"),
                message(
                    "m2",
                    "Is the toddler program still open for registration?",
                    Sender::Them,
                    "10:45 AM",
                ),
            ],
        ),
        conversation(
            "2",
            "Michael Chen",
            "https://picsum.photos/id/102/100/100",
            "Yesterday",
            0,
            false,
            Audience::Parent,
            vec![
                message("m3", "Your child had a great day today!", Sender::Me, "4:30 PM"),
                message("m4", "Thanks for the update!", Sender::Them, "4:35 PM"),
            ],
        ),
        conversation(
            "3",
            "ChildrenKARE Support",
            "https://picsum.photos/id/103/100/100",
            "9:15 AM",
            1,
            true,
            Audience::Support,
            vec![
                message(
                    "m5",
                    "Hello, I need help with my license upload.",
                    Sender::Me,
                    "Yesterday",
                ),
                message(
                    "m6",
                    "Your licensing update is being processed.",
                    Sender::Them,
                    "9:15 AM",
                ),
            ],
        ),
        conversation(
            "4",
            "Technical Assistant",
            "https://picsum.photos/id/104/100/100",
            "2 days ago",
            0,
            true,
            Audience::Support,
            vec![message(
                "m7",
                "How can I assist you with the dashboard today?",
                Sender::Them,
                "Mon",
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_set_has_both_audiences_in_order() {
        let conversations = builtin_conversations();
        let audiences: Vec<Audience> = conversations.iter().map(|c| c.audience).collect();
        assert_eq!(
            audiences,
            vec![
                Audience::Parent,
                Audience::Parent,
                Audience::Support,
                Audience::Support
            ]
        );
    }

    #[test]
    fn test_builtin_preview_matches_last_message() {
        for conversation in builtin_conversations() {
            let last = conversation.messages.last().unwrap();
            assert_eq!(conversation.last_message, last.text);
        }
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let json = r#"[
            {"id": "1", "name": "A", "type": "parent"},
            {"id": "1", "name": "B", "type": "support"}
        ]"#;
        match parse_fixtures(json) {
            Err(FixtureError::DuplicateId(id)) => assert_eq!(id.as_str(), "1"),
            other => panic!("Expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_load_fixtures_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "c", "name": "Carol", "type": "support"}},
                {{"id": "a", "name": "Alice", "type": "parent", "unreadCount": 3}}
            ]"#
        )
        .unwrap();

        let conversations = load_fixtures(file.path()).unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].name, "Carol");
        assert_eq!(conversations[1].unread_count, 3);
        assert!(conversations[1].messages.is_empty());
    }

    #[test]
    fn test_malformed_file_falls_back_to_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            load_fixtures(file.path()),
            Err(FixtureError::Parse(_))
        ));
        let conversations = load_or_builtin(Some(file.path()));
        assert_eq!(conversations, builtin_conversations());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_fixtures(&missing), Err(FixtureError::Io(_))));
    }
}
