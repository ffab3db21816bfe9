use std::io::Write;

use carehub::core::action::{Action, Effect, update};
use carehub::core::config::{CarehubConfig, CliOverrides, resolve};
use carehub::core::fixtures::{builtin_conversations, load_fixtures, load_or_builtin};
use carehub::core::model::{Audience, ConversationId, DeliveryStatus, Sender};
use carehub::core::outbox::{LocalOutbox, Outbox};
use carehub::core::state::App;

// ============================================================================
// Helper Functions
// ============================================================================

const FIXTURES: &str = r#"[
  {
    "id": "A", "name": "Amy Parent", "avatar": "", "lastMessage": "See you soon",
    "time": "9:00 AM", "unreadCount": 2, "online": true, "type": "parent",
    "messages": [
      { "id": "A1", "text": "Is pickup at 5?", "sender": "them", "timestamp": "8:55 AM", "status": "read" },
      { "id": "A2", "text": "See you soon", "sender": "them", "timestamp": "9:00 AM", "status": "read" }
    ]
  },
  {
    "id": "B", "name": "Ben Parent", "avatar": "", "lastMessage": "Thanks!",
    "time": "Yesterday", "unreadCount": 0, "online": false, "type": "parent",
    "messages": [
      { "id": "B1", "text": "Thanks!", "sender": "them", "timestamp": "Yesterday", "status": "read" }
    ]
  },
  {
    "id": "C", "name": "Carol Support", "avatar": "", "lastMessage": "Ticket closed",
    "time": "Mon", "unreadCount": 1, "online": true, "type": "support",
    "messages": []
  }
]"#;

fn fixture_app() -> App {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURES.as_bytes()).unwrap();
    let conversations = load_fixtures(file.path()).unwrap();

    let config = resolve(&CarehubConfig::default(), &CliOverrides::default());
    let mut app = App::from_config(conversations, &config);
    app.clock = || "10:00 AM".to_string();
    app
}

fn id(s: &str) -> ConversationId {
    ConversationId::new(s)
}

fn visible_ids(app: &App) -> Vec<String> {
    app.inbox
        .visible_conversations()
        .iter()
        .map(|c| c.id.to_string())
        .collect()
}

// ============================================================================
// Inbox walk-through
// ============================================================================

#[test]
fn test_filter_select_and_send_walkthrough() {
    let mut app = fixture_app();

    // Start: parents tab, nothing open
    assert_eq!(visible_ids(&app), vec!["A", "B"]);
    assert!(app.inbox.active_thread().is_none());

    // Open A
    assert_eq!(
        update(&mut app, Action::SelectConversation(id("A"))),
        Effect::ScrollToLatest
    );
    assert_eq!(app.inbox.active_thread().unwrap().name, "Amy Parent");

    // Switch to support: list changes, thread stays on A
    assert_eq!(
        update(&mut app, Action::SetAudience(Audience::Support)),
        Effect::None
    );
    assert_eq!(visible_ids(&app), vec!["C"]);
    assert_eq!(app.inbox.selection(), Some(&id("A")));
    assert!(app.inbox.selection_is_filtered_out());

    // Reply to A from the support tab
    update(&mut app, Action::EditComposer("Yes, 5 sharp".to_string()));
    let effect = update(&mut app, Action::Submit);
    let Effect::Deliver {
        outgoing,
        scroll_to_latest,
    } = effect
    else {
        panic!("expected a delivery, got {effect:?}");
    };
    assert!(scroll_to_latest);
    assert_eq!(outgoing.conversation_id, id("A"));
    assert_eq!(outgoing.text, "Yes, 5 sharp");
    assert_eq!(app.inbox.composer.text(), "");

    let thread = app.inbox.active_thread().unwrap();
    let sent = thread.messages.last().unwrap();
    assert_eq!(sent.sender, Sender::Me);
    assert_eq!(sent.status, DeliveryStatus::Sent);
    assert_eq!(sent.timestamp, "10:00 AM");
    assert_eq!(thread.last_message, "Yes, 5 sharp");

    // The outbox acknowledges it
    let receipt = tokio_test::block_on(LocalOutbox.deliver(outgoing)).unwrap();
    update(&mut app, Action::DeliveryConfirmed(receipt));
    let sent = app.inbox.active_thread().unwrap().messages.last().unwrap();
    assert_eq!(sent.status, DeliveryStatus::Delivered);
}

#[test]
fn test_reselect_does_not_scroll_again() {
    let mut app = fixture_app();
    update(&mut app, Action::SelectConversation(id("B")));
    assert_eq!(
        update(&mut app, Action::SelectConversation(id("B"))),
        Effect::None
    );
}

#[test]
fn test_blank_or_unselected_submit_is_ignored() {
    let mut app = fixture_app();

    update(&mut app, Action::EditComposer("hello".to_string()));
    assert_eq!(update(&mut app, Action::Submit), Effect::None);
    assert_eq!(app.inbox.composer.text(), "hello");

    update(&mut app, Action::SelectConversation(id("A")));
    update(&mut app, Action::EditComposer("   ".to_string()));
    assert_eq!(update(&mut app, Action::Submit), Effect::None);
    assert_eq!(app.inbox.active_thread().unwrap().messages.len(), 2);
}

#[test]
fn test_unread_counts_survive_opening_by_default() {
    let mut app = fixture_app();
    update(&mut app, Action::SelectConversation(id("A")));
    assert_eq!(app.inbox.active_thread().unwrap().unread_count, 2);
    assert_eq!(app.inbox.unread_total(Audience::Parent), 2);
    assert_eq!(app.inbox.unread_total(Audience::Support), 1);
}

#[test]
fn test_unknown_id_shows_empty_state() {
    let mut app = fixture_app();
    assert_eq!(
        update(&mut app, Action::SelectConversation(id("missing"))),
        Effect::None
    );
    assert!(app.inbox.active_thread().is_none());
}

// ============================================================================
// Fixture loading
// ============================================================================

#[test]
fn test_missing_fixture_file_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let conversations = load_or_builtin(Some(&dir.path().join("nope.json")));
    assert_eq!(conversations, builtin_conversations());
}
