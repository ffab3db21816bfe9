//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keyboard input goes to one pane at a time. Tab / Shift+Tab cycle through
//! the panes that are on screen:
//!
//! ```text
//! Sidebar ──Tab──▶ Conversations ──Tab──▶ Composer ──Tab──▶ Sidebar
//! ```
//!
//! Clicking a pane focuses it. Esc in the composer returns to the list.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws after an event or a background
//! action. It polls every 500ms when idle and faster while deliveries are in
//! flight so receipts show up promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::model::Conversation;
use crate::core::outbox::{LocalOutbox, Outbox, OutboxError, Outgoing};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConversationListEvent, ConversationListState, InputBox, InputEvent, SidebarEvent,
    SidebarState, ThreadViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{Hit, Regions};

/// How long a single delivery may take before it is reported as failed.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_POLL: Duration = Duration::from_millis(500);
const BUSY_POLL: Duration = Duration::from_millis(50);

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Conversations,
    Composer,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub sidebar: SidebarState,
    pub conversation_list: ConversationListState,
    pub thread: ThreadViewState,
    pub input_box: InputBox,
    /// Pane areas from the last frame, for mouse hit testing
    pub regions: Regions,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        let mut tui = Self {
            focus: Focus::Conversations,
            sidebar: SidebarState::new(app.route),
            conversation_list: ConversationListState::new(),
            thread: ThreadViewState::new(),
            input_box: InputBox::new(),
            regions: Regions::default(),
        };
        tui.sync(app);
        tui
    }

    /// Copy what the components display out of the core state.
    pub fn sync(&mut self, app: &App) {
        let inbox = &app.inbox;
        self.conversation_list.sync(
            inbox
                .visible_conversations()
                .iter()
                .map(|c| c.id.clone())
                .collect(),
            inbox.audience(),
            inbox.selection(),
        );

        let has_thread = app.route.is_built() && inbox.active_thread().is_some();
        self.input_box.enabled = has_thread;
        self.input_box.can_send = has_thread && inbox.composer.can_submit(inbox.selection());
        self.input_box.sync_text(inbox.composer.text());

        if !self.focus_available(app, self.focus) {
            self.focus = if app.route.is_built() {
                Focus::Conversations
            } else {
                Focus::Sidebar
            };
        }
        self.input_box.focused = self.focus == Focus::Composer;
    }

    fn focus_available(&self, app: &App, focus: Focus) -> bool {
        match focus {
            Focus::Sidebar => true,
            Focus::Conversations => app.route.is_built(),
            Focus::Composer => self.input_box.enabled,
        }
    }

    fn cycle_focus(&mut self, app: &App, forward: bool) {
        const ORDER: [Focus; 3] = [Focus::Sidebar, Focus::Conversations, Focus::Composer];
        let start = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        for step in 1..=ORDER.len() {
            let index = if forward {
                (start + step) % ORDER.len()
            } else {
                (start + ORDER.len() - step) % ORDER.len()
            };
            if self.focus_available(app, ORDER[index]) {
                self.focus = ORDER[index];
                break;
            }
        }
        self.input_box.focused = self.focus == Focus::Composer;
    }
}

/// Translate one terminal event into at most one core action. Focus changes,
/// cursor movement and scrolling are handled here and never reach the core.
fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::FocusNext => {
            tui.cycle_focus(app, true);
            return None;
        }
        TuiEvent::FocusPrev => {
            tui.cycle_focus(app, false);
            return None;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.thread.handle_event(event);
            return None;
        }
        TuiEvent::MouseClick(column, row) => {
            return handle_click(app, tui, *column, *row);
        }
        _ => {}
    }

    match tui.focus {
        Focus::Sidebar => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => tui
                .sidebar
                .handle_event(event)
                .map(|SidebarEvent::Navigate(route)| Action::Navigate(route)),
        },
        Focus::Conversations => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => match tui.conversation_list.handle_event(event)? {
                ConversationListEvent::Select(id) => {
                    tui.focus = Focus::Composer;
                    Some(Action::SelectConversation(id))
                }
                ConversationListEvent::SwitchAudience(audience) => {
                    Some(Action::SetAudience(audience))
                }
            },
        },
        Focus::Composer => match event {
            TuiEvent::Escape => {
                tui.focus = Focus::Conversations;
                None
            }
            _ => match tui.input_box.handle_event(event)? {
                InputEvent::ContentChanged(text) => Some(Action::EditComposer(text)),
                InputEvent::Submit => Some(Action::Submit),
            },
        },
    }
}

fn handle_click(app: &App, tui: &mut TuiState, column: u16, row: u16) -> Option<Action> {
    let hit = ui::hit_test(app, tui, column, row)?;
    debug!("Click at ({}, {}) hit {:?}", column, row, hit);
    match hit {
        Hit::Route(route) => {
            tui.focus = Focus::Sidebar;
            tui.sidebar = SidebarState::new(route);
            Some(Action::Navigate(route))
        }
        Hit::Tab(audience) => {
            tui.focus = Focus::Conversations;
            Some(Action::SetAudience(audience))
        }
        Hit::Conversation(id) => {
            tui.focus = Focus::Conversations;
            tui.conversation_list.point_at(&id);
            Some(Action::SelectConversation(id))
        }
        Hit::Send => Some(Action::Submit),
        Hit::Composer => {
            tui.focus = Focus::Composer;
            None
        }
        Hit::Thread => None,
    }
}

/// Run an action through the core and carry out the effect it returns.
/// Returns `true` when the app should exit.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    outbox: &Arc<dyn Outbox>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let effect = update(app, action);
    let quit = match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::ScrollToLatest => {
            tui.thread.scroll_to_latest();
            false
        }
        Effect::Deliver {
            outgoing,
            scroll_to_latest,
        } => {
            if scroll_to_latest {
                tui.thread.scroll_to_latest();
            }
            spawn_delivery(outbox.clone(), outgoing, tx.clone());
            false
        }
    };
    tui.sync(app);
    quit
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

pub fn run(config: ResolvedConfig, conversations: Vec<Conversation>) -> std::io::Result<()> {
    let mut app = App::from_config(conversations, &config);
    let mut tui = TuiState::new(&app);
    let outbox: Arc<dyn Outbox> = Arc::new(LocalOutbox);
    info!(
        "Starting inbox: {} conversations, audience {:?}, outbox {}",
        app.inbox.conversations().len(),
        app.inbox.audience(),
        outbox.name()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let result = event_loop(&mut terminal, &mut app, &mut tui, &outbox);
    // Restore on every exit path, including a failed draw
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    outbox: &Arc<dyn Outbox>,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        // Every in-flight delivery task holds a clone of the outbox
        let timeout = if Arc::strong_count(outbox) > 1 {
            BUSY_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(app, tui, &event)
                && dispatch(app, tui, action, outbox, &tx)
            {
                should_quit = true;
                break;
            }
        }

        // Delivery results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(app, tui, action, outbox, &tx) {
                should_quit = true;
            }
        }
    }

    Ok(())
}

fn spawn_delivery(outbox: Arc<dyn Outbox>, outgoing: Outgoing, tx: mpsc::Sender<Action>) {
    info!(
        "Handing message {} to outbox {} (conversation={})",
        outgoing.message_id,
        outbox.name(),
        outgoing.conversation_id
    );
    tokio::spawn(async move {
        let message_id = outgoing.message_id.clone();
        let action = match tokio::time::timeout(DELIVERY_TIMEOUT, outbox.deliver(outgoing)).await {
            Ok(Ok(receipt)) => Action::DeliveryConfirmed(receipt),
            Ok(Err(error)) => Action::DeliveryFailed { message_id, error },
            Err(_) => {
                warn!(
                    "Delivery of {} timed out after {}s",
                    message_id,
                    DELIVERY_TIMEOUT.as_secs()
                );
                Action::DeliveryFailed {
                    message_id,
                    error: OutboxError::Unavailable("timed out".to_string()),
                }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to report delivery result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Audience, ConversationId, Sender};
    use crate::core::route::Route;
    use crate::test_support::scenario_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
        let action = handle_event(app, tui, &event)?;
        update(app, action.clone());
        tui.sync(app);
        Some(action)
    }

    fn type_str(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            press(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_starts_on_conversation_list() {
        let app = scenario_app();
        let tui = TuiState::new(&app);
        assert_eq!(tui.focus, Focus::Conversations);
        assert!(!tui.input_box.enabled);
    }

    #[test]
    fn test_enter_on_list_selects_and_focuses_composer() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);

        press(&mut app, &mut tui, TuiEvent::CursorDown);
        let action = press(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(
            action,
            Some(Action::SelectConversation(ConversationId::new("B")))
        );
        assert_eq!(app.inbox.selection(), Some(&ConversationId::new("B")));
        assert_eq!(tui.focus, Focus::Composer);
        assert!(tui.input_box.enabled);
    }

    #[test]
    fn test_typing_and_enter_sends_message() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::Submit);

        type_str(&mut app, &mut tui, "See you at 5");
        assert_eq!(app.inbox.composer.text(), "See you at 5");
        assert!(tui.input_box.can_send);

        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.inbox.composer.text(), "");
        assert_eq!(tui.input_box.buffer, "");

        let thread = app.inbox.active_thread().unwrap();
        let last = thread.messages.last().unwrap();
        assert_eq!(last.text, "See you at 5");
        assert_eq!(last.sender, Sender::Me);
    }

    #[test]
    fn test_clicking_send_matches_enter() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::Submit);
        type_str(&mut app, &mut tui, "See you at 5");

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)).unwrap();
        let composer = tui.regions.composer;
        let before = app.inbox.active_thread().unwrap().messages.len();

        let action = press(
            &mut app,
            &mut tui,
            TuiEvent::MouseClick(composer.right() - 2, composer.y + 1),
        );
        assert_eq!(action, Some(Action::Submit));
        assert_eq!(app.inbox.composer.text(), "");
        assert_eq!(tui.input_box.buffer, "");

        let thread = app.inbox.active_thread().unwrap();
        assert_eq!(thread.messages.len(), before + 1);
        let last = thread.messages.last().unwrap();
        assert_eq!(last.text, "See you at 5");
        assert_eq!(last.sender, Sender::Me);
    }

    #[test]
    fn test_blank_submit_keeps_text() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::Submit);

        type_str(&mut app, &mut tui, "   ");
        assert!(!tui.input_box.can_send);
        let before = app.inbox.active_thread().unwrap().messages.len();

        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(tui.input_box.buffer, "   ");
        assert_eq!(app.inbox.active_thread().unwrap().messages.len(), before);
    }

    #[test]
    fn test_q_quits_outside_composer_only() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(
            handle_event(&app, &mut tui, &TuiEvent::InputChar('q')),
            Some(Action::Quit)
        );

        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(tui.focus, Focus::Composer);
        assert_eq!(
            handle_event(&app, &mut tui, &TuiEvent::InputChar('q')),
            Some(Action::EditComposer("q".to_string()))
        );
    }

    #[test]
    fn test_escape_leaves_composer() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::Submit);
        press(&mut app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::Conversations);
    }

    #[test]
    fn test_tab_cycle_skips_composer_without_thread() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);

        press(&mut app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Sidebar);
        press(&mut app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Conversations);
        press(&mut app, &mut tui, TuiEvent::FocusPrev);
        assert_eq!(tui.focus, Focus::Sidebar);
    }

    #[test]
    fn test_switching_tab_keeps_selection() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        press(&mut app, &mut tui, TuiEvent::Submit);
        press(&mut app, &mut tui, TuiEvent::Escape);

        press(&mut app, &mut tui, TuiEvent::InputChar('s'));
        assert_eq!(app.inbox.audience(), Audience::Support);
        assert_eq!(app.inbox.selection(), Some(&ConversationId::new("A")));
        assert_eq!(
            tui.conversation_list.visible(),
            &[ConversationId::new("C")]
        );
    }

    #[test]
    fn test_sidebar_navigation_moves_focus_off_list() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Sidebar;

        press(&mut app, &mut tui, TuiEvent::CursorUp);
        press(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(app.route, Route::Profile);
        assert_eq!(tui.focus, Focus::Sidebar);

        press(&mut app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::Sidebar);
    }

    #[tokio::test]
    async fn test_delivery_reports_back_through_channel() {
        let mut app = scenario_app();
        let mut tui = TuiState::new(&app);
        let outbox: Arc<dyn Outbox> = Arc::new(LocalOutbox);
        let (tx, rx) = mpsc::channel();

        update(&mut app, Action::SelectConversation(ConversationId::new("A")));
        update(&mut app, Action::EditComposer("Hello".to_string()));
        assert!(!dispatch(&mut app, &mut tui, Action::Submit, &outbox, &tx));

        let mut received = None;
        for _ in 0..100 {
            if let Ok(action) = rx.try_recv() {
                received = Some(action);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(matches!(received, Some(Action::DeliveryConfirmed(_))));
    }
}
