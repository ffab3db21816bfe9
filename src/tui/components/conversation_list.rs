//! # ConversationList Component
//!
//! Audience tabs plus the list of conversations for the active tab.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ConversationListState` lives in `TuiState`: keyboard cursor, list
//!   scroll offset and the ids currently on screen
//! - `ConversationList` is created each frame with the visible conversations
//!   and the current selection as props
//!
//! The keyboard cursor and the inbox selection are different things. The
//! cursor only moves a highlight; pressing Enter (or clicking a row) turns it
//! into a `Select` event for the core.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, HighlightSpacing, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::model::{Audience, Conversation, ConversationId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Tab row plus the rule beneath it.
const TABS_HEIGHT: u16 = 2;
/// Every conversation row is two lines: name/time and preview.
const ROW_HEIGHT: u16 = 2;
const HIGHLIGHT_SYMBOL: &str = "▌ ";

/// Persistent state for the conversation list.
pub struct ConversationListState {
    pub cursor: usize,
    list_state: ListState,
    visible: Vec<ConversationId>,
    audience: Audience,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationListEvent {
    Select(ConversationId),
    SwitchAudience(Audience),
}

impl Default for ConversationListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationListState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            list_state: ListState::default(),
            visible: Vec::new(),
            audience: Audience::default(),
        }
    }

    /// Refresh what is on screen. A tab change moves the cursor to the
    /// selected conversation when it is in the new list, else to the top.
    pub fn sync(
        &mut self,
        visible: Vec<ConversationId>,
        audience: Audience,
        selection: Option<&ConversationId>,
    ) {
        if audience != self.audience {
            self.audience = audience;
            self.cursor = selection
                .and_then(|id| visible.iter().position(|v| v == id))
                .unwrap_or(0);
            *self.list_state.offset_mut() = 0;
        }
        self.visible = visible;
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
        self.list_state
            .select((!self.visible.is_empty()).then_some(self.cursor));
    }

    pub fn visible(&self) -> &[ConversationId] {
        &self.visible
    }

    /// Put the cursor on `id` if it is on screen.
    pub fn point_at(&mut self, id: &ConversationId) {
        if let Some(index) = self.visible.iter().position(|v| v == id) {
            self.move_cursor(index);
        }
    }

    fn move_cursor(&mut self, cursor: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = cursor.min(self.visible.len() - 1);
        self.list_state.select(Some(self.cursor));
    }

    /// Conversation under a screen row of the list pane.
    pub fn conversation_at(&self, area: Rect, row: u16) -> Option<&ConversationId> {
        let first = area.y + TABS_HEIGHT;
        if row < first {
            return None;
        }
        let index = self.list_state.offset() + ((row - first) / ROW_HEIGHT) as usize;
        self.visible.get(index)
    }

    /// Audience tab under a screen position of the list pane.
    pub fn tab_at(area: Rect, column: u16, row: u16, unread: &[(Audience, u32)]) -> Option<Audience> {
        if row != area.y {
            return None;
        }
        let mut x = area.x;
        for (audience, count) in unread {
            let width = tab_label(*audience, *count).width() as u16;
            if column >= x && column < x + width {
                return Some(*audience);
            }
            x += width + 1;
        }
        None
    }
}

impl EventHandler for ConversationListState {
    type Event = ConversationListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConversationListEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.move_cursor(self.cursor.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.move_cursor(self.cursor + 1);
                None
            }
            TuiEvent::CursorHome => {
                self.move_cursor(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.move_cursor(self.visible.len().saturating_sub(1));
                None
            }
            TuiEvent::Submit => self
                .visible
                .get(self.cursor)
                .cloned()
                .map(ConversationListEvent::Select),
            TuiEvent::CursorLeft | TuiEvent::CursorRight => Some(
                ConversationListEvent::SwitchAudience(self.audience.toggled()),
            ),
            TuiEvent::InputChar('p') => Some(ConversationListEvent::SwitchAudience(Audience::Parent)),
            TuiEvent::InputChar('s') => {
                Some(ConversationListEvent::SwitchAudience(Audience::Support))
            }
            _ => None,
        }
    }
}

fn tab_label(audience: Audience, unread: u32) -> String {
    if unread > 0 {
        format!(" {} ({}) ", audience.label(), unread)
    } else {
        format!(" {} ", audience.label())
    }
}

/// Shorten `s` to at most `max_width` columns, ending in "..." when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) > max_width - 3 {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Transient render wrapper.
pub struct ConversationList<'a> {
    state: &'a mut ConversationListState,
    conversations: Vec<&'a Conversation>,
    audience: Audience,
    /// Unread totals per tab, in tab order
    unread: Vec<(Audience, u32)>,
    selection: Option<&'a ConversationId>,
    focused: bool,
}

impl<'a> ConversationList<'a> {
    pub fn new(
        state: &'a mut ConversationListState,
        conversations: Vec<&'a Conversation>,
        audience: Audience,
        unread: Vec<(Audience, u32)>,
        selection: Option<&'a ConversationId>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            conversations,
            audience,
            unread,
            selection,
            focused,
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, (audience, count)) in self.unread.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if *audience == self.audience {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(tab_label(*audience, *count), style));
        }
        let tabs = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(tabs, area);
    }

    fn row(&self, conversation: &Conversation, width: usize) -> ListItem<'static> {
        let is_selected = self.selection == Some(&conversation.id);
        let base = if is_selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        // Line 1: "[JB] ● Name            10:30 AM"
        let presence = if conversation.online {
            Span::styled("● ", base.fg(Color::Green))
        } else {
            Span::styled("  ", base)
        };
        let avatar = format!("[{}] ", conversation.initials());
        let fixed = avatar.width() + 2 + conversation.time.width() + 1;
        let name = truncate(&conversation.name, width.saturating_sub(fixed));
        let gap = width.saturating_sub(fixed - 1 + name.width()).max(1);
        let top = Line::from(vec![
            Span::styled(avatar, base.fg(Color::Cyan)),
            presence,
            Span::styled(name, base.add_modifier(Modifier::BOLD)),
            Span::styled(" ".repeat(gap), base),
            Span::styled(conversation.time.clone(), base.fg(Color::DarkGray)),
        ]);

        // Line 2: "     preview text...            (2)"
        let badge = if conversation.unread_count > 0 {
            format!(" ({})", conversation.unread_count)
        } else {
            String::new()
        };
        let indent = "     ";
        let preview = truncate(
            &conversation.last_message,
            width.saturating_sub(indent.len() + badge.width()),
        );
        let pad = width.saturating_sub(indent.len() + preview.width() + badge.width());
        let preview_style = if conversation.unread_count > 0 {
            base.fg(Color::White)
        } else {
            base.fg(Color::Gray)
        };
        let bottom = Line::from(vec![
            Span::styled(indent, base),
            Span::styled(preview, preview_style),
            Span::styled(" ".repeat(pad), base),
            Span::styled(
                badge,
                base.fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]);

        ListItem::new(vec![top, bottom])
    }
}

impl Component for ConversationList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [tabs_area, list_area] =
            Layout::vertical([Constraint::Length(TABS_HEIGHT), Constraint::Min(0)]).areas(area);
        self.render_tabs(frame, tabs_area);

        if self.conversations.is_empty() {
            frame.render_widget(
                Paragraph::new(format!("No {} conversations", self.audience.label().to_lowercase()))
                    .style(Style::default().fg(Color::DarkGray)),
                list_area,
            );
            return;
        }

        let row_width = (list_area.width as usize).saturating_sub(HIGHLIGHT_SYMBOL.width());
        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .map(|c| self.row(c, row_width))
            .collect();

        let symbol = if self.focused { HIGHLIGHT_SYMBOL } else { "  " };
        let list = List::new(items)
            .highlight_symbol(symbol)
            .highlight_spacing(HighlightSpacing::Always);
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}
