//! # ThreadView Component
//!
//! The right-hand pane: header for the selected conversation and its
//! scrollable message history, or the empty state when nothing is selected.
//!
//! ## Architecture
//!
//! `ThreadView` is a transient component (created each frame) that wraps
//! `&'a mut ThreadViewState` (persistent state) and the selected
//! `Conversation` (props).
//!
//! Scrolling is owned here, not in core. Core only decides *when* the view
//! must jump to the newest message (`Effect::ScrollToLatest`); the event loop
//! forwards that to [`ThreadViewState::scroll_to_latest`]. Between those
//! requests the operator's scroll position is left alone.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::model::{Conversation, ConversationId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

/// Header rows: name, presence, bottom border.
const HEADER_HEIGHT: u16 = 3;

/// Scroll and layout state for the thread pane.
/// Must be persisted in the parent TuiState.
pub struct ThreadViewState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, the next render pins the view to the newest message
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for ThreadViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    /// Bring the newest message into view on the next render.
    pub fn scroll_to_latest(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage pinning once the operator scrolls back down to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrolling only; the thread pane emits nothing to the loop.
impl EventHandler for ThreadViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Thread pane component.
/// Created fresh each frame with references to state and data.
pub struct ThreadView<'a> {
    pub state: &'a mut ThreadViewState,
    pub conversation: Option<&'a Conversation>,
    /// Selected conversation belongs to the audience tab not on screen
    pub filtered_out: bool,
}

impl<'a> ThreadView<'a> {
    pub fn new(
        state: &'a mut ThreadViewState,
        conversation: Option<&'a Conversation>,
        filtered_out: bool,
    ) -> Self {
        Self {
            state,
            conversation,
            filtered_out,
        }
    }

    fn render_empty(frame: &mut Frame, area: Rect) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);
        let text = vec![
            Line::from(Span::styled(
                "Your Conversations",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Select a parent or support agent from the left to start chatting...",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            middle,
        );
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, conversation: &Conversation) {
        let mut title = vec![
            Span::styled(
                format!("[{}] ", conversation.initials()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                conversation.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if self.filtered_out {
            title.push(Span::styled(
                format!("  ({} tab)", conversation.audience.label()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let presence = if conversation.online {
            Span::styled("● Online", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Offline", Style::default().fg(Color::DarkGray))
        };

        let header = Paragraph::new(vec![Line::from(title), Line::from(presence)]).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(header, area);
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect, conversation: &Conversation) {
        if conversation.messages.is_empty() {
            frame.render_widget(
                Paragraph::new("No messages yet")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(&conversation.id, conversation.messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in conversation.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageBubble::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(&conversation.id, conversation.messages.len(), content_width);

        let total_height = layout.total_height();

        // 2. Clamp scroll offset
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&conversation.messages[i]), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl Component for ThreadView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(conversation) = self.conversation else {
            Self::render_empty(frame, area);
            return;
        };

        let [header_area, messages_area] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);
        self.render_header(frame, header_area, conversation);
        self.render_messages(frame, messages_area, conversation);
    }
}

/// Cached bubble heights for the conversation last drawn.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    conversation_id: Option<ConversationId>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            conversation_id: None,
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid. Messages are only ever
    /// appended, so a grown thread keeps its prefix.
    pub fn reusable_count(
        &self,
        conversation_id: &ConversationId,
        message_count: usize,
        content_width: u16,
    ) -> usize {
        if self.conversation_id.as_ref() != Some(conversation_id)
            || self.content_width != content_width
            || message_count < self.message_count
        {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(
        &mut self,
        conversation_id: &ConversationId,
        message_count: usize,
        content_width: u16,
    ) {
        self.conversation_id = Some(conversation_id.clone());
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Height of the whole thread, capped at `u16::MAX`.
    pub fn total_height(&self) -> u16 {
        self.heights.iter().fold(0u16, |acc, &h| acc.saturating_add(h))
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
