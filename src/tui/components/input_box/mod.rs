//! # InputBox Component
//!
//! The composer at the bottom of the open thread, plus its Send button.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete, cursor movement)
//! - Report every edit so the core composer mirrors the buffer
//! - Report Enter as a submit request
//! - Show the Send button enabled or disabled
//!
//! ## State Management
//!
//! The buffer is internal state mirrored into `core::composer::Composer`
//! after every edit. Whether a submit is accepted is decided by the core; the
//! box only clears when the core says so (see [`InputBox::sync_text`]).

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, flatten_newlines, inner_width, next_char_boundary,
    prev_char_boundary, wrap_line_count, wrap_options,
};

/// Columns reserved on the right for the Send button.
pub const SEND_BUTTON_WIDTH: u16 = 10;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Buffer text changed; carries the new text.
    ContentChanged(String),
    /// Enter pressed. The core decides whether anything is sent.
    Submit,
}

/// Composer text field.
///
/// # Props
///
/// - `enabled`: a conversation is selected
/// - `can_send`: the core would accept a submit right now
/// - `focused`: keyboard focus is on the composer
pub struct InputBox {
    pub buffer: String,
    pub enabled: bool,
    pub can_send: bool,
    pub focused: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            enabled: false,
            can_send: false,
            focused: false,
            cursor: CursorState::new(),
        }
    }

    /// Replace the buffer with the core's composer text if they differ.
    /// Used after a submit clears the composer.
    pub fn sync_text(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor.move_to_end(&self.buffer);
        }
    }

    /// Required height for the current buffer, clamped to the visible limit.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let text_width = area_width.saturating_sub(SEND_BUTTON_WIDTH);
        let lines = wrap_line_count(&self.buffer, inner_width(text_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Split the composer area into text field and Send button.
    pub fn split(area: Rect) -> (Rect, Rect) {
        let [text_area, button_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(SEND_BUTTON_WIDTH)])
                .areas(area);
        (text_area, button_area)
    }

    fn visible_text(&self, text_width: u16) -> String {
        let width = inner_width(text_width);
        if width == 0 {
            return String::new();
        }
        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn edited(&self) -> Option<InputEvent> {
        Some(InputEvent::ContentChanged(self.buffer.clone()))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (text_area, button_area) = Self::split(area);
        self.cursor.update_scroll_offset(&self.buffer, text_area.width);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Message")
            .padding(ratatui::widgets::Padding::horizontal(1));

        let field = if !self.enabled {
            Paragraph::new("Select a conversation to reply")
                .style(Style::default().fg(Color::DarkGray))
        } else if self.buffer.is_empty() {
            Paragraph::new("Type a message...").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.visible_text(text_area.width))
                .style(Style::default().fg(Color::White))
        };
        frame.render_widget(field.block(block), text_area);

        let button_style = if self.can_send {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let button = Paragraph::new("Send")
            .alignment(Alignment::Center)
            .style(button_style)
            .block(Block::bordered().border_type(BorderType::Rounded).border_style(button_style));
        frame.render_widget(button, button_area);

        if self.focused && self.enabled {
            let (x, y) = self.cursor.screen_pos(&self.buffer, text_area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                self.edited()
            }
            TuiEvent::Paste(text) => {
                let text = flatten_newlines(text);
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                self.edited()
            }
            TuiEvent::Backspace if self.cursor.pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                self.edited()
            }
            TuiEvent::Delete if self.cursor.pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                self.edited()
            }
            TuiEvent::CursorLeft => {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(input: &mut InputBox, width: u16) -> String {
        let backend = TestBackend::new(width, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_reports_buffer() {
        let mut input = InputBox::new();
        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('h')),
            Some(InputEvent::ContentChanged("h".to_string()))
        );
        input.handle_event(&TuiEvent::InputChar('i'));
        assert_eq!(
            input.handle_event(&TuiEvent::Backspace),
            Some(InputEvent::ContentChanged("h".to_string()))
        );
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut input = InputBox::new();
        for c in "hllo".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_enter_requests_submit_without_clearing() {
        let mut input = InputBox::new();
        input.sync_text("Hello");
        assert_eq!(input.handle_event(&TuiEvent::Submit), Some(InputEvent::Submit));
        assert_eq!(input.buffer, "Hello");

        input.sync_text("");
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("pickup\nat 5".to_string()));
        assert_eq!(input.buffer, "pickup at 5");
    }

    #[test]
    fn test_disabled_shows_select_hint() {
        let mut input = InputBox::new();
        let text = rendered_text(&mut input, 60);
        assert!(text.contains("Select a conversation"));
        assert!(text.contains("Send"));
    }

    #[test]
    fn test_enabled_empty_shows_placeholder() {
        let mut input = InputBox::new();
        input.enabled = true;
        let text = rendered_text(&mut input, 60);
        assert!(text.contains("Type a message..."));
    }

    #[test]
    fn test_height_grows_then_clamps() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);
        input.sync_text(&"word ".repeat(200));
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }
}
