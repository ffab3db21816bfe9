//! Cursor tracking for the composer.
//!
//! `CursorState` owns the byte offset and the internal scroll offset. The text
//! itself stays in `InputBox` and is passed in explicitly.

use super::text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the buffer (0..=buffer.len())
    pub pos: usize,
    /// First wrapped line shown when the text outgrows the box
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Place the cursor at the end of `buffer`.
    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
        self.scroll_offset = 0;
    }

    /// Wrapped line index and column of the cursor.
    fn line_and_column(&self, buffer: &str, width: u16) -> (u16, u16) {
        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        if lines.is_empty() {
            return (0, 0);
        }
        let line = (lines.len() - 1) as u16;
        // textwrap trims the spaces it ends a line on; the cursor sits after them.
        let trailing_spaces = before.len() - before.trim_end_matches(' ').len();
        let column = (lines[lines.len() - 1].chars().count() + trailing_spaces) as u16;
        // A cursor sitting exactly on the wrap edge shows at the next line start.
        if column >= width {
            return (line + 1, 0);
        }
        (line, column)
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        if width == 0 || wrap_line_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (line, _) = self.line_and_column(buffer, width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = line + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Screen coordinates (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET, area.y + 1);
        }
        let (line, column) = self.line_and_column(buffer, width);
        let visible_line = line.saturating_sub(self.scroll_offset);
        (area.x + CONTENT_OFFSET + column, area.y + 1 + visible_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_start_sits_inside_border() {
        let cursor = CursorState::new();
        let area = Rect::new(10, 5, 30, 3);
        assert_eq!(cursor.screen_pos("", area), (12, 6));
    }

    #[test]
    fn cursor_follows_text() {
        let mut cursor = CursorState::new();
        cursor.move_to_end("hello");
        let area = Rect::new(0, 0, 30, 3);
        assert_eq!(cursor.screen_pos("hello", area), (7, 1));
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        // inner width 6: wraps to "aaaaaa" | "bbbbbb" | "cccccc" | "dd"
        let text = "aaaaaa bbbbbb cccccc dd";
        let mut cursor = CursorState::new();
        cursor.move_to_end(text);
        cursor.update_scroll_offset(text, 10);
        assert_eq!(cursor.scroll_offset, 1);

        cursor.pos = 0;
        cursor.update_scroll_offset(text, 10);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
