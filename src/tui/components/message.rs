use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::model::{DeliveryStatus, Message};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the thread width.
const MAX_BUBBLE_PERCENT: u16 = 70;
/// Blank row between consecutive bubbles.
const GAP: u16 = 1;

/// One chat bubble. Operator messages sit on the right, the other party on
/// the left.
///
/// Like the rest of the thread this is a transient component: built per frame
/// from a borrowed `core::model::Message`. [`calculate_height`](Self::calculate_height)
/// must agree with what `render` draws so the thread can lay out its scroll
/// canvas without rendering.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn max_bubble_width(width: u16) -> u16 {
        ((u32::from(width) * u32::from(MAX_BUBBLE_PERCENT) / 100) as u16).max(HORIZONTAL_OVERHEAD + 1)
    }

    fn wrap(text: &str, content_width: u16) -> Vec<String> {
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines: Vec<String> = textwrap::wrap(text.trim(), options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }

    /// Footer on the bottom border: timestamp, plus a delivery mark for the
    /// operator's own messages.
    fn footer(message: &Message) -> Line<'static> {
        let time = Span::styled(
            format!(" {} ", message.timestamp),
            Style::default().fg(Color::DarkGray),
        );
        if !message.is_mine() {
            return Line::from(time);
        }
        let (mark, style) = match message.status {
            DeliveryStatus::Sent => ("✓", Style::default().fg(Color::DarkGray)),
            DeliveryStatus::Delivered => ("✓✓", Style::default().fg(Color::DarkGray)),
            DeliveryStatus::Read => ("✓✓", Style::default().fg(Color::Cyan)),
        };
        Line::from(vec![time, Span::styled(format!("{mark} "), style)])
    }

    /// Text width available inside the widest bubble allowed.
    fn content_width(width: u16) -> u16 {
        Self::max_bubble_width(width)
            .min(width)
            .saturating_sub(HORIZONTAL_OVERHEAD)
    }

    /// Bubble width for this message inside a thread `width` columns wide.
    fn bubble_width(message: &Message, width: u16) -> u16 {
        let content_width = Self::content_width(width);
        if content_width == 0 {
            return width;
        }
        let widest_line = Self::wrap(&message.text, content_width)
            .iter()
            .map(|line| line.width() as u16)
            .max()
            .unwrap_or(0);
        let footer_width = Self::footer(message).width() as u16;
        let bubble = widest_line.max(footer_width) + HORIZONTAL_OVERHEAD;
        bubble.min(content_width + HORIZONTAL_OVERHEAD)
    }

    /// Rows this bubble occupies (including the gap below it).
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = Self::content_width(width);
        if content_width == 0 {
            return 1;
        }
        let line_count = Self::wrap(&message.text, content_width).len();
        let lines = u16::try_from(line_count).unwrap_or(u16::MAX);
        lines.saturating_add(VERTICAL_OVERHEAD + GAP)
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bubble_height = area.height.saturating_sub(GAP);
        let bubble_width = Self::bubble_width(self.message, area.width);
        let x = if self.message.is_mine() {
            area.x + area.width.saturating_sub(bubble_width)
        } else {
            area.x
        };
        let bubble = Rect::new(x, area.y, bubble_width, bubble_height);

        let (text_style, border_style) = if self.message.is_mine() {
            (
                Style::default().fg(Color::White),
                Style::default().fg(Color::Blue),
            )
        } else {
            (
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::DarkGray),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_bottom(Self::footer(self.message).right_aligned())
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        // Wrap at the same width `calculate_height` used.
        let wrap_width = match Self::content_width(area.width) {
            0 => inner.width.max(1),
            w => w,
        };
        let lines: Vec<Line> = Self::wrap(&self.message.text, wrap_width)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines).style(text_style).render(inner, buf);
    }
}

impl Component for MessageBubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
