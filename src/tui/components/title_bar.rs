//! # TitleBar Component
//!
//! Top status line: product name, signed-in operator and the latest status.
//!
//! Purely presentational. All three props come from core `App` state:
//!
//! 1. **With status**: `"CareHub | Sarah Jenkins (Center Director) | Message delivered"`
//! 2. **Without status**: `"CareHub | Sarah Jenkins (Center Director)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `operator_name`: who is signed in
/// - `operator_role`: shown in parentheses after the name
/// - `status_message`: transient status, omitted when empty
pub struct TitleBar {
    pub operator_name: String,
    pub operator_role: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(operator_name: String, operator_role: String, status_message: String) -> Self {
        Self {
            operator_name,
            operator_role,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "CareHub",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " | {} ({})",
                self.operator_name, self.operator_role
            )),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
