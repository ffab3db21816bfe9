//! # Sidebar Component
//!
//! Left navigation column listing the dashboard pages.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` (keyboard cursor)
//! - `Sidebar` is created each frame with the active route as a prop

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::route::Route;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows above the first route (the top border).
pub const FIRST_ROUTE_ROW: u16 = 1;

pub struct SidebarState {
    pub cursor: usize,
    list_state: ListState,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl SidebarState {
    pub fn new(active: Route) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(active.index()));
        Self {
            cursor: active.index(),
            list_state,
        }
    }

    fn move_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(Route::ALL.len() - 1);
        self.list_state.select(Some(self.cursor));
    }

    /// Route under a row of the sidebar area, if any.
    pub fn route_at(area: Rect, row: u16) -> Option<Route> {
        let first = area.y + FIRST_ROUTE_ROW;
        if row < first {
            return None;
        }
        Route::ALL.get((row - first) as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    Navigate(Route),
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.move_cursor(self.cursor.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.move_cursor(self.cursor + 1);
                None
            }
            TuiEvent::Submit => Route::ALL
                .get(self.cursor)
                .map(|route| SidebarEvent::Navigate(*route)),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    active: Route,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a mut SidebarState, active: Route, focused: bool) -> Self {
        Self {
            state,
            active,
            focused,
        }
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Route::ALL
            .iter()
            .map(|route| {
                let style = if *route == self.active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(route.label(), style)))
            })
            .collect();

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::RIGHT | Borders::TOP)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let mut list = List::new(items).block(block);
        if self.focused {
            list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
