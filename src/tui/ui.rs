//! Frame layout and mouse hit testing.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────────────────────┐
//! │ sidebar  │ page header                                          │
//! │          ├──────────────────────┬───────────────────────────────┤
//! │          │ tabs + conversations │ thread header / bubbles       │
//! │          │                      ├───────────────────────────────┤
//! │          │                      │ composer              [Send]  │
//! └──────────┴──────────────────────┴───────────────────────────────┘
//! ```
//!
//! `draw_ui` records where each pane landed in `TuiState::regions` so that
//! clicks can be resolved against the last frame without recomputing layout.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::model::{Audience, ConversationId};
use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    ConversationList, ConversationListState, InputBox, Placeholder, Sidebar, SidebarState,
    ThreadView, TitleBar,
};
use crate::tui::{Focus, TuiState};

const SIDEBAR_WIDTH: u16 = 28;
const LIST_WIDTH: u16 = 38;
const PAGE_HEADER_HEIGHT: u16 = 3;

/// Screen areas from the last drawn frame. Empty rects for panes that were
/// not drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub sidebar: Rect,
    pub list: Rect,
    pub thread: Rect,
    pub composer: Rect,
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Route(Route),
    Tab(Audience),
    Conversation(ConversationId),
    Send,
    Composer,
    Thread,
}

/// Per-tab unread totals in tab order.
pub fn unread_tabs(app: &App) -> Vec<(Audience, u32)> {
    Audience::ALL
        .iter()
        .map(|audience| (*audience, app.inbox.unread_total(*audience)))
        .collect()
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);
    let [header_area, content_area] =
        Layout::vertical([Length(PAGE_HEADER_HEIGHT), Min(0)]).areas(main_area);

    let mut regions = Regions {
        sidebar: sidebar_area,
        ..Regions::default()
    };

    TitleBar::new(
        app.operator.name.clone(),
        app.operator.role.clone(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    Sidebar::new(&mut tui.sidebar, app.route, tui.focus == Focus::Sidebar)
        .render(frame, sidebar_area);

    draw_page_header(frame, header_area, app);

    if app.route.is_built() {
        draw_messages(frame, content_area, app, tui, &mut regions);
    } else {
        Placeholder { route: app.route }.render(frame, content_area);
    }

    tui.regions = regions;
}

fn draw_page_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            app.route.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.route.subtitle(&app.operator.name),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

fn draw_messages(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    regions: &mut Regions,
) {
    use Constraint::{Length, Min};
    let [list_area, thread_area] = Layout::horizontal([Length(LIST_WIDTH), Min(0)]).areas(area);
    let list_block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let list_inner = list_block.inner(list_area);
    frame.render_widget(list_block, list_area);

    ConversationList::new(
        &mut tui.conversation_list,
        app.inbox.visible_conversations(),
        app.inbox.audience(),
        unread_tabs(app),
        app.inbox.selection(),
        tui.focus == Focus::Conversations,
    )
    .render(frame, list_inner);
    regions.list = list_inner;

    let active = app.inbox.active_thread();
    if active.is_some() {
        let composer_height = tui.input_box.calculate_height(thread_area.width);
        let [view_area, composer_area] =
            Layout::vertical([Min(0), Length(composer_height)]).areas(thread_area);
        ThreadView::new(
            &mut tui.thread,
            active,
            app.inbox.selection_is_filtered_out(),
        )
        .render(frame, view_area);
        tui.input_box.render(frame, composer_area);
        regions.thread = view_area;
        regions.composer = composer_area;
    } else {
        ThreadView::new(&mut tui.thread, None, false).render(frame, thread_area);
        regions.thread = thread_area;
    }
}

/// Resolve a click against the regions of the last frame.
pub fn hit_test(app: &App, tui: &TuiState, column: u16, row: u16) -> Option<Hit> {
    let position = Position::new(column, row);
    let regions = &tui.regions;

    if regions.sidebar.contains(position) {
        return SidebarState::route_at(regions.sidebar, row).map(Hit::Route);
    }
    if !app.route.is_built() {
        return None;
    }
    if regions.list.contains(position) {
        if let Some(audience) =
            ConversationListState::tab_at(regions.list, column, row, &unread_tabs(app))
        {
            return Some(Hit::Tab(audience));
        }
        return tui
            .conversation_list
            .conversation_at(regions.list, row)
            .cloned()
            .map(Hit::Conversation);
    }
    if regions.composer.contains(position) {
        let (_, send_area) = InputBox::split(regions.composer);
        return Some(if send_area.contains(position) {
            Hit::Send
        } else {
            Hit::Composer
        });
    }
    if regions.thread.contains(position) {
        return Some(Hit::Thread);
    }
    None
}
