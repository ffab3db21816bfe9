use ratatui::layout::Rect;
use ratatui::Frame;

/// A piece of the console that draws itself into a region of the frame.
///
/// Components receive what they display as props (struct fields), may borrow
/// persistent state through a `&mut` field, and render into a `Rect`.
/// `render` takes `&mut self` so a component can refresh layout caches or
/// scroll offsets while drawing, the same way Ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns low-level `TuiEvent`s into component-level events.
pub trait EventHandler {
    /// What the component reports back to the event loop.
    type Event;

    /// Returns `None` when the event was consumed (or ignored) locally.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
