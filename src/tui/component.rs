use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// `render` takes `&mut self` so a component can settle presentation state
/// (horizontal scroll of the input, the scroll view offset) while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal input.
pub trait EventHandler {
    /// What the component reports back to the loop, if anything.
    type Event;

    /// Consume one `TuiEvent`; `None` means nothing for the loop to act on.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
