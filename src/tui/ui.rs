use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::MessageList;

/// Viewport, one blank spacer row, then the input line.
pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let viewport_height = tui.message_list.viewport.height;
    let layout = Layout::vertical([Length(viewport_height), Length(1), Length(1), Min(0)]);
    let [viewport_area, _spacer, input_area, _rest] = layout.areas(frame.area());

    MessageList::new(&mut tui.message_list).render(frame, viewport_area);
    tui.input_box.render(frame, input_area);
}
