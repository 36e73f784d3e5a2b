//! # MessageList Component
//!
//! Scrollable view of the message buffer.
//!
//! ## Responsibilities
//!
//! - Hold the wrapped lines for the current viewport width
//! - Own the scroll offset and keep it inside the content bounds
//! - Render only the visible slice into a `tui-scrollview` canvas
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state). Wrapping happens when the
//! buffer or the width changes, never during render.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::MessageBuffer;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::wrap_entry;
use crate::tui::event::TuiEvent;

/// Derived from the terminal size; `height` already excludes the reserved rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub width: u16,
    pub height: u16,
    /// First visible wrapped line.
    pub scroll: u16,
}

impl ViewportState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            scroll: 0,
        }
    }

    /// Columns available to text; the last column belongs to the scrollbar.
    pub fn content_width(&self) -> u16 {
        self.width.saturating_sub(1)
    }
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct MessageListState {
    pub viewport: ViewportState,
    lines: Vec<Line<'static>>,
    scroll_state: ScrollViewState,
}

impl MessageListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the viewport. Lines must be re-wrapped afterwards.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = ViewportState::new(width, height);
    }

    /// Re-wrap every buffered entry to the current width.
    pub fn rewrap(&mut self, buffer: &MessageBuffer) {
        let width = self.viewport.content_width();
        self.lines = buffer
            .iter()
            .flat_map(|entry| wrap_entry(entry, width))
            .collect();
        self.clamp_scroll();
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    fn total_height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    pub fn max_scroll(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport.height)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.viewport.scroll >= self.max_scroll()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.viewport.scroll = self.max_scroll();
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.viewport.scroll) + delta;
        self.viewport.scroll = target.clamp(0, i32::from(self.max_scroll())) as u16;
    }

    fn clamp_scroll(&mut self) {
        self.viewport.scroll = self.viewport.scroll.min(self.max_scroll());
    }
}

/// Scrollable chat view component.
/// Created fresh each frame with a reference to the persistent state.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState) -> Self {
        Self { state }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1);
        let total_height = self.state.total_height();
        let scroll = self.state.viewport.scroll;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Only the visible slice is drawn onto the canvas
        let first = usize::from(scroll).min(self.state.lines.len());
        let last = (first + usize::from(area.height)).min(self.state.lines.len());
        let visible = self.state.lines[first..last].to_vec();
        let visible_height = (last - first) as u16;
        scroll_view.render_widget(
            Paragraph::new(visible),
            Rect::new(0, scroll, content_width, visible_height),
        );

        self.state
            .scroll_state
            .set_offset(Position { x: 0, y: scroll });
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is rebuilt
/// every frame and cannot hold the scroll offset.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = i32::from(self.viewport.height.max(1));
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-page),
            TuiEvent::ScrollPageDown => self.scroll_by(page),
            TuiEvent::CursorEnd => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Entry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_of(count: usize) -> MessageBuffer {
        let mut buffer = MessageBuffer::new();
        for n in 0..count {
            buffer.push(Entry::Status(format!("line {n}")));
        }
        buffer
    }

    fn state_for(buffer: &MessageBuffer, width: u16, height: u16) -> MessageListState {
        let mut state = MessageListState::new();
        state.resize(width, height);
        state.rewrap(buffer);
        state
    }

    #[test]
    fn content_width_reserves_scrollbar_column() {
        assert_eq!(ViewportState::new(80, 20).content_width(), 79);
        assert_eq!(ViewportState::new(0, 20).content_width(), 0);
    }

    #[test]
    fn scroll_to_bottom_shows_last_lines() {
        let buffer = buffer_of(30);
        let mut state = state_for(&buffer, 40, 10);
        state.scroll_to_bottom();
        assert_eq!(state.viewport.scroll, 20);
        assert!(state.is_at_bottom());
    }

    #[test]
    fn short_content_never_scrolls() {
        let buffer = buffer_of(3);
        let mut state = state_for(&buffer, 40, 10);
        state.scroll_to_bottom();
        assert_eq!(state.viewport.scroll, 0);
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.viewport.scroll, 0);
    }

    #[test]
    fn scrolling_is_clamped() {
        let buffer = buffer_of(30);
        let mut state = state_for(&buffer, 40, 10);

        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.viewport.scroll, 0);

        state.handle_event(&TuiEvent::ScrollPageDown);
        assert_eq!(state.viewport.scroll, 10);
        state.handle_event(&TuiEvent::ScrollPageDown);
        state.handle_event(&TuiEvent::ScrollPageDown);
        assert_eq!(state.viewport.scroll, 20);

        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.viewport.scroll, 19);
        assert!(!state.is_at_bottom());

        state.handle_event(&TuiEvent::CursorEnd);
        assert!(state.is_at_bottom());
    }

    #[test]
    fn rewrap_on_narrow_width_produces_more_lines() {
        let mut buffer = MessageBuffer::new();
        buffer.push(Entry::Status("one two three four five six".into()));
        let mut state = state_for(&buffer, 80, 10);
        assert_eq!(state.lines().len(), 1);

        state.resize(9, 10);
        state.rewrap(&buffer);
        assert!(state.lines().len() > 1);
    }

    #[test]
    fn rewrap_clamps_stale_scroll() {
        let buffer = buffer_of(30);
        let mut state = state_for(&buffer, 40, 10);
        state.scroll_to_bottom();

        let shorter = buffer_of(5);
        state.rewrap(&shorter);
        assert_eq!(state.viewport.scroll, 0);
    }

    #[test]
    fn render_shows_bottom_of_buffer() {
        let buffer = buffer_of(30);
        let mut state = state_for(&buffer, 20, 5);
        state.scroll_to_bottom();

        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| MessageList::new(&mut state).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..5)
            .map(|y| (0..19).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect();
        assert!(rows[4].starts_with("line 29"), "rows: {rows:?}");
        assert!(rows[0].starts_with("line 25"), "rows: {rows:?}");
    }
}
