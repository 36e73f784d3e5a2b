//! Cursor position and horizontal scroll for the single-line input.
//!
//! `CursorState` owns the cursor byte offset and the scrolled-off column count.
//! Methods take `buffer: &str` explicitly; the text itself is owned by `InputBox`.

use super::text::display_width;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Columns scrolled off the left edge when the line is wider than the field
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Column of the cursor within the whole line.
    pub fn column(&self, buffer: &str) -> u16 {
        display_width(&buffer[..self.pos])
    }

    /// Scroll just enough to keep the cursor inside a field `width` columns wide.
    /// One column is kept free so the cursor can sit after the last character.
    pub fn update_scroll_offset(&mut self, buffer: &str, width: u16) {
        let usable = width.saturating_sub(1);
        let column = self.column(buffer);
        if column < self.scroll_offset {
            self.scroll_offset = column;
        } else if column > self.scroll_offset + usable {
            self.scroll_offset = column - usable;
        }
    }

    /// Cursor column relative to the left edge of the field.
    pub fn visible_column(&self, buffer: &str) -> u16 {
        self.column(buffer).saturating_sub(self.scroll_offset)
    }
}
