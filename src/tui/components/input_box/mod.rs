//! # InputBox Component
//!
//! Single-line text input at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input, up to [`CHAR_LIMIT`] characters
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter never inserts a newline)
//! - Show a placeholder when empty and the user can send
//!
//! ## State Management
//!
//! The buffer is internal state. Cursor position and horizontal scroll are
//! encapsulated in `CursorState`.

mod cursor;
mod text;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text::{display_width, next_char_boundary, prev_char_boundary, single_line, visible_slice};

pub const PROMPT: &str = "> ";
pub const PLACEHOLDER: &str = "Send a message...";
pub const CHAR_LIMIT: usize = 500;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed. Carries the line; the box is already cleared.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Shown dimmed while the buffer is empty
    placeholder: Option<&'static str>,
    cursor: CursorState,
}

impl InputBox {
    /// The placeholder only makes sense when there is a send session.
    pub fn new(can_send: bool) -> Self {
        Self {
            buffer: String::new(),
            placeholder: can_send.then_some(PLACEHOLDER),
            cursor: CursorState::new(),
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    fn remaining(&self) -> usize {
        CHAR_LIMIT.saturating_sub(self.buffer.chars().count())
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        let text: String = single_line(text).chars().take(self.remaining()).collect();
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let prompt_width = display_width(PROMPT);
        let field_width = area.width.saturating_sub(prompt_width);
        self.cursor.update_scroll_offset(&self.buffer, field_width);

        let prompt = Span::styled(PROMPT, Style::default().fg(Color::Rgb(0xFA, 0xFA, 0xFA)));
        let line = match self.placeholder {
            Some(placeholder) if self.buffer.is_empty() => Line::from(vec![
                prompt,
                Span::styled(placeholder, Style::default().add_modifier(Modifier::DIM)),
            ]),
            _ => Line::from(vec![
                prompt,
                Span::raw(visible_slice(&self.buffer, self.cursor.scroll_offset, field_width)),
            ]),
        };
        frame.render_widget(Paragraph::new(line), area);

        let cursor_x = area.x + prompt_width + self.cursor.visible_column(&self.buffer);
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded))
            }
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new(true);
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    fn rendered(input: &mut InputBox, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect::<String>()
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new(false);

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        let res = input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_cursor_editing() {
        let mut input = typed("helo");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('l'));
        assert_eq!(input.buffer, "hello");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "ello");

        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), None);
        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "ello!");
    }

    #[test]
    fn test_submit_clears() {
        let mut input = typed("hello");
        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit event, got {other:?}"),
        }
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_empty_submit_still_reported() {
        let mut input = InputBox::new(true);
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit(String::new()))
        );
    }

    #[test]
    fn test_char_limit() {
        let mut input = typed(&"x".repeat(CHAR_LIMIT));
        assert_eq!(input.handle_event(&TuiEvent::InputChar('y')), None);
        assert_eq!(input.buffer.chars().count(), CHAR_LIMIT);
    }

    #[test]
    fn test_paste_is_flattened_and_truncated() {
        let mut input = typed(&"x".repeat(CHAR_LIMIT - 3));
        input.handle_event(&TuiEvent::Paste("a\nbcdef".into()));
        assert!(input.buffer.ends_with("xa b"));
        assert_eq!(input.buffer.chars().count(), CHAR_LIMIT);
    }

    #[test]
    fn test_reset() {
        let mut input = typed("abc");
        input.reset();
        assert!(input.buffer.is_empty());
        input.handle_event(&TuiEvent::InputChar('z'));
        assert_eq!(input.buffer, "z");
    }

    #[test]
    fn test_render_placeholder_only_when_authenticated() {
        let mut can_send = InputBox::new(true);
        assert!(rendered(&mut can_send, 40).starts_with("> Send a message..."));

        let mut anonymous = InputBox::new(false);
        assert!(!rendered(&mut anonymous, 40).contains(PLACEHOLDER));
    }

    #[test]
    fn test_render_scrolls_long_lines() {
        let mut input = typed("abcdefghijklmnop");
        let text = rendered(&mut input, 10);
        assert!(text.starts_with("> "));
        assert!(text.contains("op"), "tail should stay visible: {text:?}");
        assert!(!text.contains("abc"));
    }
}
