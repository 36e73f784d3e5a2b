//! Stateless text helpers for the single-line input.
//!
//! Positions are byte offsets into the buffer; columns are terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Terminal cells taken by `text`.
pub(super) fn display_width(text: &str) -> u16 {
    text.width().min(u16::MAX as usize) as u16
}

/// The part of `text` that is visible when the first `skip` columns are scrolled
/// off and at most `max` columns fit. Wide characters are never split.
pub(super) fn visible_slice(text: &str, skip: u16, max: u16) -> &str {
    let mut column: u16 = 0;
    let mut start = text.len();
    let mut end = text.len();

    for (i, c) in text.char_indices() {
        if column >= skip && start == text.len() {
            start = i;
        }
        let width = c.width().unwrap_or(0) as u16;
        if start != text.len() && column + width > skip + max {
            end = i;
            break;
        }
        column += width;
    }

    if start > end { "" } else { &text[start..end] }
}

/// Replace line breaks so pasted text stays on one line.
pub(super) fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
