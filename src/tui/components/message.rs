//! # Message Rendering
//!
//! Turns one buffered [`Entry`] into styled, width-wrapped lines.
//!
//! Wrapping is done on the entry's plain text with `textwrap`; the styled
//! spans are then sliced along the same byte ranges. Wrapping always starts
//! from the pre-wrap entry, so re-wrapping at any width is lossless.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::{Options, WordSeparator, WordSplitter};

use crate::core::state::{Banner, Entry};

const BANNER_FG: Color = Color::Rgb(0xFA, 0xFA, 0xFA);
const WHISPER_BG: Color = Color::Rgb(0x3C, 0x3C, 0x3C);

fn banner_style(banner: &Banner) -> Style {
    let bg = match banner {
        Banner::Connected(_) => Color::Rgb(0xDF, 0x56, 0xA9),
        Banner::Usage => Color::Rgb(0xD9, 0x3F, 0xC0),
        Banner::OneRoom => Color::Rgb(0xBE, 0x38, 0xD5),
        Banner::Rules => Color::Rgb(0x9F, 0x2E, 0xEC),
    };
    Style::default().fg(BANNER_FG).bg(bg)
}

/// `#RRGGBB` to a terminal colour. Anything unparsable keeps the default.
pub fn author_color(hex: &str) -> Option<Color> {
    if !hex.starts_with('#') {
        return None;
    }
    Color::from_str(hex).ok()
}

fn author_style(hex: &str) -> Style {
    match author_color(hex) {
        Some(color) => Style::default().fg(color),
        None => Style::default(),
    }
}

/// Styled pieces whose concatenation equals `entry.plain_text()`.
fn styled_parts(entry: &Entry) -> Vec<(String, Style)> {
    match entry {
        Entry::Banner(banner) => vec![(banner.text(), banner_style(banner))],
        Entry::Chat(event) if event.author.is_empty() => {
            let mut parts = Vec::new();
            if let Some(glyph) = event.badge.glyph() {
                parts.push((format!("{glyph} "), Style::default()));
            }
            parts.push((event.text.clone(), Style::default().add_modifier(Modifier::ITALIC)));
            parts
        }
        Entry::Chat(event) => {
            let mut parts = Vec::with_capacity(3);
            if let Some(glyph) = event.badge.glyph() {
                parts.push((format!("{glyph} "), Style::default()));
            }
            parts.push((event.author.clone(), author_style(&event.author_color)));
            parts.push((format!(": {}", event.text), Style::default()));
            parts
        }
        Entry::Whisper(event) => {
            let style = author_style(&event.author_color).bg(WHISPER_BG);
            vec![(format!("{}: {}", event.author, event.text), style)]
        }
        Entry::Status(text) => vec![(
            text.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )],
    }
}

/// Cut the byte range `start..end` of the concatenated parts into spans.
fn slice_parts(parts: &[(String, Style)], start: usize, end: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for (text, style) in parts {
        let part_start = offset;
        let part_end = offset + text.len();
        offset = part_end;

        let from = start.max(part_start);
        let to = end.min(part_end);
        if from < to {
            spans.push(Span::styled(
                text[from - part_start..to - part_start].to_string(),
                *style,
            ));
        }
    }
    Line::from(spans)
}

fn wrap_options(width: u16) -> Options<'static> {
    Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
}

/// Wrap one entry to `width` columns.
///
/// The rules banner is followed by one blank line that separates the help
/// block from chat.
pub fn wrap_entry(entry: &Entry, width: u16) -> Vec<Line<'static>> {
    let plain = entry.plain_text();
    let parts = styled_parts(entry);

    let mut lines = Vec::new();
    let mut cursor = 0;
    for piece in textwrap::wrap(&plain, wrap_options(width)) {
        match plain[cursor..].find(piece.as_ref()) {
            Some(found) => {
                let start = cursor + found;
                let end = start + piece.len();
                lines.push(slice_parts(&parts, start, end));
                cursor = end;
            }
            None => lines.push(Line::raw(piece.into_owned())),
        }
    }

    if matches!(entry, Entry::Banner(Banner::Rules)) {
        lines.push(Line::default());
    }
    lines
}
