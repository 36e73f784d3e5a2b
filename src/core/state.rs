//! # Application State
//!
//! What the chat client knows, independent of how it is drawn.
//!
//! ```text
//! App
//! ├── buffer: MessageBuffer   // last 100 entries, pre-wrap, oldest first
//! ├── room: String            // joined room, empty when none
//! └── authenticated: bool     // a send session exists
//! ```
//!
//! Only `update()` in action.rs mutates an `App`, and only the UI loop calls it.

use std::collections::VecDeque;

use crate::chat::ChatEvent;
use crate::core::credentials::Credentials;

/// Maximum number of retained entries. Oldest are evicted first.
pub const BUFFER_CAPACITY: usize = 100;

/// The fixed help lines shown on startup and after every room switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Connected(String),
    Usage,
    OneRoom,
    Rules,
}

impl Banner {
    pub fn text(&self) -> String {
        match self {
            Banner::Connected(room) => format!("Currently connected to {room}'s chat."),
            Banner::Usage => "Type '.channel [channel_name]' to join a Twitch chatroom.".to_string(),
            Banner::OneRoom => "You can only join one chatroom at a time.".to_string(),
            Banner::Rules => "Be cordial and have fun.".to_string(),
        }
    }

    pub fn set(room: &str) -> Vec<Banner> {
        let mut banners = Vec::with_capacity(4);
        if !room.is_empty() {
            banners.push(Banner::Connected(room.to_string()));
        }
        banners.extend([Banner::Usage, Banner::OneRoom, Banner::Rules]);
        banners
    }
}

/// One buffered line, before wrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Banner(Banner),
    /// Ordinary chat line or notice.
    Chat(ChatEvent),
    Whisper(ChatEvent),
    /// Local feedback, never sent over the network.
    Status(String),
}

impl Entry {
    pub fn from_event(event: ChatEvent) -> Self {
        if event.is_whisper {
            Entry::Whisper(event)
        } else {
            Entry::Chat(event)
        }
    }

    /// Text as it reads on screen, without styling.
    pub fn plain_text(&self) -> String {
        match self {
            Entry::Banner(banner) => banner.text(),
            Entry::Chat(event) => {
                let mut line = String::new();
                if let Some(glyph) = event.badge.glyph() {
                    line.push_str(glyph);
                    line.push(' ');
                }
                if !event.author.is_empty() {
                    line.push_str(&event.author);
                    line.push_str(": ");
                }
                line.push_str(&event.text);
                line
            }
            Entry::Whisper(event) => format!("{}: {}", event.author, event.text),
            Entry::Status(text) => text.clone(),
        }
    }
}

/// Bounded FIFO of entries.
#[derive(Debug, Clone, Default)]
pub struct MessageBuffer {
    entries: VecDeque<Entry>,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_banners(room: &str) -> Self {
        let mut buffer = Self::new();
        buffer.reset_to_banners(room);
        buffer
    }

    /// Append, dropping from the front to stay within [`BUFFER_CAPACITY`].
    pub fn push(&mut self, entry: Entry) {
        self.entries.push_back(entry);
        while self.entries.len() > BUFFER_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Discard all history and show the banner set for `room`.
    pub fn reset_to_banners(&mut self, room: &str) {
        self.entries.clear();
        self.entries.extend(Banner::set(room).into_iter().map(Entry::Banner));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

pub struct App {
    pub buffer: MessageBuffer,
    pub room: String,
    pub authenticated: bool,
}

impl App {
    pub fn new(room: impl Into<String>, authenticated: bool) -> Self {
        let room = room.into();
        Self {
            buffer: MessageBuffer::with_banners(&room),
            room,
            authenticated,
        }
    }

    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(
            credentials.last_monitored_room.clone(),
            !credentials.is_anonymous(),
        )
    }
}
