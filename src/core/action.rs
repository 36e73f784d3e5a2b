//! # Actions
//!
//! Everything that changes the chat state becomes an `Action`.
//! A chat line arrives? That's `Action::ChatReceived(event)`.
//! User presses Enter? That's `Action::Submit(line)`.
//!
//! `update()` applies the action to the state and returns an `Effect`: the
//! network or disk work the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::chat::ChatEvent;
use crate::core::command::{self, Command};
use crate::core::state::{App, Entry};

pub const NOT_JOINED_HINT: &str = "Join a chatroom with '.channel [channel_name]' before sending.";
pub const MISSING_ROOM_HINT: &str = "Usage: .channel [channel_name]";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ChatReceived(ChatEvent),
    Submit(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Depart `previous` (may be empty), join `next`, persist `next` as last room.
    SwitchRoom { previous: String, next: String },
    /// Post `text` to `room` through the send session.
    Send { room: String, text: String },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ChatReceived(event) => {
            app.buffer.push(Entry::from_event(event));
            Effect::None
        }
        Action::Submit(line) => submit(app, &line),
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, line: &str) -> Effect {
    match command::parse(line) {
        Command::SwitchRoom(next) => {
            let previous = std::mem::replace(&mut app.room, next.clone());
            app.buffer.reset_to_banners(&next);
            Effect::SwitchRoom { previous, next }
        }
        Command::MissingRoom => {
            app.buffer.push(Entry::Status(MISSING_ROOM_HINT.to_string()));
            Effect::None
        }
        Command::Say(text) => {
            if !app.authenticated || text.trim().is_empty() {
                debug!("Dropping input: anonymous or blank");
                return Effect::None;
            }
            if app.room.is_empty() {
                app.buffer.push(Entry::Status(NOT_JOINED_HINT.to_string()));
                return Effect::None;
            }
            Effect::Send {
                room: app.room.clone(),
                text: text.to_string(),
            }
        }
    }
}
