//! Input line interpretation: room switch vs. plain chat.

/// Exact, case-sensitive prefix of the room-switch command.
pub const CHANNEL_PREFIX: &str = ".channel ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `.channel <name>`, name trimmed and lowercased (rooms are case-insensitive).
    SwitchRoom(String),
    /// `.channel ` with nothing after it.
    MissingRoom,
    /// Anything else, sent verbatim.
    Say(&'a str),
}

pub fn parse(line: &str) -> Command<'_> {
    match line.strip_prefix(CHANNEL_PREFIX) {
        Some(name) => {
            let name = normalize_room(name);
            if name.is_empty() {
                Command::MissingRoom
            } else {
                Command::SwitchRoom(name)
            }
        }
        None => Command::Say(line),
    }
}

/// Trimmed, lowercased, with at most one leading `#` removed.
pub fn normalize_room(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix('#').unwrap_or(name).to_lowercase()
}
