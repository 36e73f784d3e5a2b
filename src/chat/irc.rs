//! Minimal IRCv3 line parser for the subset of Twitch chat the sessions consume.
//!
//! ```text
//! @badges=moderator/1;color=#FF4500 :alice!alice@alice.tmi.twitch.tv PRIVMSG #room :hi
//! └──────────── tags ─────────────┘ └──────────── prefix ───────────┘ └ cmd ┘ └ params ┘
//! ```

use std::collections::HashMap;

/// One parsed protocol line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrcMessage {
    pub tags: HashMap<String, String>,
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl IrcMessage {
    /// Parse a single line. Returns `None` for blank lines or lines without a command.
    pub fn parse(line: &str) -> Option<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']);
        let mut message = IrcMessage::default();

        if let Some(tagged) = rest.strip_prefix('@') {
            let (raw_tags, remainder) = tagged.split_once(' ')?;
            message.tags = parse_tags(raw_tags);
            rest = remainder.trim_start();
        }

        if let Some(prefixed) = rest.strip_prefix(':') {
            let (prefix, remainder) = prefixed.split_once(' ')?;
            message.prefix = Some(prefix.to_string());
            rest = remainder.trim_start();
        }

        let (command, mut params) = match rest.split_once(' ') {
            Some((command, params)) => (command, params),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }
        message.command = command.to_ascii_uppercase();

        while !params.is_empty() {
            if let Some(trailing) = params.strip_prefix(':') {
                message.params.push(trailing.to_string());
                break;
            }
            match params.split_once(' ') {
                Some((param, remainder)) => {
                    if !param.is_empty() {
                        message.params.push(param.to_string());
                    }
                    params = remainder;
                }
                None => {
                    message.params.push(params.to_string());
                    break;
                }
            }
        }

        Some(message)
    }

    /// Tag value, treating empty values as absent.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Nickname part of the prefix (`nick!user@host`).
    pub fn nick(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|prefix| prefix.split('!').next().unwrap_or(prefix))
    }

    /// The last parameter, which carries the message body for PRIVMSG/WHISPER/NOTICE.
    pub fn trailing(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }
}

fn parse_tags(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), unescape_tag_value(value)),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Undo IRCv3 tag escaping (`\s` space, `\:` semicolon, `\\` backslash, `\r`, `\n`).
fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => unescaped.push(' '),
            Some(':') => unescaped.push(';'),
            Some('r') => unescaped.push('\r'),
            Some('n') => unescaped.push('\n'),
            Some(other) => unescaped.push(other),
            None => {}
        }
    }
    unescaped
}
