//! The unified message shape every session publishes, and the rules that
//! turn raw protocol lines into it.

use super::irc::IrcMessage;

/// Role indicator shown in front of a chat author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    #[default]
    None,
    Broadcaster,
    Moderator,
    Vip,
    Subscriber,
}

impl Badge {
    /// Highest-priority first. A user holding several badges shows only the first match.
    const PRIORITY: [(&'static str, Badge); 4] = [
        ("broadcaster", Badge::Broadcaster),
        ("moderator", Badge::Moderator),
        ("vip", Badge::Vip),
        ("subscriber", Badge::Subscriber),
    ];

    /// Pick the single badge to display from everything a user holds.
    pub fn from_held<'a>(held: impl IntoIterator<Item = &'a str>) -> Badge {
        let held: Vec<&str> = held.into_iter().collect();
        Self::PRIORITY
            .iter()
            .find(|(name, _)| held.contains(name))
            .map(|(_, badge)| *badge)
            .unwrap_or_default()
    }

    /// Parse a Twitch `badges` tag (`moderator/1,subscriber/12`).
    pub fn from_tag(tag: &str) -> Badge {
        Self::from_held(
            tag.split(',')
                .filter_map(|badge| badge.split('/').next())
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn glyph(self) -> Option<&'static str> {
        match self {
            Badge::None => None,
            Badge::Broadcaster => Some("🔴"),
            Badge::Moderator => Some("⚔️"),
            Badge::Vip => Some("💎"),
            Badge::Subscriber => Some("➕"),
        }
    }
}

/// A normalized inbound chat event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatEvent {
    pub author: String,
    /// `#RRGGBB` as sent by the network, empty when the user never picked one.
    pub author_color: String,
    pub text: String,
    pub is_whisper: bool,
    pub badge: Badge,
    pub is_notice: bool,
}

impl ChatEvent {
    pub fn chat(author: impl Into<String>, badge: Badge, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            badge,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn whisper(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            is_whisper: true,
            ..Default::default()
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_notice: true,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.author_color = color.into();
        self
    }

    /// Normalize a protocol line. Lines that are not chat, whisper or notice yield `None`.
    pub fn from_irc(message: &IrcMessage) -> Option<Self> {
        match message.command.as_str() {
            "PRIVMSG" => {
                let text = strip_action(message.trailing()?);
                let badge = Badge::from_tag(message.tag("badges").unwrap_or_default());
                Some(Self::chat(author_of(message), badge, text).with_color(color_of(message)))
            }
            "WHISPER" => {
                let text = message.trailing()?;
                Some(Self::whisper(author_of(message), text).with_color(color_of(message)))
            }
            "NOTICE" => message.trailing().map(Self::notice),
            "USERNOTICE" => {
                // The trailing parameter is only present when the user attached a message.
                let text = match message.params.get(1) {
                    Some(text) => text.as_str(),
                    None => message.tag("system-msg")?,
                };
                Some(Self::notice(text))
            }
            _ => None,
        }
    }
}

fn author_of(message: &IrcMessage) -> String {
    message
        .tag("display-name")
        .or_else(|| message.nick())
        .unwrap_or_default()
        .to_string()
}

fn color_of(message: &IrcMessage) -> String {
    message.tag("color").unwrap_or_default().to_string()
}

/// `/me` messages arrive wrapped in CTCP ACTION markers.
fn strip_action(text: &str) -> &str {
    text.strip_prefix("\u{1}ACTION ")
        .and_then(|inner| inner.strip_suffix('\u{1}'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ChatEvent {
        ChatEvent::from_irc(&IrcMessage::parse(line).unwrap()).unwrap()
    }

    #[test]
    fn badge_priority_is_fixed() {
        assert_eq!(
            Badge::from_held(["subscriber", "vip", "moderator", "broadcaster"]),
            Badge::Broadcaster
        );
        assert_eq!(Badge::from_held(["subscriber", "vip", "moderator"]), Badge::Moderator);
        assert_eq!(Badge::from_held(["subscriber", "vip"]), Badge::Vip);
        assert_eq!(Badge::from_held(["subscriber"]), Badge::Subscriber);
        assert_eq!(Badge::from_held(["premium", "glhf-pledge"]), Badge::None);
        assert_eq!(Badge::from_held([]), Badge::None);
    }

    #[test]
    fn badge_priority_ignores_tag_order() {
        assert_eq!(Badge::from_tag("vip/1,moderator/1"), Badge::Moderator);
        assert_eq!(Badge::from_tag("subscriber/24,broadcaster/1"), Badge::Broadcaster);
        assert_eq!(Badge::from_tag(""), Badge::None);
    }

    #[test]
    fn glyphs() {
        assert_eq!(Badge::Moderator.glyph(), Some("⚔️"));
        assert_eq!(Badge::None.glyph(), None);
    }

    #[test]
    fn privmsg_becomes_chat_event() {
        let event = parse(
            "@badges=subscriber/6,moderator/1;color=#1E90FF;display-name=Alice \
             :alice!alice@alice.tmi.twitch.tv PRIVMSG #room :hi",
        );
        assert_eq!(event, ChatEvent::chat("Alice", Badge::Moderator, "hi").with_color("#1E90FF"));
    }

    #[test]
    fn privmsg_without_display_name_uses_nick() {
        let event = parse(":bob!bob@bob.tmi.twitch.tv PRIVMSG #room :yo");
        assert_eq!(event.author, "bob");
        assert_eq!(event.author_color, "");
        assert_eq!(event.badge, Badge::None);
    }

    #[test]
    fn action_markers_are_stripped() {
        let event = parse(":bob!bob@bob PRIVMSG #room :\u{1}ACTION waves\u{1}");
        assert_eq!(event.text, "waves");
    }

    #[test]
    fn whisper_skips_badges() {
        let event = parse(
            "@badges=broadcaster/1;color=#00FF7F;display-name=Carol \
             :carol!carol@carol.tmi.twitch.tv WHISPER me :psst",
        );
        assert!(event.is_whisper);
        assert_eq!(event.badge, Badge::None);
        assert_eq!(event.author, "Carol");
        assert_eq!(event.author_color, "#00FF7F");
    }

    #[test]
    fn notice_has_no_author() {
        let event = parse("@msg-id=slow_on :tmi.twitch.tv NOTICE #room :This room is now in slow mode.");
        assert!(event.is_notice);
        assert!(event.author.is_empty());
        assert_eq!(event.text, "This room is now in slow mode.");
    }

    #[test]
    fn usernotice_prefers_user_message_then_system_message() {
        let with_text = parse(r"@system-msg=Dave\ssubscribed! :tmi.twitch.tv USERNOTICE #room :great stream");
        assert_eq!(with_text.text, "great stream");
        assert!(with_text.is_notice);

        let without_text = parse(r"@system-msg=Dave\ssubscribed! :tmi.twitch.tv USERNOTICE #room");
        assert_eq!(without_text.text, "Dave subscribed!");
    }

    #[test]
    fn other_commands_are_ignored() {
        let message = IrcMessage::parse(":tmi.twitch.tv ROOMSTATE #room").unwrap();
        assert!(ChatEvent::from_irc(&message).is_none());
        let ping = IrcMessage::parse("PING :tmi.twitch.tv").unwrap();
        assert!(ChatEvent::from_irc(&ping).is_none());
    }
}
