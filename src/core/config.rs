//! # Runtime Settings
//!
//! Connection and logging knobs, resolved with the usual override order:
//! defaults → environment (`.env` is loaded first) → CLI flags.
//!
//! Credentials are not settings; they live in their own file, see
//! [`crate::core::credentials`].

use log::LevelFilter;

use crate::chat::session::DEFAULT_SERVER_ADDR;
use crate::core::command::normalize_room;

pub const SERVER_ADDR_ENV: &str = "TWITCH_IRC_ADDR";
pub const LOG_FILE_NAME: &str = "twitch-chat-reader.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_addr: String,
    /// Room to join at startup instead of the stored last room.
    pub channel: Option<String>,
    pub log_level: LevelFilter,
}

/// Values as given on the command line (`None` = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub channel: Option<String>,
    pub verbose: bool,
}

/// Collapse defaults, environment and CLI into concrete settings.
pub fn resolve(cli: CliOverrides) -> Settings {
    resolve_with_env(cli, std::env::var(SERVER_ADDR_ENV).ok())
}

fn resolve_with_env(cli: CliOverrides, env_server: Option<String>) -> Settings {
    let server_addr = cli
        .server
        .or(env_server)
        .filter(|addr| !addr.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());

    let channel = cli
        .channel
        .map(|room| normalize_room(&room))
        .filter(|room| !room.is_empty());

    Settings {
        server_addr,
        channel,
        log_level: if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_given() {
        let settings = resolve_with_env(CliOverrides::default(), None);
        assert_eq!(settings.server_addr, DEFAULT_SERVER_ADDR);
        assert_eq!(settings.channel, None);
        assert_eq!(settings.log_level, LevelFilter::Info);
    }

    #[test]
    fn env_overrides_default() {
        let settings = resolve_with_env(CliOverrides::default(), Some("127.0.0.1:6667".into()));
        assert_eq!(settings.server_addr, "127.0.0.1:6667");
    }

    #[test]
    fn cli_wins_over_env() {
        let cli = CliOverrides {
            server: Some("localhost:7000".into()),
            ..Default::default()
        };
        let settings = resolve_with_env(cli, Some("127.0.0.1:6667".into()));
        assert_eq!(settings.server_addr, "localhost:7000");
    }

    #[test]
    fn channel_is_normalized() {
        let cli = CliOverrides {
            channel: Some(" #SomeRoom ".into()),
            verbose: true,
            ..Default::default()
        };
        let settings = resolve_with_env(cli, None);
        assert_eq!(settings.channel.as_deref(), Some("someroom"));
        assert_eq!(settings.log_level, LevelFilter::Debug);
    }

    #[test]
    fn channel_loses_only_one_hash() {
        let cli = CliOverrides {
            channel: Some("##Room".into()),
            ..Default::default()
        };
        assert_eq!(resolve_with_env(cli, None).channel.as_deref(), Some("#room"));
    }

    #[test]
    fn blank_channel_is_ignored() {
        let cli = CliOverrides {
            channel: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(resolve_with_env(cli, None).channel, None);
    }
}
