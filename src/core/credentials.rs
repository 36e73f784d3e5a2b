//! # Credential Store
//!
//! `{Username, OAuth, LastMonitoredRoom}` persisted as TOML under the per-user
//! config directory:
//!
//! ```text
//! <config_dir>/TwitchChatTerminalReader/config.toml
//! ```
//!
//! A missing, unreadable or malformed file, or one with an empty `Username`,
//! counts as "no credentials" and triggers the first-run prompt. Only failing
//! to *write* the file is an error.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const APP_DIR_NAME: &str = "TwitchChatTerminalReader";
pub const CREDENTIALS_FILE_NAME: &str = "config.toml";
pub const TOKEN_URL: &str = "https://twitchapps.com/tmi/";
const OAUTH_PREFIX: &str = "oauth:";

const PROMPT_FG: Color = Color::Rgb { r: 0xFA, g: 0xFA, b: 0xFA };

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    #[serde(rename = "Username", default)]
    pub username: String,
    #[serde(rename = "OAuth", default)]
    pub oauth: String,
    #[serde(rename = "LastMonitoredRoom", default)]
    pub last_monitored_room: String,
}

impl Credentials {
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty()
    }
}

#[derive(Debug)]
pub enum CredentialError {
    NoConfigDir,
    Io(io::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::NoConfigDir => write!(f, "could not determine the user config directory"),
            CredentialError::Io(e) => write!(f, "credential I/O error: {e}"),
            CredentialError::Serialize(e) => write!(f, "credential serialize error: {e}"),
        }
    }
}

impl std::error::Error for CredentialError {}

impl From<io::Error> for CredentialError {
    fn from(e: io::Error) -> Self {
        CredentialError::Io(e)
    }
}

/// Returns `<config_dir>/TwitchChatTerminalReader`.
pub fn config_dir() -> Result<PathBuf, CredentialError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(CredentialError::NoConfigDir)
}

/// Always `oauth:<token>`, lowercase, whether or not the pasted value had the prefix.
pub fn normalize_oauth(raw: &str) -> String {
    let token = raw.trim().replacen(OAUTH_PREFIX, "", 1);
    format!("{OAUTH_PREFIX}{token}").to_lowercase()
}

/// Read stored credentials. Any failure is logged and treated as absent.
pub fn read(path: &Path) -> Option<Credentials> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            info!("No stored credentials at {}: {e}", path.display());
            return None;
        }
    };
    match toml::from_str::<Credentials>(&contents) {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            warn!("Ignoring malformed credentials at {}: {e}", path.display());
            None
        }
    }
}

/// Loaded credentials bound to the file they persist to.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    credentials: Credentials,
}

impl CredentialStore {
    pub fn new(path: PathBuf, credentials: Credentials) -> Self {
        Self { path, credentials }
    }

    /// Load credentials from `dir`, prompting on `input`/`output` when none are usable.
    ///
    /// An empty username at the prompt means anonymous mode: nothing is written,
    /// and a previously stored last room is kept.
    pub fn open<R: BufRead, W: Write>(
        dir: &Path,
        input: &mut R,
        output: &mut W,
    ) -> Result<Self, CredentialError> {
        let path = dir.join(CREDENTIALS_FILE_NAME);
        let stored = read(&path);
        if let Some(credentials) = stored.as_ref().filter(|c| !c.is_anonymous()) {
            info!("Loaded credentials for {}", credentials.username);
            return Ok(Self::new(path, credentials.clone()));
        }

        let mut store = Self::new(path, stored.unwrap_or_default());
        let (username, oauth) = prompt(input, output)?;
        if username.is_empty() {
            info!("Continuing anonymously");
            return Ok(store);
        }
        store.credentials.username = username;
        store.credentials.oauth = oauth;
        store.save()?;
        Ok(store)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record the joined room and persist immediately.
    pub fn set_last_room(&mut self, room: &str) -> Result<(), CredentialError> {
        self.credentials.last_monitored_room = room.to_string();
        self.save()
    }

    pub fn save(&self) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string(&self.credentials).map_err(CredentialError::Serialize)?;
        fs::write(&self.path, data)?;
        debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }
}

/// Interactive first-run prompt. Returns `(username, oauth)`; an empty username
/// skips the token prompt.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<(String, String)> {
    clear(output)?;
    banner(output, "What account will you be using to type with?", (0xbe, 0x38, 0xd5))?;
    banner(output, "If you want to remain anonymous, enter an empty value.", (0x9f, 0x2e, 0xec))?;
    writeln!(output)?;
    let username = read_answer(input, output)?.to_lowercase();
    if username.is_empty() {
        return Ok((username, String::new()));
    }

    clear(output)?;
    banner(
        output,
        "Obtaining your OAuth is necessary to connect to Twitch chatrooms as yourself.",
        (0xf2, 0x5e, 0x92),
    )?;
    writeln!(output)?;
    banner(output, "Instructions:", (0xe0, 0x55, 0xa8))?;
    banner(output, &format!("1. {TOKEN_URL}"), (0xc8, 0x50, 0xba))?;
    banner(output, "2. Click \"Connect\"", (0xbe, 0x38, 0xd5))?;
    banner(output, "3. Authenticate", (0x9f, 0x2e, 0xec))?;
    banner(output, "4. Paste the entire line starting with 'oauth' here:", (0x7e, 0x56, 0xf4))?;
    writeln!(output)?;
    let oauth = normalize_oauth(&read_answer(input, output)?);

    Ok((username, oauth))
}

fn clear<W: Write>(output: &mut W) -> io::Result<()> {
    execute!(output, Clear(ClearType::All), MoveTo(0, 0))
}

fn banner<W: Write>(output: &mut W, text: &str, (r, g, b): (u8, u8, u8)) -> io::Result<()> {
    writeln!(output, "{}", text.with(PROMPT_FG).on(Color::Rgb { r, g, b }))
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(output, "{}", "> ".with(PROMPT_FG))?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
