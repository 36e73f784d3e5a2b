//! # Chat Session
//!
//! One long-lived connection to the chat network. Each session runs in its own
//! task: it registers, then interleaves reading protocol lines with writing the
//! commands queued on its [`SessionHandle`]. Commands queued before the
//! connection is up are sent right after registration.

use std::fmt;
use std::io;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use super::aggregator::EventSender;
use super::event::ChatEvent;
use super::irc::IrcMessage;

pub const DEFAULT_SERVER_ADDR: &str = "irc.chat.twitch.tv:6667";

/// Capabilities needed for badges, colours, whispers and notices.
const CAPABILITIES: &str = "CAP REQ :twitch.tv/tags twitch.tv/commands";

/// Notice texts the server sends instead of a welcome when PASS is rejected.
const LOGIN_FAILURES: [&str; 2] = ["Login authentication failed", "Improperly formatted auth"];

#[derive(Debug)]
pub enum SessionError {
    /// TCP connect to the server failed.
    Connect { addr: String, source: io::Error },
    /// Read or write on an established connection failed.
    Io(io::Error),
    /// The server rejected the credentials.
    Login(String),
    /// The peer hung up, or the UI loop stopped consuming events.
    Closed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Connect { addr, source } => {
                write!(f, "could not connect to {addr}: {source}")
            }
            SessionError::Io(e) => write!(f, "chat connection error: {e}"),
            SessionError::Login(msg) => write!(f, "chat login rejected: {msg}"),
            SessionError::Closed => write!(f, "chat connection closed"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

/// Who the session logs in as.
#[derive(Clone, PartialEq, Eq)]
pub enum Login {
    /// Read-only guest (`justinfan<n>`); can join and leave but never send.
    Anonymous,
    Authenticated { username: String, oauth: String },
}

impl Login {
    pub fn nick(&self) -> String {
        match self {
            Login::Anonymous => format!("justinfan{}", 10_000 + std::process::id() % 90_000),
            Login::Authenticated { username, .. } => username.clone(),
        }
    }
}

// Hand-written so the token never reaches the log file.
impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Login::Anonymous => write!(f, "Anonymous"),
            Login::Authenticated { username, .. } => write!(f, "Authenticated({username})"),
        }
    }
}

/// Requests a session writes to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Join(String),
    Part(String),
    Say { room: String, text: String },
}

impl SessionCommand {
    fn to_line(&self) -> String {
        match self {
            SessionCommand::Join(room) => format!("JOIN #{}", room.to_lowercase()),
            SessionCommand::Part(room) => format!("PART #{}", room.to_lowercase()),
            SessionCommand::Say { room, text } => {
                format!("PRIVMSG #{} :{}", room.to_lowercase(), text.replace(['\r', '\n'], " "))
            }
        }
    }
}

/// Cheap, cloneable handle for queueing commands on a running session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    cmd_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// A handle plus the receiving end of its command queue, not yet bound to a connection.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        (Self { cmd_tx }, cmd_rx)
    }

    pub fn submit(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.cmd_tx.send(command).map_err(|_| SessionError::Closed)
    }
}

/// Spawn a session task. Whatever ends the task is reported on `failures`.
pub fn spawn(
    addr: String,
    login: Login,
    events: EventSender,
    failures: mpsc::UnboundedSender<SessionError>,
) -> SessionHandle {
    let (handle, commands) = SessionHandle::channel();
    tokio::spawn(async move {
        let label = format!("{login:?}");
        let error = match run(&addr, login, commands, events).await {
            Ok(()) => SessionError::Closed,
            Err(e) => e,
        };
        warn!("{label} session ended: {error}");
        if failures.send(error).is_err() {
            debug!("{label} session failure dropped: UI already gone");
        }
    });
    handle
}

/// Connect, register and pump the connection until it fails.
async fn run(
    addr: &str,
    login: Login,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    events: EventSender,
) -> Result<(), SessionError> {
    info!("Connecting {login:?} session to {addr}");
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| SessionError::Connect {
            addr: addr.to_string(),
            source,
        })?;
    let (reader, mut writer) = stream.into_split();
    // Split on raw bytes: a stray non-UTF-8 byte in chat must not end the session
    let mut lines = BufReader::new(reader).split(b'\n');

    register(&mut writer, &login).await?;
    info!("{login:?} session registered as {}", login.nick());

    loop {
        tokio::select! {
            line = lines.next_segment() => {
                let Some(raw) = line? else {
                    return Err(SessionError::Closed);
                };
                let line = decode_line(&raw);
                debug!("< {line}");
                let Some(message) = IrcMessage::parse(&line) else {
                    continue;
                };
                if let Some(reply) = handle_line(&message)? {
                    write_line(&mut writer, &reply).await?;
                } else if let Some(event) = ChatEvent::from_irc(&message) {
                    events.push(event).await?;
                }
            }
            Some(command) = commands.recv() => {
                info!("{login:?} session: {command:?}");
                write_line(&mut writer, &command.to_line()).await?;
            }
        }
    }
}

/// Lossy UTF-8 decode of one protocol line, without its line terminator.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Protocol housekeeping: keepalive replies and fatal server notices.
fn handle_line(message: &IrcMessage) -> Result<Option<String>, SessionError> {
    match message.command.as_str() {
        "PING" => Ok(Some(format!(
            "PONG :{}",
            message.trailing().unwrap_or("tmi.twitch.tv")
        ))),
        "NOTICE" if message.params.first().is_some_and(|target| target == "*") => {
            let text = message.trailing().unwrap_or_default();
            if LOGIN_FAILURES.iter().any(|failure| text.contains(failure)) {
                return Err(SessionError::Login(text.to_string()));
            }
            Ok(None)
        }
        "RECONNECT" => Err(SessionError::Closed),
        _ => Ok(None),
    }
}

async fn register<W: AsyncWrite + Unpin>(writer: &mut W, login: &Login) -> Result<(), SessionError> {
    write_line(writer, CAPABILITIES).await?;
    if let Login::Authenticated { oauth, .. } = login {
        writer.write_all(format!("PASS {oauth}\r\n").as_bytes()).await?;
    }
    write_line(writer, &format!("NICK {}", login.nick())).await
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<(), SessionError> {
    debug!("> {line}");
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\r\n").await?;
    writer.flush().await?;
    Ok(())
}
