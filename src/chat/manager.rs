//! # Connection Manager
//!
//! Owns the two sessions: an anonymous one that reads the joined room, and an
//! authenticated one that only sends. Both publish into the same
//! [`EventSender`]; anything that ends a session arrives on the
//! [`FailureReceiver`] handed out by [`ConnectionManager::new`].
//!
//! All request methods are fire-and-forget. A request on a dead session is
//! dropped with a warning; the failure itself is already on its way to the UI.

use log::{info, warn};
use tokio::sync::mpsc;

use super::aggregator::EventSender;
use super::session::{self, Login, SessionCommand, SessionError, SessionHandle};
use crate::core::credentials::Credentials;

pub type FailureReceiver = mpsc::UnboundedReceiver<SessionError>;

pub struct ConnectionManager {
    server_addr: String,
    events: EventSender,
    failures: mpsc::UnboundedSender<SessionError>,
    anonymous: Option<SessionHandle>,
    authenticated: Option<SessionHandle>,
}

impl ConnectionManager {
    pub fn new(server_addr: impl Into<String>, events: EventSender) -> (Self, FailureReceiver) {
        let (failures, failure_rx) = mpsc::unbounded_channel();
        let manager = Self {
            server_addr: server_addr.into(),
            events,
            failures,
            anonymous: None,
            authenticated: None,
        };
        (manager, failure_rx)
    }

    /// Wire the manager to pre-built handles instead of live connections.
    pub fn with_handles(
        events: EventSender,
        anonymous: Option<SessionHandle>,
        authenticated: Option<SessionHandle>,
    ) -> (Self, FailureReceiver) {
        let (mut manager, failure_rx) = Self::new(session::DEFAULT_SERVER_ADDR, events);
        manager.anonymous = anonymous;
        manager.authenticated = authenticated;
        (manager, failure_rx)
    }

    /// Start the read session and join `last_room` as soon as it registers.
    pub fn connect_anonymous(&mut self, last_room: &str) {
        let handle = session::spawn(
            self.server_addr.clone(),
            Login::Anonymous,
            self.events.clone(),
            self.failures.clone(),
        );
        self.anonymous = Some(handle);
        if !last_room.is_empty() {
            self.join(last_room);
        }
    }

    /// Start the send session. Does nothing for anonymous credentials.
    pub fn connect_authenticated(&mut self, credentials: &Credentials) {
        if credentials.is_anonymous() {
            info!("No username configured; staying read-only");
            return;
        }
        let login = Login::Authenticated {
            username: credentials.username.clone(),
            oauth: credentials.oauth.clone(),
        };
        let handle = session::spawn(
            self.server_addr.clone(),
            login,
            self.events.clone(),
            self.failures.clone(),
        );
        self.authenticated = Some(handle);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.is_some()
    }

    pub fn join(&self, room: &str) {
        if room.is_empty() {
            return;
        }
        if let Some(handle) = &self.anonymous {
            submit(handle, SessionCommand::Join(room.to_string()));
        }
    }

    pub fn depart(&self, room: &str) {
        if room.is_empty() {
            return;
        }
        if let Some(handle) = &self.anonymous {
            submit(handle, SessionCommand::Part(room.to_string()));
        }
    }

    /// Post to `room` through the send session. No-op while anonymous or unjoined.
    pub fn send(&self, room: &str, text: &str) {
        if room.is_empty() {
            return;
        }
        if let Some(handle) = &self.authenticated {
            submit(
                handle,
                SessionCommand::Say {
                    room: room.to_string(),
                    text: text.to_string(),
                },
            );
        }
    }

    /// Leave `previous` (if any) before joining `next`, keeping at most one room joined.
    pub fn switch_room(&self, previous: &str, next: &str) {
        self.depart(previous);
        self.join(next);
    }
}

fn submit(handle: &SessionHandle, command: SessionCommand) {
    if let Err(e) = handle.submit(command) {
        warn!("Dropping request: {e}");
    }
}
