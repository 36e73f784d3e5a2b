//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::Path;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::chat::{
    ConnectionManager, EventReceiver, FailureReceiver, SessionCommand, SessionHandle, aggregator,
};
use crate::core::credentials::{CREDENTIALS_FILE_NAME, CredentialStore, Credentials};

/// A manager wired to detached handles: commands land in the receivers
/// instead of on a socket.
pub struct WiredManager {
    pub manager: ConnectionManager,
    pub events: EventReceiver,
    pub failures: FailureReceiver,
    pub anonymous: UnboundedReceiver<SessionCommand>,
    pub authenticated: Option<UnboundedReceiver<SessionCommand>>,
}

pub fn wired_manager(authenticated: bool) -> WiredManager {
    let (events_tx, events) = aggregator::channel();
    let (anon_handle, anonymous) = SessionHandle::channel();
    let (auth_handle, auth_rx) = if authenticated {
        let (handle, rx) = SessionHandle::channel();
        (Some(handle), Some(rx))
    } else {
        (None, None)
    };
    let (manager, failures) =
        ConnectionManager::with_handles(events_tx, Some(anon_handle), auth_handle);
    WiredManager {
        manager,
        events,
        failures,
        anonymous,
        authenticated: auth_rx,
    }
}

/// Everything queued on a detached handle so far.
pub fn drain(rx: &mut UnboundedReceiver<SessionCommand>) -> Vec<SessionCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = rx.try_recv() {
        commands.push(command);
    }
    commands
}

pub fn credentials(username: &str, last_room: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        oauth: if username.is_empty() {
            String::new()
        } else {
            "oauth:testtoken".to_string()
        },
        last_monitored_room: last_room.to_string(),
    }
}

/// A store whose file lives in `dir`.
pub fn store_in(dir: &Path, credentials: Credentials) -> CredentialStore {
    CredentialStore::new(dir.join(CREDENTIALS_FILE_NAME), credentials)
}
