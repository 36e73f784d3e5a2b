//! # Chat Network Layer
//!
//! Everything that talks to the chat network lives here.
//!
//! ```text
//! TcpStream ─▶ session (irc::parse → ChatEvent::from_irc) ─▶ aggregator ─▶ UI loop
//!                 ▲
//!  manager ───────┘  join / depart / send
//! ```
//!
//! - [`irc`]: line parser for the tagged IRC dialect the network speaks
//! - [`event`]: `ChatEvent` and badge normalization
//! - [`session`]: one connection task plus its command handle
//! - [`manager`]: the anonymous + authenticated session pair
//! - [`aggregator`]: single-slot fan-in channel to the UI loop

pub mod aggregator;
pub mod event;
pub mod irc;
pub mod manager;
pub mod session;

pub use aggregator::{EventReceiver, EventSender};
pub use event::{Badge, ChatEvent};
pub use manager::{ConnectionManager, FailureReceiver};
pub use session::{SessionCommand, SessionError, SessionHandle};
