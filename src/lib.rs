//! Terminal reader for Twitch chat: library exports for the binary and tests.

pub mod chat;
pub mod core;
pub mod error;
pub mod tui;

#[cfg(test)]
pub mod test_support;
