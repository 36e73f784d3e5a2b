//! # Core Application Logic
//!
//! The chat client's business logic. It knows nothing about the terminal
//! and nothing about sockets.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (buffer, room) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌──────────────┐                       ┌──────────────┐
//!     │ TUI adapter  │                       │ chat::manager│
//!     │ (ratatui)    │                       │ + credentials│
//!     └──────────────┘                       └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `App`, the bounded `MessageBuffer` and its entries
//! - [`action`]: the `Action` enum and `update()`
//! - [`command`]: `.channel <room>` vs plain chat
//! - [`credentials`]: the persisted login record and first-run prompt
//! - [`config`]: runtime settings resolution

pub mod action;
pub mod command;
pub mod config;
pub mod credentials;
pub mod state;
