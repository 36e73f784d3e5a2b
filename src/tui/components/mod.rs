//! # TUI Components
//!
//! UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Rendering
//!
//! - `message`: turns one buffered entry into styled, wrapped lines
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: single-line input with prompt and placeholder
//! - `MessageList`: scrollable chat view over a `ViewportState`
//!
//! Components receive external data as "props" (function parameters), not by
//! reaching into `App`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── message.rs       (entry → styled lines)
//! ├── message_list.rs  (scrollable viewport)
//! └── input_box/       (single-line input)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
