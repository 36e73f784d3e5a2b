//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the UI, and runs
//! the single UI loop that every other task reports to.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One `tokio::select!` turn handles exactly one of:
//!
//! - a chat event from the aggregator
//! - a terminal input event
//! - the 250 ms resize tick
//! - a session failure, which ends the loop with an error
//!
//! and is followed by a full redraw. The loop is the only place that mutates
//! the buffer, the viewport and the input, so nothing here is locked.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use futures::{Stream, StreamExt};
use log::{debug, error, info, warn};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::time::MissedTickBehavior;

use crate::chat::{ConnectionManager, EventReceiver, FailureReceiver, SessionError};
use crate::core::action::{Action, Effect, update};
use crate::core::credentials::CredentialStore;
use crate::core::state::App;
use crate::error::AppError;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::TuiEvent;

/// Rows below the viewport: spacer, input line and breathing room.
pub const RESERVED_ROWS: u16 = 4;
pub const RESIZE_TICK: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Last measured terminal size, `None` until the first tick.
    dimensions: Option<(u16, u16)>,
}

impl TuiState {
    pub fn new(can_send: bool) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(can_send),
            dimensions: None,
        }
    }

    /// Apply a terminal measurement. Returns `true` when the layout was rebuilt.
    ///
    /// The first measurement only builds the viewport; later size changes also
    /// clear the input line.
    pub fn on_resize_tick(&mut self, width: u16, height: u16, app: &App) -> bool {
        let previous = self.dimensions.replace((width, height));
        if previous == Some((width, height)) {
            return false;
        }
        debug!("Viewport rebuilt for {width}x{height}");
        self.message_list
            .resize(width, height.saturating_sub(RESERVED_ROWS));
        self.refresh_messages(app);
        if previous.is_some() {
            self.input_box.reset();
        }
        true
    }

    /// Re-wrap the buffer and pin the viewport to the newest line.
    pub fn refresh_messages(&mut self, app: &App) {
        self.message_list.rewrap(&app.buffer);
        self.message_list.scroll_to_bottom();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture stays off so chat text can be selected and copied.
        // Terminals without the kitty protocol ignore the enhancement flags
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape,
            Show
        );
    }
}

/// Run the UI until the user quits or a session fails.
///
/// The terminal is restored before returning, on every path.
pub async fn run(
    app: App,
    store: CredentialStore,
    manager: ConnectionManager,
    events: EventReceiver,
    failures: FailureReceiver,
) -> Result<(), AppError> {
    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => {
            let input = EventStream::new();
            event_loop(&mut terminal, input, app, store, manager, events, failures).await
        }
        Err(e) => Err(AppError::Terminal(e)),
    };
    ratatui::restore();
    result
}

/// The loop proper, over any backend and any source of terminal events.
async fn event_loop<B, S>(
    terminal: &mut Terminal<B>,
    mut input: S,
    mut app: App,
    mut store: CredentialStore,
    manager: ConnectionManager,
    mut events: EventReceiver,
    mut failures: FailureReceiver,
) -> Result<(), AppError>
where
    B: Backend,
    AppError: From<B::Error>,
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    let mut tui = TuiState::new(app.authenticated);
    let mut resize_tick = tokio::time::interval(RESIZE_TICK);
    resize_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = resize_tick.tick() => {
                let size = terminal.size()?;
                tui.on_resize_tick(size.width, size.height, &app);
            }
            Some(failure) = failures.recv() => {
                error!("Session failed: {failure}");
                return Err(failure.into());
            }
            event = events.next() => {
                let Some(event) = event else {
                    return Err(SessionError::Closed.into());
                };
                update(&mut app, Action::ChatReceived(event));
                tui.refresh_messages(&app);
            }
            raw = input.next() => {
                match raw {
                    Some(Ok(raw)) => {
                        let Some(event) = event::translate(raw) else {
                            continue;
                        };
                        if handle_tui_event(&mut tui, &mut app, &mut store, &manager, &event)? {
                            info!("Quit requested");
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => return Err(AppError::Terminal(e)),
                    None => {
                        warn!("Terminal input stream ended");
                        return Ok(());
                    }
                }
            }
        }

        terminal.draw(|f| ui::draw_ui(f, &mut tui))?;
    }
}

/// Route one input event. Returns `true` when the loop should stop.
fn handle_tui_event(
    tui: &mut TuiState,
    app: &mut App,
    store: &mut CredentialStore,
    manager: &ConnectionManager,
    event: &TuiEvent,
) -> Result<bool, AppError> {
    match event {
        TuiEvent::Quit => return Ok(update(app, Action::Quit) == Effect::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
        }
        TuiEvent::CursorEnd => {
            tui.input_box.handle_event(event);
            tui.message_list.handle_event(event);
        }
        _ => {
            if let Some(InputEvent::Submit(line)) = tui.input_box.handle_event(event) {
                let effect = update(app, Action::Submit(line));
                apply_effect(effect, store, manager)?;
                tui.refresh_messages(app);
            }
        }
    }
    Ok(false)
}

/// Carry out the network and disk work `update()` asked for.
fn apply_effect(
    effect: Effect,
    store: &mut CredentialStore,
    manager: &ConnectionManager,
) -> Result<(), AppError> {
    match effect {
        Effect::SwitchRoom { previous, next } => {
            info!("Switching room: {previous:?} -> {next:?}");
            manager.switch_room(&previous, &next);
            store.set_last_room(&next)?;
        }
        Effect::Send { room, text } => manager.send(&room, &text),
        Effect::None | Effect::Quit => {}
    }
    Ok(())
}
