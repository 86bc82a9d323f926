//! Keyboard input
//!
//! Maps `crossterm` key events to [`Action`]s and offers a [`MoveChoice`] that
//! waits a bounded time for a key. When no key arrives in time the chooser
//! answers nothing, which the game turns into a plain gravity step.

pub mod map;

use std::time::Duration;

use blockfall_core::types::Action;
use blockfall_core::{Board, GameError, GameResult, MoveChoice};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;

pub use map::{handle_key_event, should_quit};

/// Gravity interval used when none is configured
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Reads the player's moves from the terminal
#[derive(Debug, Clone)]
pub struct KeyboardChooser {
    tick: Duration,
}

impl KeyboardChooser {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for KeyboardChooser {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl MoveChoice for KeyboardChooser {
    fn choose_action(&mut self, _board: &Board) -> GameResult<Vec<Action>> {
        if !event::poll(self.tick)? {
            return Ok(Vec::new());
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Err(GameError::InputClosed);
                }
                Ok(handle_key_event(key).into_iter().collect())
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// Puts the terminal in raw mode until dropped
#[derive(Debug)]
pub struct RawMode(());

impl RawMode {
    pub fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // Always try to restore terminal state.
        let _ = terminal::disable_raw_mode();
    }
}
