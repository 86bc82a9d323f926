//! Shared board handle
//!
//! A [`SharedBoard`] lets one thread drive the game while others read it (a
//! renderer) or nudge it (a gravity timer). Every mutating operation and the
//! liveness check hold the lock for their whole duration; readers take a
//! consistent clone under the same lock.
//!
//! A timer may land the falling piece between two steps of a [`GameRun`]. The
//! run notices through [`Board::landings`], drops the rest of its turn and
//! reveals a fresh `next` piece.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::Board;
use crate::choice::MoveChoice;
use crate::error::GameResult;
use crate::run::GameRun;
use crate::supply::PieceSupply;
use crate::types::{Action, Direction, Rotation, Shape};

/// Cheaply clonable, lock-guarded handle to one board
#[derive(Debug, Clone, Default)]
pub struct SharedBoard {
    inner: Arc<Mutex<Board>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    /// Deep copy of the board taken under the lock
    pub fn snapshot(&self) -> Board {
        self.inner.lock().clone()
    }

    /// Read the board under the lock without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Mutate the board under the lock
    pub fn write<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn alive(&self) -> bool {
        self.inner.lock().alive()
    }

    pub fn score(&self) -> u32 {
        self.inner.lock().score()
    }

    pub fn move_piece(&self, direction: Direction) -> GameResult<bool> {
        self.inner.lock().move_piece(direction)
    }

    pub fn rotate(&self, rotation: Rotation) -> GameResult<bool> {
        self.inner.lock().rotate(rotation)
    }

    pub fn skip(&self) -> GameResult<bool> {
        self.inner.lock().skip()
    }

    pub fn apply(&self, action: Action) -> GameResult<bool> {
        self.inner.lock().apply(action)
    }

    pub fn set_next(&self, shape: Shape) {
        self.inner.lock().set_next(shape);
    }

    /// Queue `shape` and promote it to falling in one step
    pub fn spawn(&self, shape: Shape) {
        let mut board = self.inner.lock();
        board.set_next(shape);
        board.place_next_block();
    }

    /// Start the turn protocol on this board
    pub fn run<S, C>(&self, supply: S, chooser: C) -> GameRun<S, C>
    where
        S: PieceSupply,
        C: MoveChoice,
    {
        GameRun::new(self.clone(), supply, chooser)
    }
}
