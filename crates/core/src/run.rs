//! Turn protocol
//!
//! [`GameRun`] interleaves the piece supply and the move chooser into a lazy,
//! finite sequence of events. It is pulled by its consumer one event at a time
//! and never ticks on its own; every event corresponds to exactly one atomic
//! board mutation (or one shape reveal), so the consumer can read a consistent
//! post-mutation snapshot between events.
//!
//! ```text
//! supply ──► ShapeRevealed (spawn)
//! loop:
//!   supply ──► ShapeRevealed (queued as next)
//!   not alive ──► GameOver(Collision)
//!   chooser ──► ActionApplied* | Skipped   until the piece lands
//! ```
//!
//! The board may also be driven from outside the run, by a gravity timer
//! holding a clone of the [`SharedBoard`]. Each step is applied only while the
//! board's landing count still matches the one seen when the turn began; once
//! it moves, the rest of the turn is dropped and the run goes back to
//! revealing.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use tracing::{debug, info};

use crate::choice::MoveChoice;
use crate::error::{GameError, GameResult};
use crate::shared::SharedBoard;
use crate::supply::PieceSupply;
use crate::types::{Action, Shape};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// A freshly spawned piece overlapped occupied cells
    Collision,
    /// The supply reached its limit (or announced `END`)
    SupplyExhausted,
    /// The input driving a capability was closed
    InputClosed,
}

/// One observable step of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The supply produced a shape
    ShapeRevealed(Shape),
    /// An action was applied, followed by its gravity tick
    ActionApplied { action: Action, landed: bool },
    /// The chooser answered nothing; only gravity was applied
    Skipped { landed: bool },
    /// Terminal event
    GameOver(GameOverReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Reveal,
    CheckAlive,
    Turn,
    Finished,
}

/// The running game, as an iterator of events
pub struct GameRun<S, C> {
    board: SharedBoard,
    supply: S,
    chooser: C,
    phase: Phase,
    pending: VecDeque<Action>,
    /// Board landing count when the current turn began
    turn: u64,
}

impl<S, C> GameRun<S, C>
where
    S: PieceSupply,
    C: MoveChoice,
{
    pub fn new(board: SharedBoard, supply: S, chooser: C) -> Self {
        Self {
            board,
            supply,
            chooser,
            phase: Phase::Start,
            pending: VecDeque::new(),
            turn: 0,
        }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Recover the capabilities once the game is over
    pub fn into_parts(self) -> (S, C) {
        (self.supply, self.chooser)
    }

    fn finish(&mut self, reason: GameOverReason) -> Event {
        self.phase = Phase::Finished;
        info!(?reason, score = self.board.score(), "game over");
        Event::GameOver(reason)
    }

    fn fail(&mut self, err: GameError) -> Option<GameResult<Event>> {
        match err {
            GameError::SupplyLimitReached => Some(Ok(self.finish(GameOverReason::SupplyExhausted))),
            GameError::InputClosed => Some(Ok(self.finish(GameOverReason::InputClosed))),
            err => {
                self.phase = Phase::Finished;
                Some(Err(err))
            }
        }
    }

    fn reveal(&mut self) -> GameResult<Shape> {
        let snapshot = self.board.snapshot();
        self.supply.choose_block(&snapshot)
    }

    /// Queue `shape` as next, promoting it at once if nothing is falling.
    /// Returns true when the shape was promoted and `next` is still empty.
    fn queue(&self, shape: Shape) -> bool {
        self.board.write(|board| {
            board.set_next(shape);
            if board.falling().is_some() {
                return false;
            }
            board.place_next_block();
            true
        })
    }

    /// The piece of this turn landed through another handle
    fn landed_elsewhere(&mut self) {
        debug!("piece landed outside the run");
        self.pending.clear();
        self.phase = Phase::Reveal;
    }

    fn play_turn(&mut self) -> GameResult<Option<Event>> {
        if self.pending.is_empty() {
            let snapshot = self.board.snapshot();
            if snapshot.landings() != self.turn {
                self.landed_elsewhere();
                return Ok(None);
            }
            let actions = self.chooser.choose_action(&snapshot)?;
            if actions.is_empty() {
                return Ok(self.step(None)?.map(|landed| Event::Skipped { landed }));
            }
            self.pending.extend(actions);
        }

        let Some(action) = self.pending.pop_front() else {
            return Err(GameError::NoFallingPiece);
        };
        Ok(self
            .step(Some(action))?
            .map(|landed| Event::ActionApplied { action, landed }))
    }

    /// Apply `action`, or gravity alone, unless the turn's piece is already
    /// gone. Returns whether it landed, or `None` when it was gone.
    fn step(&mut self, action: Option<Action>) -> GameResult<Option<bool>> {
        let turn = self.turn;
        let landed = self.board.write(|board| -> GameResult<Option<bool>> {
            if board.landings() != turn {
                return Ok(None);
            }
            let landed = match action {
                Some(action) => board.apply(action)?,
                None => board.skip()?,
            };
            Ok(Some(landed))
        })?;

        match landed {
            None => {
                self.landed_elsewhere();
                Ok(None)
            }
            Some(landed) => {
                if landed {
                    // Whatever the chooser planned beyond the landing is stale.
                    self.pending.clear();
                    self.phase = Phase::Reveal;
                }
                Ok(Some(landed))
            }
        }
    }
}

impl<S, C> Iterator for GameRun<S, C>
where
    S: PieceSupply,
    C: MoveChoice,
{
    type Item = GameResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Finished => None,
            Phase::Start => match self.reveal() {
                Ok(shape) => {
                    self.board.spawn(shape);
                    self.phase = Phase::Reveal;
                    Some(Ok(Event::ShapeRevealed(shape)))
                }
                Err(err) => self.fail(err),
            },
            Phase::Reveal => match self.reveal() {
                Ok(shape) => {
                    // Promoted straight to falling when several pieces landed
                    // outside the run; reveal again to refill `next`.
                    if !self.queue(shape) {
                        self.phase = Phase::CheckAlive;
                    }
                    Some(Ok(Event::ShapeRevealed(shape)))
                }
                Err(err) => self.fail(err),
            },
            Phase::CheckAlive => {
                let (alive, landings) = self.board.read(|b| (b.alive(), b.landings()));
                if !alive {
                    return Some(Ok(self.finish(GameOverReason::Collision)));
                }
                self.turn = landings;
                self.phase = Phase::Turn;
                self.next()
            }
            Phase::Turn => match self.play_turn() {
                Ok(Some(event)) => {
                    debug!(?event, "turn step");
                    Some(Ok(event))
                }
                Ok(None) => self.next(),
                Err(err) => self.fail(err),
            },
        }
    }
}

impl<S, C> FusedIterator for GameRun<S, C>
where
    S: PieceSupply,
    C: MoveChoice,
{
}
