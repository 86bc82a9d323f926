//! Piece-supply capability and its built-in implementations
//!
//! The supply is the adversary of the game: it decides which shape spawns next.
//! It sees a snapshot of the board and may block (a remote process, a human)
//! before answering.

use std::collections::VecDeque;

use crate::board::Board;
use crate::error::{GameError, GameResult};
use crate::rng::{ShapeBag, SimpleRng};
use crate::types::Shape;

/// Chooses the shape of every upcoming piece.
///
/// Returning [`GameError::SupplyLimitReached`] or [`GameError::InputClosed`]
/// ends the game cleanly.
pub trait PieceSupply {
    fn choose_block(&mut self, board: &Board) -> GameResult<Shape>;
}

impl<T: PieceSupply + ?Sized> PieceSupply for &mut T {
    fn choose_block(&mut self, board: &Board) -> GameResult<Shape> {
        (**self).choose_block(board)
    }
}

impl<T: PieceSupply + ?Sized> PieceSupply for Box<T> {
    fn choose_block(&mut self, board: &Board) -> GameResult<Shape> {
        (**self).choose_block(board)
    }
}

/// Uniform random shapes from a seeded RNG, optionally capped
#[derive(Debug, Clone)]
pub struct RandomSupply {
    rng: SimpleRng,
    limit: Option<u32>,
    produced: u32,
}

impl RandomSupply {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            limit: None,
            produced: 0,
        }
    }

    /// Stop after `limit` pieces
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn produced(&self) -> u32 {
        self.produced
    }
}

impl PieceSupply for RandomSupply {
    fn choose_block(&mut self, _board: &Board) -> GameResult<Shape> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return Err(GameError::SupplyLimitReached);
        }
        self.produced += 1;
        Ok(self.rng.choose(&Shape::ALL).unwrap_or(Shape::I))
    }
}

/// Shapes from a shuffled 7-bag, optionally capped
#[derive(Debug, Clone)]
pub struct BagSupply {
    bag: ShapeBag,
    limit: Option<u32>,
    produced: u32,
}

impl BagSupply {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ShapeBag::new(seed),
            limit: None,
            produced: 0,
        }
    }

    /// Stop after `limit` pieces
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The shape the next call will return
    pub fn peek(&self) -> Shape {
        self.bag.peek()
    }
}

impl PieceSupply for BagSupply {
    fn choose_block(&mut self, _board: &Board) -> GameResult<Shape> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return Err(GameError::SupplyLimitReached);
        }
        self.produced += 1;
        Ok(self.bag.draw())
    }
}

/// A fixed list of shapes, exhausted after the last one
#[derive(Debug, Clone, Default)]
pub struct ScriptedSupply {
    shapes: VecDeque<Shape>,
}

impl ScriptedSupply {
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Self {
        Self {
            shapes: shapes.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.shapes.len()
    }
}

impl PieceSupply for ScriptedSupply {
    fn choose_block(&mut self, _board: &Board) -> GameResult<Shape> {
        self.shapes.pop_front().ok_or(GameError::SupplyLimitReached)
    }
}
