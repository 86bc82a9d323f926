//! Board module - occupied grid, falling piece, queued piece and score
//!
//! The board owns the whole game state of one session. Every player action
//! goes through [`Board::move_piece`], [`Board::rotate`] or [`Board::skip`],
//! which apply the action, then one implicit gravity tick, then merge the piece
//! if either step reported a landing.
//!
//! Rows are indexed with `height - 1` at the bottom. Cleaning proceeds upwards
//! from the floor, so removing a row never disturbs the rows already scanned.

use tracing::debug;

use crate::error::{GameError, GameResult};
use crate::grid::Grid;
use crate::piece::{Motion, Piece};
use crate::types::{Action, Cell, Direction, Rotation, Shape, LINE_SCORES};

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: Grid,
    score: u32,
    /// Total rows removed since the board was created
    lines: u32,
    /// Pieces merged into the grid since the board was created
    landings: u64,
    falling: Option<Piece>,
    next: Option<Piece>,
}

impl Board {
    /// Create a new empty board with fixed dimensions
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            score: 0,
            lines: 0,
            landings: 0,
            falling: None,
            next: None,
        }
    }

    /// Create a board whose listed cells are already occupied.
    ///
    /// Each cell takes a neutral color; out-of-bounds cells are ignored.
    pub fn with_cells(width: i32, height: i32, cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut board = Self::new(width, height);
        for cell in cells {
            board.grid.set(cell, Some(Shape::O.color()));
        }
        board
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Count of pieces merged so far; a change tells observers that the piece
    /// they were steering is gone
    pub fn landings(&self) -> u64 {
        self.landings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Replace the falling piece directly (setup for simulations and tests)
    pub fn set_falling(&mut self, piece: Option<Piece>) {
        self.falling = piece;
    }

    /// False when nothing is falling, or when the falling piece overlaps the
    /// occupied cells or sticks out of a board too narrow for it (the game is
    /// over).
    pub fn alive(&self) -> bool {
        match &self.falling {
            Some(piece) => piece.in_bounds(&self.grid) && !piece.collides(&self.grid),
            None => false,
        }
    }

    /// Checks if the given row is fully occupied
    pub fn line_full(&self, row: i32) -> bool {
        self.grid.is_row_full(row)
    }

    /// Removes a row and moves every row above it down by one
    pub fn remove_line(&mut self, row: i32) {
        self.grid.remove_row(row);
    }

    /// Removes every full row from the floor upwards and returns the score
    /// earned by this pass.
    ///
    /// A row is removed repeatedly while full, so a stack of full rows
    /// collapsing onto the same index is handled.
    pub fn clean(&mut self) -> u32 {
        let mut removed = 0usize;

        let mut row = self.height() - 1;
        while row > 0 {
            while self.line_full(row) {
                self.remove_line(row);
                removed += 1;
            }
            row -= 1;
        }

        self.lines += removed as u32;
        LINE_SCORES[removed.min(LINE_SCORES.len() - 1)]
    }

    /// Queue a new piece as `next`
    pub fn set_next(&mut self, shape: Shape) {
        self.next = Some(Piece::new(shape));
    }

    /// Promote `next` to `falling` at its centered spawn position
    pub fn place_next_block(&mut self) {
        self.falling = self.next.take().map(|mut piece| {
            piece.center_on(self.width());
            piece
        });
    }

    /// Merge the falling piece into the grid, clean rows, spawn the next piece
    pub fn land_block(&mut self) {
        if let Some(piece) = self.falling.take() {
            for &cell in piece.cells() {
                self.grid.set(cell, Some(piece.color()));
            }

            self.landings += 1;
            let earned = self.clean();
            self.score += earned;
            debug!(shape = %piece.shape(), earned, score = self.score, "block landed");
        }
        self.place_next_block();
    }

    fn credit(&mut self, motion: Motion) -> bool {
        self.score += motion.fallen;
        motion.landed
    }

    /// One gravity step for the falling piece, then merge if either `landed`
    /// or the step itself reports a landing
    fn settle(&mut self, landed: bool) -> bool {
        let tick = match self.falling.as_mut() {
            Some(piece) => piece.translate(Direction::Down, 1, &self.grid),
            None => return landed,
        };
        let landed = self.credit(tick) || landed;
        if landed {
            self.land_block();
        }
        landed
    }

    /// Move the falling piece, then apply gravity. Returns whether it landed.
    pub fn move_piece(&mut self, direction: Direction) -> GameResult<bool> {
        let piece = self.falling.as_mut().ok_or(GameError::NoFallingPiece)?;
        let motion = piece.translate(direction, 1, &self.grid);
        let landed = self.credit(motion);
        Ok(self.settle(landed))
    }

    /// Rotate the falling piece, then apply gravity. Returns whether it landed.
    pub fn rotate(&mut self, rotation: Rotation) -> GameResult<bool> {
        let piece = self.falling.as_mut().ok_or(GameError::NoFallingPiece)?;
        piece.rotate(rotation, &self.grid);
        Ok(self.settle(false))
    }

    /// Apply only the gravity tick. Returns whether the piece landed.
    pub fn skip(&mut self) -> GameResult<bool> {
        if self.falling.is_none() {
            return Err(GameError::NoFallingPiece);
        }
        Ok(self.settle(false))
    }

    /// Apply any action
    pub fn apply(&mut self, action: Action) -> GameResult<bool> {
        match action {
            Action::Move(direction) => self.move_piece(direction),
            Action::Rotate(rotation) => self.rotate(rotation),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
