//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and the loop that drives it. It does
//! no I/O of its own: pieces arrive through a [`PieceSupply`], moves through a
//! [`MoveChoice`], and both may be local (seeded random, scripted, heuristic)
//! or remote (a text stream, a keyboard).
//!
//! # Module Structure
//!
//! - [`grid`]: occupied cells and their colors
//! - [`piece`]: a live tetromino with translation and centre-based rotation
//! - [`board`]: grid, falling and queued pieces, scoring and line cleaning
//! - [`supply`] / [`choice`]: the two capabilities that feed a game
//! - [`shared`]: a lock-guarded board for concurrent readers and timers
//! - [`run`]: the turn protocol as an iterator of [`Event`]s
//! - [`rng`]: seeded LCG and 7-bag generator
//!
//! # Game Rules
//!
//! - Every action is followed by one implicit gravity step
//! - A soft drop earns one point per row fallen; so does gravity
//! - A cleaning pass pays 0, 100, 400, 800 or 1600 for 0..=4+ rows
//! - Rotation turns about the piece centre, then nudges it back inside the
//!   walls; there is no kick table
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, Event, GameOverReason, RandomChooser, RandomSupply, SharedBoard};
//!
//! let shared = SharedBoard::new(Board::default());
//! let events = shared
//!     .run(RandomSupply::new(7).with_limit(5), RandomChooser::new(7))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! assert!(matches!(events.last(), Some(Event::GameOver(_))));
//! assert!(!events.contains(&Event::GameOver(GameOverReason::InputClosed)));
//! ```

pub mod board;
pub mod choice;
pub mod error;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod run;
pub mod shared;
pub mod supply;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use choice::{MoveChoice, RandomChooser};
pub use error::{GameError, GameResult};
pub use grid::{collides, Grid, Occupancy};
pub use piece::{Motion, Piece};
pub use rng::{ShapeBag, SimpleRng};
pub use run::{Event, GameOverReason, GameRun};
pub use shared::SharedBoard;
pub use supply::{BagSupply, PieceSupply, RandomSupply, ScriptedSupply};
