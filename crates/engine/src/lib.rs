//! Heuristic search engine
//!
//! Finds a placement for the falling piece by replaying every candidate on a
//! cloned board and scoring the result with a weighted sum of board
//! [`features`]. Search is pure: it reads the board it is given and returns a
//! [`Plan`]; it never mutates shared state.
//!
//! # Example
//!
//! ```
//! use blockfall_core::types::Shape;
//! use blockfall_core::Board;
//! use blockfall_engine::{search, SearchConfig};
//!
//! let mut board = Board::default();
//! board.set_next(Shape::T);
//! board.place_next_block();
//!
//! let plan = search(&board, &SearchConfig::default()).unwrap();
//! assert!(!plan.actions().is_empty());
//! ```

pub mod chooser;
pub mod config;
pub mod features;
pub mod search;

pub use chooser::HeuristicChooser;
pub use config::{ConfigError, Lookahead, SearchConfig};
pub use features::{Feature, Features};
pub use search::{search, simulate, Placement, Plan};
