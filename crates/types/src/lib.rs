//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the workspace.
//! All types are plain data with no external dependencies, making them usable in
//! any context (simulation, search, text protocol, keyboard input).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 19 is the bottom)
//!
//! # Protocol Tokens
//!
//! Every shape, direction and rotation has a fixed upper-case spelling used by the
//! line protocol:
//!
//! | Kind | Tokens |
//! |------|--------|
//! | Shape | `I` `J` `L` `O` `S` `T` `Z` |
//! | Direction | `LEFT` `RIGHT` `DOWN` `DROP` |
//! | Rotation | `CLOCKWISE` `ANTICLOCKWISE` |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Action, Direction, Rotation, Shape, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Shape::from_token("T"), Some(Shape::T));
//! assert_eq!(Direction::Drop.as_str(), "DROP");
//! assert_eq!(Rotation::Clockwise.inverse(), Rotation::Anticlockwise);
//! assert_eq!(Action::from_token("LEFT"), Some(Action::Move(Direction::Left)));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: i32 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: i32 = 20;

/// Smallest board every shape fits on in any orientation
pub const MIN_BOARD_SIZE: i32 = 4;

/// Points awarded per cleaning pass, indexed by the number of rows removed.
///
/// Passes removing more than four rows are paid at the last tier.
pub const LINE_SCORES: [u32; 5] = [0, 100, 400, 800, 1600];

/// Sentinel token announcing that the piece supply is exhausted.
pub const END_TOKEN: &str = "END";

/// An `(x, y)` grid coordinate; `y` grows downwards.
pub type Cell = (i32, i32);

/// The seven tetromino shapes
///
/// Each shape has a fixed display color:
/// - **I**: Cyan, straight bar
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **T**: Magenta
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Shape {
    /// All shapes in protocol order.
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::S,
        Shape::T,
        Shape::Z,
    ];

    /// Parse a shape token (exact, upper-case)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Shape;
    ///
    /// assert_eq!(Shape::from_token("O"), Some(Shape::O));
    /// assert_eq!(Shape::from_token("o"), None);
    /// assert_eq!(Shape::from_token("unknown"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "I" => Some(Shape::I),
            "J" => Some(Shape::J),
            "L" => Some(Shape::L),
            "O" => Some(Shape::O),
            "S" => Some(Shape::S),
            "T" => Some(Shape::T),
            "Z" => Some(Shape::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "I",
            Shape::J => "J",
            Shape::L => "L",
            Shape::O => "O",
            Shape::S => "S",
            Shape::T => "T",
            Shape::Z => "Z",
        }
    }

    /// Display color of the shape.
    pub fn color(&self) -> Color {
        match self {
            Shape::I => Color::Cyan,
            Shape::J => Color::Blue,
            Shape::L => Color::Orange,
            Shape::O => Color::Yellow,
            Shape::S => Color::Green,
            Shape::T => Color::Magenta,
            Shape::Z => Color::Red,
        }
    }

    /// Unrotated silhouette, top-left anchored at the origin.
    pub fn cells(&self) -> [Cell; 4] {
        match self {
            Shape::I => [(0, 0), (0, 1), (0, 2), (0, 3)],
            Shape::J => [(1, 0), (1, 1), (0, 2), (1, 2)],
            Shape::L => [(0, 0), (0, 1), (0, 2), (1, 2)],
            Shape::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Shape::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            Shape::T => [(0, 0), (1, 0), (2, 0), (1, 1)],
            Shape::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }

    /// Rotation center in half-cell units: `(2, 3)` means `(1.0, 1.5)`.
    pub fn center_halves(&self) -> (i32, i32) {
        match self {
            Shape::I => (1, 3),
            Shape::J => (2, 2),
            Shape::L => (0, 2),
            Shape::O => (1, 1),
            Shape::S => (2, 2),
            Shape::T => (2, 0),
            Shape::Z => (2, 2),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color attached to a shape and to every cell it leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Magenta,
    Red,
}

/// Translations available to the player, plus dropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One column left
    Left,
    /// One column right
    Right,
    /// One row down (soft drop, scores a point)
    Down,
    /// All the way down until supported
    Drop,
}

impl Direction {
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "LEFT" => Some(Direction::Left),
            "RIGHT" => Some(Direction::Right),
            "DOWN" => Some(Direction::Down),
            "DROP" => Some(Direction::Drop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Drop => "DROP",
        }
    }
}

/// Quarter-turn rotations available to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

impl Rotation {
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "CLOCKWISE" => Some(Rotation::Clockwise),
            "ANTICLOCKWISE" => Some(Rotation::Anticlockwise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Clockwise => "CLOCKWISE",
            Rotation::Anticlockwise => "ANTICLOCKWISE",
        }
    }

    /// The opposite quarter turn.
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::Anticlockwise.inverse(), Rotation::Clockwise);
    /// ```
    pub fn inverse(&self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::Anticlockwise,
            Rotation::Anticlockwise => Rotation::Clockwise,
        }
    }
}

/// A single player action: a translation or a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Rotate(Rotation),
}

impl Action {
    pub const LEFT: Action = Action::Move(Direction::Left);
    pub const RIGHT: Action = Action::Move(Direction::Right);
    pub const DOWN: Action = Action::Move(Direction::Down);
    pub const DROP: Action = Action::Move(Direction::Drop);
    pub const CLOCKWISE: Action = Action::Rotate(Rotation::Clockwise);
    pub const ANTICLOCKWISE: Action = Action::Rotate(Rotation::Anticlockwise);

    /// Parse any direction or rotation token
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Action, Rotation};
    ///
    /// assert_eq!(Action::from_token("CLOCKWISE"), Some(Action::Rotate(Rotation::Clockwise)));
    /// assert_eq!(Action::from_token("T"), None);
    /// ```
    pub fn from_token(s: &str) -> Option<Self> {
        Direction::from_token(s)
            .map(Action::Move)
            .or_else(|| Rotation::from_token(s).map(Action::Rotate))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move(d) => d.as_str(),
            Action::Rotate(r) => r.as_str(),
        }
    }
}

impl From<Direction> for Action {
    fn from(value: Direction) -> Self {
        Action::Move(value)
    }
}

impl From<Rotation> for Action {
    fn from(value: Rotation) -> Self {
        Action::Rotate(value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_tokens_roundtrip() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_token(shape.as_str()), Some(shape));
        }
    }

    #[test]
    fn action_tokens_are_disjoint_from_shapes() {
        for token in ["LEFT", "RIGHT", "DOWN", "DROP", "CLOCKWISE", "ANTICLOCKWISE"] {
            assert!(Action::from_token(token).is_some(), "{token}");
            assert!(Shape::from_token(token).is_none(), "{token}");
        }
        assert_eq!(Action::from_token(END_TOKEN), None);
        assert_eq!(Shape::from_token(END_TOKEN), None);
    }

    #[test]
    fn every_shape_has_four_cells_inside_its_box() {
        for shape in Shape::ALL {
            let cells = shape.cells();
            assert!(cells.iter().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)));
            let mut sorted = cells.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 4, "{shape} has duplicate cells");
        }
    }

    #[test]
    fn line_score_table() {
        assert_eq!(LINE_SCORES, [0, 100, 400, 800, 1600]);
    }
}
