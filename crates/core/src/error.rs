//! Error types for the simulation core
//!
//! Every failure that can leave the core is a [`GameError`]. Geometric
//! violations (collisions, walls) are never errors: translations and rotations
//! revert themselves instead.

/// Errors surfaced by the board, the orchestration loop and the capabilities
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A move, rotation or skip was requested while nothing is falling
    #[error("no falling piece")]
    NoFallingPiece,

    /// A text token matched no shape, direction or rotation
    #[error("unknown instruction: {0:?}")]
    UnknownInstruction(String),

    /// The piece supply has exhausted its allowance
    #[error("piece supply limit reached")]
    SupplyLimitReached,

    /// The input feeding a capability was closed
    #[error("input closed")]
    InputClosed,

    /// Reading or writing a protocol stream failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type GameResult<T> = Result<T, GameError>;
