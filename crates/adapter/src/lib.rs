//! Adapter - driving a game over a line-based text protocol
//!
//! External processes talk to the engine one token per line (see
//! [`protocol`]). The same tokens flow over stdin/stdout or a TCP socket:
//!
//! ```text
//! adversary -> player: T
//! adversary -> player: S
//! player -> adversary: ANTICLOCKWISE
//! player -> adversary: LEFT
//! player -> adversary: DROP
//! adversary -> player: Z
//! ...
//! adversary -> player: END
//! ```
//!
//! # Modules
//!
//! - [`protocol`]: token parsing and writing
//! - [`remote`]: a piece supply and a move chooser fed by a line reader
//! - [`session`]: player and adversary sessions over any reader/writer pair
//! - [`server`]: tokio TCP server running one player session per connection
//! - [`config`]: `BLOCKFALL_*` environment configuration
//!
//! # Testing
//!
//! Start `blockfall serve` and type shapes by hand:
//!
//! ```bash
//! nc 127.0.0.1 7777
//! T
//! ```

pub mod config;
pub mod protocol;
pub mod remote;
pub mod server;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_engine as engine;

pub use config::{GameConfig, SupplyKind};
pub use protocol::{write_token, Token};
pub use remote::{LineChooser, LineSupply};
pub use server::run_server;
pub use session::{adversary, play, SessionSummary};
