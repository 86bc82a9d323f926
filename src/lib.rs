//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof, so integration tests,
//! benches and the binary can use `blockfall::{core,engine,adapter,input,types}`.

pub use blockfall_adapter as adapter;
pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
