//! blockfall runner (default binary).
//!
//! ```text
//! blockfall [autoplay|player|adversary|serve|manual]
//! ```
//!
//! - `autoplay`: generated shapes against the heuristic player, events logged
//! - `player`: shapes on stdin, heuristic actions on stdout
//! - `adversary`: generated shapes on stdout, actions read from stdin
//! - `serve`: TCP server running a player session per connection
//! - `manual`: generated shapes, moves from the keyboard
//!
//! Everything else comes from `BLOCKFALL_*` environment variables. Logs go to
//! stderr so stdout stays a clean protocol channel.

use std::io;

use anyhow::{bail, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::adapter::{self, GameConfig};
use blockfall::core::{Event, MoveChoice, SharedBoard};
use blockfall::engine::HeuristicChooser;
use blockfall::input::{KeyboardChooser, RawMode};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "autoplay".to_string());
    let config = GameConfig::from_env();
    debug!(?config, %mode, "starting");

    match mode.as_str() {
        "autoplay" => {
            let chooser = HeuristicChooser::new(config.search_config()?);
            autoplay(&config, chooser)
        }
        "player" => {
            let chooser = HeuristicChooser::new(config.search_config()?);
            let stdin = io::stdin().lock();
            adapter::play(stdin, io::stdout().lock(), config.board(), chooser)?;
            Ok(())
        }
        "adversary" => {
            let stdin = io::stdin().lock();
            adapter::adversary(stdin, io::stdout().lock(), config.board(), config.supply())?;
            Ok(())
        }
        "serve" => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(adapter::run_server(config, None))
        }
        "manual" => {
            let _raw = RawMode::enter()?;
            autoplay(&config, KeyboardChooser::default())
        }
        other => bail!("unknown mode {other:?}; expected autoplay, player, adversary, serve or manual"),
    }
}

/// Play a local game to completion, logging every landing
fn autoplay(config: &GameConfig, chooser: impl MoveChoice) -> Result<()> {
    let shared = SharedBoard::new(config.board());
    let mut pieces = 0u32;

    for event in shared.run(config.supply(), chooser) {
        match event? {
            Event::ShapeRevealed(shape) => {
                pieces += 1;
                debug!(%shape, "revealed");
            }
            Event::ActionApplied { landed: true, .. } | Event::Skipped { landed: true } => {
                let (score, lines) = shared.read(|b| (b.score(), b.lines()));
                debug!(score, lines, "landed");
            }
            Event::GameOver(reason) => {
                let (score, lines) = shared.read(|b| (b.score(), b.lines()));
                info!(?reason, pieces, score, lines, "game over");
            }
            _ => {}
        }
    }
    Ok(())
}
