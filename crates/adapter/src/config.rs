//! Environment configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOCKFALL_SEED` | 42 |
//! | `BLOCKFALL_WIDTH` / `BLOCKFALL_HEIGHT` | 10 / 20 (at least 4) |
//! | `BLOCKFALL_SUPPLY` | `random` (`random` or `bag`) |
//! | `BLOCKFALL_PIECE_LIMIT` | unlimited |
//! | `BLOCKFALL_LOOKAHEAD` | 1 (`1` or `2`) |
//! | `BLOCKFALL_WEIGHTS` | built-in weights (path to a JSON file otherwise) |
//! | `BLOCKFALL_HOST` / `BLOCKFALL_PORT` | 127.0.0.1 / 7777 |
//!
//! Unparseable values fall back to the default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use blockfall_core::types::{BOARD_HEIGHT, BOARD_WIDTH, MIN_BOARD_SIZE};
use blockfall_core::{BagSupply, Board, PieceSupply, RandomSupply};
use blockfall_engine::{ConfigError, Lookahead, SearchConfig};

/// Built-in shape generator for local games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplyKind {
    /// Uniform draws, repeats allowed
    #[default]
    Random,
    /// Shuffled 7-bags
    Bag,
}

impl FromStr for SupplyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "uniform" => Ok(SupplyKind::Random),
            "bag" | "7bag" | "7-bag" => Ok(SupplyKind::Bag),
            other => Err(format!("unknown supply {other:?}")),
        }
    }
}

/// Settings shared by every session mode
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub seed: u32,
    pub width: i32,
    pub height: i32,
    pub supply: SupplyKind,
    pub piece_limit: Option<u32>,
    pub lookahead: Lookahead,
    pub weights_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            supply: SupplyKind::Random,
            piece_limit: None,
            lookahead: Lookahead::OnePly,
            weights_path: None,
            host: "127.0.0.1".to_string(),
            port: 7777,
        }
    }
}

impl GameConfig {
    /// Create from `BLOCKFALL_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = parsed(&lookup, "BLOCKFALL_WIDTH")
            .filter(|w: &i32| *w >= MIN_BOARD_SIZE)
            .unwrap_or(defaults.width);
        let height = parsed(&lookup, "BLOCKFALL_HEIGHT")
            .filter(|h: &i32| *h >= MIN_BOARD_SIZE)
            .unwrap_or(defaults.height);

        let lookahead = parsed(&lookup, "BLOCKFALL_LOOKAHEAD")
            .and_then(Lookahead::from_depth)
            .unwrap_or(defaults.lookahead);

        let weights_path = lookup("BLOCKFALL_WEIGHTS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            seed: parsed(&lookup, "BLOCKFALL_SEED").unwrap_or(defaults.seed),
            width,
            height,
            supply: parsed(&lookup, "BLOCKFALL_SUPPLY").unwrap_or(defaults.supply),
            piece_limit: parsed(&lookup, "BLOCKFALL_PIECE_LIMIT"),
            lookahead,
            weights_path,
            host: lookup("BLOCKFALL_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "BLOCKFALL_PORT").unwrap_or(defaults.port),
        }
    }

    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// The configured shape generator, seeded and capped
    pub fn supply(&self) -> Box<dyn PieceSupply + Send> {
        match (self.supply, self.piece_limit) {
            (SupplyKind::Random, None) => Box::new(RandomSupply::new(self.seed)),
            (SupplyKind::Random, Some(limit)) => {
                Box::new(RandomSupply::new(self.seed).with_limit(limit))
            }
            (SupplyKind::Bag, None) => Box::new(BagSupply::new(self.seed)),
            (SupplyKind::Bag, Some(limit)) => Box::new(BagSupply::new(self.seed).with_limit(limit)),
        }
    }

    /// Weights from `weights_path` (or the built-in ones) at the configured depth
    pub fn search_config(&self) -> Result<SearchConfig, ConfigError> {
        let config = match &self.weights_path {
            Some(path) => SearchConfig::from_path(path)?,
            None => SearchConfig::default(),
        };
        Ok(config.with_lookahead(self.lookahead))
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> GameConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), GameConfig::default());
    }

    #[test]
    fn values_are_read_and_validated() {
        let config = config_from(&[
            ("BLOCKFALL_SEED", "7"),
            ("BLOCKFALL_WIDTH", "6"),
            ("BLOCKFALL_HEIGHT", "-3"),
            ("BLOCKFALL_PIECE_LIMIT", "100"),
            ("BLOCKFALL_LOOKAHEAD", "2"),
            ("BLOCKFALL_PORT", "not a port"),
            ("BLOCKFALL_SUPPLY", " Bag "),
        ]);
        assert_eq!(config.seed, 7);
        assert_eq!(config.width, 6);
        assert_eq!(config.height, BOARD_HEIGHT);
        assert_eq!(config.piece_limit, Some(100));
        assert_eq!(config.lookahead, Lookahead::TwoPly);
        assert_eq!(config.port, 7777);
        assert_eq!(config.supply, SupplyKind::Bag);
    }

    #[test]
    fn boards_smaller_than_a_piece_are_rejected() {
        let config = config_from(&[("BLOCKFALL_WIDTH", "2"), ("BLOCKFALL_HEIGHT", "4")]);
        assert_eq!(config.width, BOARD_WIDTH);
        assert_eq!(config.height, 4);
        assert_eq!(config_from(&[("BLOCKFALL_SUPPLY", "dice")]).supply, SupplyKind::Random);
    }

    #[test]
    fn bag_supply_is_selectable_and_capped() {
        let config = config_from(&[
            ("BLOCKFALL_SUPPLY", "bag"),
            ("BLOCKFALL_PIECE_LIMIT", "7"),
        ]);
        let board = config.board();
        let mut supply = config.supply();

        let mut dealt: Vec<_> = (0..7).map(|_| supply.choose_block(&board).unwrap()).collect();
        dealt.sort_by_key(|s| s.as_str());
        dealt.dedup();
        assert_eq!(dealt.len(), 7);
        assert!(supply.choose_block(&board).is_err());
    }

    #[test]
    fn search_config_follows_lookahead() {
        let config = config_from(&[("BLOCKFALL_LOOKAHEAD", "2")]);
        assert_eq!(config.search_config().unwrap().lookahead, Lookahead::TwoPly);
    }

    #[test]
    fn missing_weights_file_is_an_error() {
        let config = config_from(&[("BLOCKFALL_WEIGHTS", "/nonexistent/weights.json")]);
        assert!(matches!(config.search_config(), Err(ConfigError::Io(_))));
    }

    #[test]
    fn socket_addr_parses() {
        let addr = GameConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 7777);
    }
}
