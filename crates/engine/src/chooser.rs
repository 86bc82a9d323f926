//! Heuristic player

use blockfall_core::types::Action;
use blockfall_core::{Board, GameResult, MoveChoice};

use crate::config::SearchConfig;
use crate::search::search;

/// Answers every turn with the full action list of the best placement.
///
/// Holds no state between turns; the same board always yields the same
/// actions.
#[derive(Debug, Clone, Default)]
pub struct HeuristicChooser {
    config: SearchConfig,
}

impl HeuristicChooser {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl MoveChoice for HeuristicChooser {
    fn choose_action(&mut self, board: &Board) -> GameResult<Vec<Action>> {
        Ok(search(board, &self.config)
            .map(|plan| plan.first.actions)
            .unwrap_or_default())
    }
}
