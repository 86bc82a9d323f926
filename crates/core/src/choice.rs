//! Move-choice capability
//!
//! The chooser is the player. It receives a snapshot clone of the board and
//! answers with zero or more actions; an empty answer means "let gravity act".

use crate::board::Board;
use crate::error::GameResult;
use crate::rng::SimpleRng;
use crate::types::Action;

/// Chooses the next action(s) for the falling piece.
///
/// Object-safe so it can be used as `Box<dyn MoveChoice>`.
pub trait MoveChoice {
    fn choose_action(&mut self, board: &Board) -> GameResult<Vec<Action>>;
}

impl<T: MoveChoice + ?Sized> MoveChoice for &mut T {
    fn choose_action(&mut self, board: &Board) -> GameResult<Vec<Action>> {
        (**self).choose_action(board)
    }
}

impl<T: MoveChoice + ?Sized> MoveChoice for Box<T> {
    fn choose_action(&mut self, board: &Board) -> GameResult<Vec<Action>> {
        (**self).choose_action(board)
    }
}

/// Picks one random non-drop action per call
#[derive(Debug, Clone)]
pub struct RandomChooser {
    rng: SimpleRng,
}

impl RandomChooser {
    const CHOICES: [Action; 5] = [
        Action::LEFT,
        Action::RIGHT,
        Action::DOWN,
        Action::ANTICLOCKWISE,
        Action::CLOCKWISE,
    ];

    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl MoveChoice for RandomChooser {
    fn choose_action(&mut self, _board: &Board) -> GameResult<Vec<Action>> {
        Ok(self.rng.choose(&Self::CHOICES).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_chooser_never_drops() {
        let board = Board::default();
        let mut chooser = RandomChooser::new(3);
        for _ in 0..200 {
            let actions = chooser.choose_action(&board).unwrap();
            assert_eq!(actions.len(), 1);
            assert_ne!(actions[0], Action::DROP);
        }
    }
}
