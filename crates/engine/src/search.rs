//! Placement search
//!
//! Every candidate is a rotation count (anticlockwise quarter turns) and a
//! target left column. Candidates are played out on a clone of the board
//! through the same `rotate`/`move_piece` calls a live game uses, gravity
//! included, so the action list of the winning candidate replays exactly.
//!
//! Enumeration order is rotations outer, columns inner; a later candidate
//! replaces the best only when it scores strictly higher.
//!
//! A two-ply plan scores the sum of two absolute evaluations: the board after
//! the falling piece, plus the board after the best follow-up of the queued
//! piece. Height and hole terms of the intermediate board are therefore
//! counted once more than those of the final board, which weights the
//! immediate placement above the follow-up.

use blockfall_core::types::{Action, Rotation};
use blockfall_core::Board;
use tracing::debug;

use crate::config::{Lookahead, SearchConfig};
use crate::features::Features;

/// One simulated placement of one piece
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Anticlockwise quarter turns
    pub rotations: u8,
    /// Columns moved after rotating; negative is left
    pub shift: i32,
    /// The actions that were actually applied until the piece landed
    pub actions: Vec<Action>,
    pub score: f64,
}

/// The best move found for the falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub first: Placement,
    /// Best placement of the queued piece after `first`, for two-ply search
    pub second: Option<Placement>,
}

impl Plan {
    /// Combined score of every ply
    pub fn score(&self) -> f64 {
        self.first.score + self.second.as_ref().map_or(0.0, |p| p.score)
    }

    /// Actions to send for the falling piece
    pub fn actions(&self) -> &[Action] {
        &self.first.actions
    }
}

/// Search the best placement of the falling piece on `board`.
///
/// Returns `None` when nothing is falling. The board is never mutated.
pub fn search(board: &Board, config: &SearchConfig) -> Option<Plan> {
    board.falling()?;

    let mut best: Option<Plan> = None;
    for (placement, after) in candidates(board, config) {
        let plan = match config.lookahead {
            Lookahead::OnePly => Plan {
                first: placement,
                second: None,
            },
            Lookahead::TwoPly => {
                let second = if placement.score == f64::NEG_INFINITY {
                    None
                } else {
                    best_single(&after, config)
                };
                Plan {
                    first: placement,
                    second,
                }
            }
        };

        if best.as_ref().map_or(true, |b| plan.score() > b.score()) {
            best = Some(plan);
        }
    }

    if let Some(plan) = &best {
        debug!(
            rotations = plan.first.rotations,
            shift = plan.first.shift,
            score = plan.score(),
            "chose placement"
        );
    }
    best
}

/// Best one-ply placement, or `None` when nothing is falling
fn best_single(board: &Board, config: &SearchConfig) -> Option<Placement> {
    let mut best: Option<Placement> = None;
    for (placement, _) in candidates(board, config) {
        if best.as_ref().map_or(true, |b| placement.score > b.score) {
            best = Some(placement);
        }
    }
    best
}

/// Every scored candidate with the board it leaves behind
fn candidates<'a>(
    board: &'a Board,
    config: &'a SearchConfig,
) -> impl Iterator<Item = (Placement, Board)> + 'a {
    (0..4u8).flat_map(move |rotations| {
        (0..board.width()).filter_map(move |column| {
            let (mut placement, after) = simulate(board, rotations, column)?;
            placement.score = evaluate(board, &after, config);
            Some((placement, after))
        })
    })
}

/// Play one candidate out on a clone of `board`
pub fn simulate(board: &Board, rotations: u8, column: i32) -> Option<(Placement, Board)> {
    let mut clone = board.clone();
    let mut placement = Placement {
        rotations,
        shift: 0,
        actions: Vec::new(),
        score: 0.0,
    };

    for _ in 0..rotations {
        placement.actions.push(Action::ANTICLOCKWISE);
        if clone.rotate(Rotation::Anticlockwise).ok()? {
            return Some((placement, clone));
        }
    }

    placement.shift = column - clone.falling()?.left();
    let step = if placement.shift < 0 {
        Action::LEFT
    } else {
        Action::RIGHT
    };
    for _ in 0..placement.shift.unsigned_abs() {
        placement.actions.push(step);
        if clone.apply(step).ok()? {
            return Some((placement, clone));
        }
    }

    placement.actions.push(Action::DROP);
    clone.apply(Action::DROP).ok()?;
    Some((placement, clone))
}

/// Score the board left behind by a placement
fn evaluate(before: &Board, after: &Board, config: &SearchConfig) -> f64 {
    if topped_out(after) {
        return f64::NEG_INFINITY;
    }
    let lines = after.lines() - before.lines();
    config.evaluate(&Features::measure(after.grid(), lines))
}

/// The piece spawned after landing overlaps the stack
fn topped_out(board: &Board) -> bool {
    board
        .falling()
        .is_some_and(|piece| piece.collides(board.grid()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::Shape;
    use blockfall_core::Occupancy;

    fn board_with(shape: Shape, next: Option<Shape>) -> Board {
        let mut board = Board::new(10, 20);
        board.set_next(shape);
        board.place_next_block();
        if let Some(next) = next {
            board.set_next(next);
        }
        board
    }

    #[test]
    fn nothing_falling_means_no_plan() {
        assert!(search(&Board::new(10, 20), &SearchConfig::default()).is_none());
    }

    #[test]
    fn simulate_ends_with_drop_on_open_board() {
        let board = board_with(Shape::O, None);
        let (placement, after) = simulate(&board, 0, 0).unwrap();

        assert_eq!(placement.shift, -5);
        assert_eq!(placement.actions.len(), 6);
        assert_eq!(placement.actions.last(), Some(&Action::DROP));
        assert!(after.grid().contains((0, 19)));
        assert!(board.grid().is_empty());
    }

    #[test]
    fn search_completes_an_open_row() {
        // Bottom row full except columns 4 and 5.
        let cells: Vec<_> = (0..10).filter(|x| *x != 4 && *x != 5).map(|x| (x, 19)).collect();
        let mut board = Board::with_cells(10, 20, cells);
        board.set_next(Shape::O);
        board.place_next_block();

        let plan = search(&board, &SearchConfig::default()).unwrap();
        let mut live = board.clone();
        for &action in plan.actions() {
            live.apply(action).unwrap();
        }
        assert_eq!(live.lines(), 1);
    }

    #[test]
    fn two_ply_records_second_placement() {
        let board = board_with(Shape::T, Some(Shape::I));
        let config = SearchConfig::default().with_lookahead(Lookahead::TwoPly);

        let plan = search(&board, &config).unwrap();
        assert!(plan.second.is_some());
    }

    #[test]
    fn two_ply_score_adds_both_evaluations() {
        let board = board_with(Shape::T, Some(Shape::I));
        let config = SearchConfig::default().with_lookahead(Lookahead::TwoPly);
        let plan = search(&board, &config).unwrap();

        let (first, after) = candidates(&board, &config)
            .find(|(placement, _)| *placement == plan.first)
            .unwrap();
        let second = best_single(&after, &config).unwrap();

        assert_eq!(plan.second.as_ref(), Some(&second));
        assert_eq!(plan.score(), first.score + second.score);
    }
}
