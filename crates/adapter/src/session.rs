//! Stream-driven sessions
//!
//! A *player* session receives shapes on its input, plays them with a local
//! chooser and answers each applied action as a token line. An *adversary*
//! session is the mirror image: it picks shapes locally, announces them, and
//! plays whatever actions arrive on its input.

use std::io::{BufRead, Write};

use blockfall_core::{
    Board, Event, GameOverReason, GameResult, GameRun, MoveChoice, PieceSupply, SharedBoard,
};
use tracing::info;

use crate::protocol::write_token;
use crate::remote::{LineChooser, LineSupply};

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: GameOverReason,
    pub score: u32,
    pub lines: u32,
}

/// Pull `run` to completion, handing each event to `on_event`
fn drive<S, C>(
    mut run: GameRun<S, C>,
    mut on_event: impl FnMut(&Event, &SharedBoard) -> GameResult<()>,
) -> GameResult<SessionSummary>
where
    S: PieceSupply,
    C: MoveChoice,
{
    let mut reason = GameOverReason::InputClosed;
    while let Some(event) = run.next() {
        let event = event?;
        on_event(&event, run.board())?;
        if let Event::GameOver(why) = event {
            reason = why;
        }
    }

    let board = run.board();
    let (score, lines) = board.read(|b| (b.score(), b.lines()));
    Ok(SessionSummary {
        reason,
        score,
        lines,
    })
}

/// Play shapes read from `input` with `chooser`, writing every applied action
pub fn play<R, W, C>(input: R, mut output: W, board: Board, chooser: C) -> GameResult<SessionSummary>
where
    R: BufRead,
    W: Write,
    C: MoveChoice,
{
    let shared = SharedBoard::new(board);
    let run = shared.run(LineSupply::new(input), chooser);

    let summary = drive(run, |event, _| {
        if let Event::ActionApplied { action, .. } = event {
            write_token(&mut output, *action)?;
        }
        Ok(())
    })?;
    info!(
        reason = ?summary.reason,
        score = summary.score,
        lines = summary.lines,
        "player session finished"
    );
    Ok(summary)
}

/// Announce shapes from `supply` on `output` and apply actions read from `input`
pub fn adversary<R, W, S>(
    input: R,
    mut output: W,
    board: Board,
    supply: S,
) -> GameResult<SessionSummary>
where
    R: BufRead,
    W: Write,
    S: PieceSupply,
{
    let shared = SharedBoard::new(board);
    let run = shared.run(supply, LineChooser::new(input));

    let mut last_score = 0;
    let summary = drive(run, |event, board| {
        if let Event::ShapeRevealed(shape) = event {
            write_token(&mut output, *shape)?;
        }
        let score = board.score();
        if score != last_score {
            info!(score, "score changed");
            last_score = score;
        }
        Ok(())
    })?;
    info!(
        reason = ?summary.reason,
        score = summary.score,
        lines = summary.lines,
        "adversary session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{Action, Shape};
    use blockfall_core::{GameError, ScriptedSupply};
    use std::io::Cursor;

    struct Dropper;

    impl MoveChoice for Dropper {
        fn choose_action(&mut self, _board: &Board) -> GameResult<Vec<Action>> {
            Ok(vec![Action::DROP])
        }
    }

    #[test]
    fn player_writes_applied_actions() {
        let mut out = Vec::new();
        let summary = play(Cursor::new("O\nI\nEND\n"), &mut out, Board::default(), Dropper).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "DROP\n");
        assert_eq!(summary.reason, GameOverReason::SupplyExhausted);
        assert_eq!(summary.score, 18);
    }

    #[test]
    fn player_rejects_garbage() {
        let result = play(Cursor::new("O\nQ\n"), Vec::new(), Board::default(), Dropper);
        assert!(matches!(result, Err(GameError::UnknownInstruction(t)) if t == "Q"));
    }

    #[test]
    fn adversary_announces_shapes_until_input_closes() {
        let mut out = Vec::new();
        let supply = ScriptedSupply::new([Shape::T, Shape::S, Shape::Z]);
        let summary = adversary(Cursor::new("DROP\n"), &mut out, Board::default(), supply).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "T\nS\nZ\n");
        assert_eq!(summary.reason, GameOverReason::InputClosed);
        assert_eq!(summary.score, 18);
        assert_eq!(summary.lines, 0);
    }
}
