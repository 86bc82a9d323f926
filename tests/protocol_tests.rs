//! Protocol tests - sessions wired back to back over in-memory streams

use std::io::Cursor;

use blockfall::adapter::{adversary, play, LineChooser, LineSupply, Token};
use blockfall::core::types::{Action, Shape};
use blockfall::core::{Board, Event, GameError, GameOverReason, RandomSupply, SharedBoard};
use blockfall::engine::HeuristicChooser;

fn tokens(bytes: Vec<u8>) -> Vec<Token> {
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| line.parse().unwrap())
        .collect()
}

#[test]
fn test_player_session_answers_every_shape() {
    let input = "T\nI\nO\nL\nEND\n";
    let mut out = Vec::new();
    let summary = play(Cursor::new(input), &mut out, Board::default(), HeuristicChooser::default())
        .unwrap();

    assert_eq!(summary.reason, GameOverReason::SupplyExhausted);
    let actions = tokens(out);
    assert!(actions.iter().all(|t| matches!(t, Token::Action(_))));
    // T, I and O are played; L is still queued when END arrives.
    let drops = actions.iter().filter(|t| **t == Token::Action(Action::DROP)).count();
    assert_eq!(drops, 3);
}

#[test]
fn test_player_output_replays_in_adversary_session() {
    // A player session against fixed shapes, then its answers fed back to an
    // adversary with the same shapes: both sides must agree on the score.
    let shapes = "S\nZ\nT\nJ\n";
    let mut answers = Vec::new();
    let player = play(
        Cursor::new(format!("{shapes}END\n")),
        &mut answers,
        Board::default(),
        HeuristicChooser::default(),
    )
    .unwrap();

    let supply = blockfall::core::ScriptedSupply::new([Shape::S, Shape::Z, Shape::T, Shape::J]);
    let mut announced = Vec::new();
    let adversary = adversary(Cursor::new(answers), &mut announced, Board::default(), supply).unwrap();

    assert_eq!(adversary.reason, GameOverReason::SupplyExhausted);
    assert_eq!(adversary.score, player.score);
    assert_eq!(
        tokens(announced),
        vec![
            Token::Shape(Shape::S),
            Token::Shape(Shape::Z),
            Token::Shape(Shape::T),
            Token::Shape(Shape::J),
        ]
    );
}

#[test]
fn test_adversary_session_with_random_supply() {
    let mut out = Vec::new();
    let summary = adversary(
        Cursor::new("LEFT\nDROP\nRIGHT\nDROP\n"),
        &mut out,
        Board::default(),
        RandomSupply::new(3),
    )
    .unwrap();

    assert_eq!(summary.reason, GameOverReason::InputClosed);
    // Spawn, queue, then one queue per landed piece.
    assert_eq!(tokens(out).len(), 4);
    assert!(summary.score > 0);
}

#[test]
fn test_line_capabilities_drive_a_run() {
    let shared = SharedBoard::new(Board::default());
    let supply = LineSupply::new(Cursor::new("O\nO\n"));
    let chooser = LineChooser::new(Cursor::new("DROP\nUP\n"));

    let results: Vec<_> = shared.run(supply, chooser).collect();
    assert!(matches!(results[0], Ok(Event::ShapeRevealed(Shape::O))));
    assert!(matches!(results[2], Ok(Event::ActionApplied { landed: true, .. })));
    // The supply ran dry (EOF) before the bad token was ever read.
    assert!(matches!(
        results.last(),
        Some(Ok(Event::GameOver(GameOverReason::InputClosed)))
    ));
    assert!(!results.iter().any(|r| matches!(r, Err(GameError::UnknownInstruction(_)))));
}
