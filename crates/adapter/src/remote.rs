//! Capabilities fed by a line stream
//!
//! Both readers block until a full line arrives. End of input surfaces as
//! [`GameError::InputClosed`], which the run turns into a clean game over.

use std::io::BufRead;

use blockfall_core::types::{Action, Shape};
use blockfall_core::{Board, GameError, GameResult, MoveChoice, PieceSupply};

use crate::protocol::Token;

fn read_token<R: BufRead>(reader: &mut R, line: &mut String) -> GameResult<Token> {
    line.clear();
    if reader.read_line(line)? == 0 {
        return Err(GameError::InputClosed);
    }
    Token::parse(line)
}

/// Reads one shape per turn; `END` exhausts the supply
#[derive(Debug)]
pub struct LineSupply<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineSupply<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> PieceSupply for LineSupply<R> {
    fn choose_block(&mut self, _board: &Board) -> GameResult<Shape> {
        match read_token(&mut self.reader, &mut self.line)? {
            Token::Shape(shape) => Ok(shape),
            Token::End => Err(GameError::SupplyLimitReached),
            Token::Action(action) => Err(GameError::UnknownInstruction(action.to_string())),
        }
    }
}

/// Reads one action per turn; `END` closes the input
#[derive(Debug)]
pub struct LineChooser<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineChooser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> MoveChoice for LineChooser<R> {
    fn choose_action(&mut self, _board: &Board) -> GameResult<Vec<Action>> {
        match read_token(&mut self.reader, &mut self.line)? {
            Token::Action(action) => Ok(vec![action]),
            Token::End => Err(GameError::InputClosed),
            Token::Shape(shape) => Err(GameError::UnknownInstruction(shape.to_string())),
        }
    }
}
