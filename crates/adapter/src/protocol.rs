//! Line protocol tokens
//!
//! One token per line, surrounding whitespace ignored, case-sensitive:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `I` `J` `L` `O` `S` `T` `Z` | a shape |
//! | `LEFT` `RIGHT` `DOWN` `DROP` | a translation |
//! | `CLOCKWISE` `ANTICLOCKWISE` | a rotation |
//! | `END` | the piece supply is exhausted |

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use blockfall_core::types::{Action, Shape, END_TOKEN};
use blockfall_core::GameError;

/// A single protocol line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Shape(Shape),
    Action(Action),
    End,
}

impl Token {
    /// Parse one line. Anything that is not a known token is an
    /// [`GameError::UnknownInstruction`].
    pub fn parse(line: &str) -> Result<Self, GameError> {
        let word = line.trim();
        if word == END_TOKEN {
            return Ok(Token::End);
        }
        if let Some(shape) = Shape::from_token(word) {
            return Ok(Token::Shape(shape));
        }
        if let Some(action) = Action::from_token(word) {
            return Ok(Token::Action(action));
        }
        Err(GameError::UnknownInstruction(word.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Shape(shape) => shape.as_str(),
            Token::Action(action) => action.as_str(),
            Token::End => END_TOKEN,
        }
    }
}

impl FromStr for Token {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Shape> for Token {
    fn from(value: Shape) -> Self {
        Token::Shape(value)
    }
}

impl From<Action> for Token {
    fn from(value: Action) -> Self {
        Token::Action(value)
    }
}

/// Write one token line and flush it, so an interactive peer sees it at once.
pub fn write_token<W: Write + ?Sized>(out: &mut W, token: impl Into<Token>) -> io::Result<()> {
    writeln!(out, "{}", token.into())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::types::{Direction, Rotation};

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Token::parse("  T\n").unwrap(), Token::Shape(Shape::T));
        assert_eq!(
            Token::parse("DROP\r\n").unwrap(),
            Token::Action(Action::Move(Direction::Drop))
        );
        assert_eq!(
            "ANTICLOCKWISE".parse::<Token>().unwrap(),
            Token::Action(Action::Rotate(Rotation::Anticlockwise))
        );
        assert_eq!(Token::parse("END").unwrap(), Token::End);
    }

    #[test]
    fn parse_is_case_sensitive() {
        for bad in ["t", "left", "End", "", "UP"] {
            assert!(
                matches!(Token::parse(bad), Err(GameError::UnknownInstruction(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn write_token_emits_one_line() {
        let mut out = Vec::new();
        write_token(&mut out, Shape::Z).unwrap();
        write_token(&mut out, Action::CLOCKWISE).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Z\nCLOCKWISE\n");
    }
}
