use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::piece::{Color, PieceType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("invalid square notation: {0:?}")]
    InvalidCoordinate(String),
}

/// A board square in algebraic form, e.g. "e4".
///
/// Internally this is a zero-based grid index: row 0 is rank 1, col 0 is file a.
/// The index never leaves the crate; callers see only file and rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(file: char, rank: u8) -> Result<Square, CoordError> {
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(CoordError::InvalidCoordinate(format!("{file}{rank}")));
        }
        Ok(Square {
            row: rank - 1,
            col: file as u8 - b'a',
        })
    }

    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank(self) -> u8 {
        self.row + 1
    }

    /// All 64 squares, a1, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    pub(crate) fn from_grid(row: usize, col: usize) -> Square {
        debug_assert!(row < 8 && col < 8, "grid index out of range: ({row}, {col})");
        Square {
            row: row as u8,
            col: col as u8,
        }
    }

    pub(crate) fn grid(self) -> (usize, usize) {
        (self.row as usize, self.col as usize)
    }
}

impl FromStr for Square {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Square, CoordError> {
        let invalid = || CoordError::InvalidCoordinate(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let rank = rank.to_digit(10).ok_or_else(invalid)? as u8;
        Square::new(file.to_ascii_lowercase(), rank).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Square {
    type Error = CoordError;

    fn try_from(s: String) -> Result<Square, CoordError> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Convert to UCI-style notation, e.g. "e2e4".
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse "e2e4". Surrounding whitespace is ignored.
    pub fn from_uci(s: &str) -> Result<Move, CoordError> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(CoordError::InvalidCoordinate(s.to_string()));
        }
        Ok(Move {
            from: s[..2].parse()?,
            to: s[2..].parse()?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Result of asking the board to play a move. Every variant except
/// `Accepted` leaves the board untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Accepted,
    EmptySquare,
    WrongTurn,
    NullMove,
    FriendlyCapture,
    IllegalShapeForRank(PieceType),
    GameAlreadyOver(Color),
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        self == MoveOutcome::Accepted
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Accepted => write!(f, "Move done."),
            MoveOutcome::EmptySquare => write!(f, "This square is empty."),
            MoveOutcome::WrongTurn => write!(f, "You cannot move your opponents pieces."),
            MoveOutcome::NullMove => write!(f, "You must move the piece."),
            MoveOutcome::FriendlyCapture => {
                write!(f, "You cannot move to a square with a piece of the same color.")
            }
            MoveOutcome::IllegalShapeForRank(pt) => write!(f, "{pt} is not allowed to do this move."),
            MoveOutcome::GameAlreadyOver(winner) => write!(f, "{winner} won. The game is over."),
        }
    }
}
