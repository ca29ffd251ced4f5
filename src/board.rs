use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::moves::{CoordError, MoveOutcome, Square};
use crate::piece::{Color, Piece, PieceType};

/// Back rank from file a to file h.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// What the presentation layer sees in one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Empty,
    Occupied(Color, PieceType),
}

impl CellView {
    /// Label such as "WKnight"; `None` for an empty cell.
    pub fn label(&self) -> Option<String> {
        match *self {
            CellView::Empty => None,
            CellView::Occupied(color, pt) => Some(Piece::new(pt, color).label()),
        }
    }
}

/// Authoritative state of one game.
///
/// Squares hold signed codes (see [`Piece::code`]): positive is White,
/// negative is Black, zero is empty. Row 0 is rank 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    squares: [[i8; 8]; 8],
    current_turn: Color,
    remaining: [u8; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("square {square} holds unknown piece code {code}")]
    BadCode { square: Square, code: i8 },
    #[error("{color} counter is {count}, expected {on_board}..=16")]
    BadCounter { color: Color, count: u8, on_board: u8 },
}

/// Serialized form of a [`Board`], checked before it becomes one.
#[derive(Deserialize)]
pub struct BoardRecord {
    squares: [[i8; 8]; 8],
    current_turn: Color,
    remaining: [u8; 2],
}

impl TryFrom<BoardRecord> for Board {
    type Error = RecordError;

    fn try_from(record: BoardRecord) -> Result<Board, RecordError> {
        let mut on_board = [0u8; 2];
        for (row, codes) in record.squares.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let piece = Piece::from_code(code).ok_or(RecordError::BadCode {
                    square: Square::from_grid(row, col),
                    code,
                })?;
                on_board[piece.color.index()] += 1;
            }
        }
        for color in [Color::White, Color::Black] {
            let count = record.remaining[color.index()];
            let placed = on_board[color.index()];
            if count < placed || count > 16 {
                return Err(RecordError::BadCounter {
                    color,
                    count,
                    on_board: placed,
                });
            }
        }
        Ok(Board {
            squares: record.squares,
            current_turn: record.current_turn,
            remaining: record.remaining,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[0; 8]; 8],
            current_turn: Color::White,
            remaining: [0, 0],
        }
    }

    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Piece::new(pt, Color::White).code();
            board.squares[1][col] = Piece::new(PieceType::Pawn, Color::White).code();
            board.squares[6][col] = Piece::new(PieceType::Pawn, Color::Black).code();
            board.squares[7][col] = Piece::new(pt, Color::Black).code();
        }
        board.recount();
        board
    }

    pub fn turn(&self) -> Color {
        self.current_turn
    }

    /// Pieces `color` still has. Only captures lower this during play.
    pub fn remaining(&self, color: Color) -> u8 {
        self.remaining[color.index()]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let (r, c) = square.grid();
        Piece::from_code(self.squares[r][c])
    }

    /// Place or clear a piece while setting up a position. The remaining
    /// counters are recomputed from the grid.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        let (r, c) = square.grid();
        self.squares[r][c] = piece.map_or(0, Piece::code);
        self.recount();
    }

    pub fn set_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    fn recount(&mut self) {
        self.remaining = [0, 0];
        for piece in self.squares.iter().flatten().filter_map(|&code| Piece::from_code(code)) {
            self.remaining[piece.color.index()] += 1;
        }
    }

    fn has_king(&self, color: Color) -> bool {
        let king = Piece::new(PieceType::King, color).code();
        self.squares.iter().flatten().any(|&code| code == king)
    }

    /// The winner, once a side has no King left on the board.
    pub fn winner(&self) -> Option<Color> {
        if !self.has_king(Color::White) {
            Some(Color::Black)
        } else if !self.has_king(Color::Black) {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Snapshot for display, rank 8 first and file a leftmost.
    pub fn render(&self) -> [[CellView; 8]; 8] {
        let mut grid = [[CellView::Empty; 8]; 8];
        for (i, out_row) in grid.iter_mut().enumerate() {
            let row = 7 - i;
            for (col, cell) in out_row.iter_mut().enumerate() {
                if let Some(p) = Piece::from_code(self.squares[row][col]) {
                    *cell = CellView::Occupied(p.color, p.piece_type);
                }
            }
        }
        grid
    }

    /// Run every rule against a move without playing it.
    pub fn check_move(&self, from: Square, to: Square) -> MoveOutcome {
        if let Some(winner) = self.winner() {
            return MoveOutcome::GameAlreadyOver(winner);
        }

        let start = from.grid();
        let end = to.grid();
        let Some(piece) = Piece::from_code(self.squares[start.0][start.1]) else {
            return MoveOutcome::EmptySquare;
        };
        if piece.color != self.current_turn {
            return MoveOutcome::WrongTurn;
        }
        if from == to {
            return MoveOutcome::NullMove;
        }

        let target = Piece::from_code(self.squares[end.0][end.1]);
        if target.is_some_and(|t| t.color == piece.color) {
            return MoveOutcome::FriendlyCapture;
        }

        // Pawns capture diagonally and advance straight; an occupied
        // destination leaves only the capture path.
        let legal = match (piece.piece_type, target) {
            (PieceType::Pawn, Some(_)) => is_pawn_capture(start, end, piece.color),
            (pt, _) => pt.is_legal_shape(start, end, piece.color),
        };
        if !legal {
            return MoveOutcome::IllegalShapeForRank(piece.piece_type);
        }

        MoveOutcome::Accepted
    }

    /// Validate and, if accepted, play a move. Rejected moves change nothing.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        let outcome = self.check_move(from, to);
        if outcome.is_accepted() {
            self.apply(from, to);
        } else {
            debug!("rejected {from}-{to}: {outcome:?}");
        }
        outcome
    }

    /// [`Board::attempt_move`] over algebraic text. Bad coordinates fail
    /// before any rule is consulted.
    pub fn attempt_move_str(&mut self, from: &str, to: &str) -> Result<MoveOutcome, CoordError> {
        let from: Square = from.parse()?;
        let to: Square = to.parse()?;
        Ok(self.attempt_move(from, to))
    }

    /// Every square the piece on `from` may move to this turn.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        Square::all()
            .filter(|&to| self.check_move(from, to).is_accepted())
            .collect()
    }

    fn apply(&mut self, from: Square, to: Square) {
        let (fr, fc) = from.grid();
        let (tr, tc) = to.grid();
        let mover = self.squares[fr][fc];
        let captured = Piece::from_code(self.squares[tr][tc]);

        self.squares[tr][tc] = mover;
        self.squares[fr][fc] = 0;

        if let Some(victim) = captured {
            let left = &mut self.remaining[victim.color.index()];
            *left = left.saturating_sub(1);
            if victim.piece_type == PieceType::King {
                info!("{} King captured on {to}; {} wins", victim.color, self.current_turn);
            }
        }
        debug!(
            "{} played {from}-{to}{}",
            self.current_turn,
            captured.map_or(String::new(), |p| format!(" capturing {}", p.label()))
        );

        self.current_turn = self.current_turn.opposite();
    }
}

/// Single diagonal step forward onto an occupied square.
fn is_pawn_capture(start: (usize, usize), end: (usize, usize), color: Color) -> bool {
    let dr = end.0 as i32 - start.0 as i32;
    let dc = end.1 as i32 - start.1 as i32;
    dc.abs() == 1 && dr == color.forward()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.render().iter().enumerate() {
            let mut line = format!("{} ", 8 - i);
            for cell in row {
                let label = cell.label().unwrap_or_else(|| ".".to_string());
                line.push_str(&format!("{label:<8}"));
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        let files: String = ('a'..='h').map(|file| format!("{file:<8}")).collect();
        write!(f, "  {}", files.trim_end())
    }
}
