use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-side arrays: White=0, Black=1.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Single-letter prefix used in cell labels.
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece rank. Discriminants are the magnitudes of the signed board codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn = 1,
    Rook = 2,
    Knight = 3,
    Bishop = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Rook => "Rook",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        }
    }

    fn from_magnitude(magnitude: u8) -> Option<PieceType> {
        match magnitude {
            1 => Some(PieceType::Pawn),
            2 => Some(PieceType::Rook),
            3 => Some(PieceType::Knight),
            4 => Some(PieceType::Bishop),
            5 => Some(PieceType::Queen),
            6 => Some(PieceType::King),
            _ => None,
        }
    }

    /// Geometric legality of a move for this rank, ignoring occupancy.
    ///
    /// Coordinates are zero-based `(row, col)` grid indices; row 0 is rank 1.
    /// The pawn rule covers forward advances only. Diagonal pawn captures are
    /// decided by the board, which knows what stands on the destination.
    pub fn is_legal_shape(self, start: (usize, usize), end: (usize, usize), color: Color) -> bool {
        let dr = end.0 as i32 - start.0 as i32;
        let dc = end.1 as i32 - start.1 as i32;
        match self {
            PieceType::Pawn => pawn_advance(start.0, dr, dc, color),
            PieceType::Rook => rook_line(dr, dc),
            PieceType::Knight => {
                (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
            }
            PieceType::Bishop => bishop_diagonal(dr, dc),
            PieceType::Queen => rook_line(dr, dc) || bishop_diagonal(dr, dc),
            PieceType::King => dr.abs() <= 1 && dc.abs() <= 1,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn rook_line(dr: i32, dc: i32) -> bool {
    dr == 0 || dc == 0
}

fn bishop_diagonal(dr: i32, dc: i32) -> bool {
    dr.abs() == dc.abs()
}

fn pawn_advance(start_row: usize, dr: i32, dc: i32, color: Color) -> bool {
    if dc != 0 {
        return false;
    }
    let home_row = match color {
        Color::White => 1,
        Color::Black => 6,
    };
    let steps = dr * color.forward();
    steps == 1 || (steps == 2 && start_row == home_row)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Signed board code: magnitude is the rank, sign the color.
    pub fn code(self) -> i8 {
        self.piece_type as i8 * self.color.sign()
    }

    /// Decode a board code. Zero (an empty square) and out-of-range codes give `None`.
    pub fn from_code(code: i8) -> Option<Piece> {
        let color = match code.signum() {
            1 => Color::White,
            -1 => Color::Black,
            _ => return None,
        };
        PieceType::from_magnitude(code.unsigned_abs()).map(|pt| Piece::new(pt, color))
    }

    /// Label such as "WPawn" or "BKing".
    pub fn label(self) -> String {
        format!("{}{}", self.color.letter(), self.piece_type.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_decode_to_color_and_rank() {
        assert_eq!(Piece::from_code(0), None);
        assert_eq!(Piece::from_code(7), None);
        assert_eq!(Piece::from_code(1), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(Piece::from_code(-6), Some(Piece::new(PieceType::King, Color::Black)));
        for pt in PieceType::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(pt, color);
                assert_eq!(Piece::from_code(piece.code()), Some(piece));
            }
        }
        assert_eq!(Piece::new(PieceType::Queen, Color::Black).code(), -5);
    }

    #[test]
    fn rook_moves_along_lines_only() {
        let rook = PieceType::Rook;
        assert!(rook.is_legal_shape((0, 0), (7, 0), Color::White));
        assert!(rook.is_legal_shape((3, 3), (3, 0), Color::Black));
        assert!(!rook.is_legal_shape((0, 0), (1, 1), Color::White));
    }

    #[test]
    fn bishop_and_queen_geometry() {
        assert!(PieceType::Bishop.is_legal_shape((0, 2), (5, 7), Color::White));
        assert!(!PieceType::Bishop.is_legal_shape((0, 2), (2, 2), Color::White));
        assert!(PieceType::Queen.is_legal_shape((0, 3), (4, 7), Color::White));
        assert!(PieceType::Queen.is_legal_shape((0, 3), (6, 3), Color::White));
        assert!(!PieceType::Queen.is_legal_shape((0, 3), (2, 4), Color::White));
    }

    #[test]
    fn knight_needs_an_l_shape() {
        let knight = PieceType::Knight;
        assert!(knight.is_legal_shape((0, 1), (2, 2), Color::White));
        assert!(knight.is_legal_shape((0, 1), (1, 3), Color::White));
        assert!(!knight.is_legal_shape((0, 1), (2, 1), Color::White), "b1-b3 is not an L");
        assert!(!knight.is_legal_shape((0, 1), (2, 3), Color::White));
    }

    #[test]
    fn king_steps_one_square() {
        let king = PieceType::King;
        assert!(king.is_legal_shape((0, 4), (1, 5), Color::White));
        assert!(king.is_legal_shape((7, 4), (7, 3), Color::Black));
        assert!(!king.is_legal_shape((0, 4), (2, 4), Color::White));
    }

    #[test]
    fn pawn_advances_forward_only() {
        let pawn = PieceType::Pawn;
        assert!(pawn.is_legal_shape((1, 4), (2, 4), Color::White));
        assert!(pawn.is_legal_shape((1, 4), (3, 4), Color::White), "double step from home row");
        assert!(!pawn.is_legal_shape((2, 4), (4, 4), Color::White), "double step off home row");
        assert!(!pawn.is_legal_shape((1, 4), (0, 4), Color::White), "backwards");
        assert!(!pawn.is_legal_shape((1, 4), (4, 4), Color::White));
        assert!(!pawn.is_legal_shape((1, 4), (2, 5), Color::White), "diagonal is not an advance");

        assert!(pawn.is_legal_shape((6, 4), (5, 4), Color::Black));
        assert!(pawn.is_legal_shape((6, 4), (4, 4), Color::Black));
        assert!(!pawn.is_legal_shape((5, 4), (3, 4), Color::Black));
        assert!(!pawn.is_legal_shape((6, 4), (7, 4), Color::Black));
    }
}
