// =============================================================================
// Random opponent
//
// Enumerates every move the board would accept for the side to move and
// picks one at random. There is no search and no evaluation: the board only
// knows piece shapes, so "legal" here means "accepted by Board::check_move".
// =============================================================================

use log::debug;

use crate::board::Board;
use crate::moves::{Move, Square};

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

#[derive(Clone, Debug)]
pub struct PlayConfig {
    /// Only consider captures when at least one is available.
    pub prefer_captures: bool,
    /// Half-move cutoff for self-play games.
    pub max_moves: u32,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayConfig {
    pub fn new() -> Self {
        PlayConfig {
            prefer_captures: true,
            max_moves: 200,
        }
    }
}

/// All moves the side to move could play. Empty once the game is over.
pub fn candidate_moves(board: &Board) -> Vec<Move> {
    let own: Vec<Square> = Square::all()
        .filter(|&sq| board.piece_at(sq).is_some_and(|p| p.color == board.turn()))
        .collect();
    own.into_iter()
        .flat_map(|from| {
            board
                .legal_destinations(from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

pub fn pick_move(board: &Board, config: &PlayConfig) -> Option<Move> {
    let mut moves = candidate_moves(board);
    if moves.is_empty() {
        return None;
    }

    if config.prefer_captures {
        let captures: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|m| board.piece_at(m.to).is_some())
            .collect();
        if !captures.is_empty() {
            moves = captures;
        }
    }

    let index = (random_f64() * moves.len() as f64) as usize;
    let mv = moves[index.min(moves.len() - 1)];
    debug!("{} picks {} out of {} candidates", board.turn(), mv, moves.len());
    Some(mv)
}
