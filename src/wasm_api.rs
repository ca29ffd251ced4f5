use crate::board::{Board, CellView};
use crate::engine::{pick_move, PlayConfig};
use crate::moves::{MoveOutcome, Square};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    piece_type: String,
    color: String,
    label: String,
}

#[derive(Serialize)]
struct BoardState {
    /// Rank 8 first, file a leftmost.
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    game_over: bool,
    winner: Option<String>,
    remaining_white: u8,
    remaining_black: u8,
}

#[derive(Serialize)]
struct MoveResult {
    outcome: Option<MoveOutcome>,
    message: String,
    #[serde(flatten)]
    board_state: BoardState,
}

fn build_board_state(board: &Board) -> BoardState {
    let squares = board
        .render()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match *cell {
                    CellView::Empty => None,
                    CellView::Occupied(color, pt) => Some(SquarePiece {
                        piece_type: pt.to_string(),
                        color: color.to_string(),
                        label: cell.label().unwrap_or_default(),
                    }),
                })
                .collect()
        })
        .collect();

    BoardState {
        squares,
        current_turn: board.turn().to_string(),
        game_over: board.is_game_over(),
        winner: board.winner().map(|c| c.to_string()),
        remaining_white: board.remaining(crate::piece::Color::White),
        remaining_black: board.remaining(crate::piece::Color::Black),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct Game {
    board: Board,
    config: PlayConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            config: PlayConfig::new(),
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
    }

    pub fn set_prefer_captures(&mut self, enabled: bool) {
        self.config.prefer_captures = enabled;
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&build_board_state(&self.board))
    }

    /// Play `from`-`to`, both in algebraic form ("e2", "e4").
    pub fn make_move(&mut self, from: &str, to: &str) -> JsValue {
        let result = match self.board.attempt_move_str(from, to) {
            Ok(outcome) => MoveResult {
                outcome: Some(outcome),
                message: outcome.to_string(),
                board_state: build_board_state(&self.board),
            },
            Err(err) => MoveResult {
                outcome: None,
                message: err.to_string(),
                board_state: build_board_state(&self.board),
            },
        };
        to_js(&result)
    }

    pub fn make_random_move(&mut self) -> JsValue {
        let outcome = pick_move(&self.board, &self.config)
            .map(|mv| self.board.attempt_move(mv.from, mv.to));
        let message = match outcome {
            Some(outcome) => outcome.to_string(),
            None => "No move available.".to_string(),
        };
        to_js(&MoveResult {
            outcome,
            message,
            board_state: build_board_state(&self.board),
        })
    }

    /// Destinations for the piece on `square`, as algebraic strings.
    pub fn get_legal_moves_for_square(&self, square: &str) -> JsValue {
        let targets: Vec<String> = match square.parse::<Square>() {
            Ok(from) => self
                .board
                .legal_destinations(from)
                .iter()
                .map(Square::to_string)
                .collect(),
            Err(_) => Vec::new(),
        };
        to_js(&targets)
    }
}
