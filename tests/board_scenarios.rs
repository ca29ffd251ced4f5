use chess_table::board::{Board, CellView};
use chess_table::moves::{MoveOutcome, Square};
use chess_table::piece::{Color, Piece, PieceType};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn put(board: &mut Board, s: &str, pt: PieceType, color: Color) {
    board.set_piece(sq(s), Some(Piece::new(pt, color)));
}

#[test]
fn render_shows_the_standard_start() {
    let grid = Board::new().render();
    let back = [
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
    ];
    for col in 0..8 {
        assert_eq!(grid[0][col], CellView::Occupied(Color::Black, back[col]), "rank 8");
        assert_eq!(grid[1][col], CellView::Occupied(Color::Black, PieceType::Pawn), "rank 7");
        assert_eq!(grid[6][col], CellView::Occupied(Color::White, PieceType::Pawn), "rank 2");
        assert_eq!(grid[7][col], CellView::Occupied(Color::White, back[col]), "rank 1");
        for row in 2..6 {
            assert_eq!(grid[row][col], CellView::Empty);
        }
    }
}

#[test]
fn scenario_pawn_openings() {
    let mut board = Board::new();
    assert_eq!(board.attempt_move(sq("e2"), sq("e4")), MoveOutcome::Accepted);
    assert_eq!(board.piece_at(sq("e4")), Some(Piece::new(PieceType::Pawn, Color::White)));
    assert_eq!(board.piece_at(sq("e2")), None);
    assert_eq!(board.turn(), Color::Black);

    assert_eq!(board.attempt_move(sq("e7"), sq("e5")), MoveOutcome::Accepted);
    assert_eq!(board.turn(), Color::White);
    assert_eq!(board.remaining(Color::White), 16);
    assert_eq!(board.remaining(Color::Black), 16);
}

#[test]
fn scenario_rook_onto_own_pawn() {
    let mut board = Board::new();
    assert_eq!(board.attempt_move(sq("a1"), sq("a2")), MoveOutcome::FriendlyCapture);
    assert_eq!(board, Board::new());
}

#[test]
fn scenario_knight_straight_line() {
    let mut board = Board::new();
    assert_eq!(
        board.attempt_move(sq("b1"), sq("b3")),
        MoveOutcome::IllegalShapeForRank(PieceType::Knight)
    );
    assert_eq!(board, Board::new());
}

#[test]
fn scenario_white_king_gone() {
    let mut board = Board::new();
    board.set_piece(sq("e1"), None);
    assert_eq!(board.winner(), Some(Color::Black));

    let before = board.clone();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("e4", "e5"), ("a1", "a1")] {
        assert_eq!(
            board.attempt_move(sq(from), sq(to)),
            MoveOutcome::GameAlreadyOver(Color::Black),
            "{from}-{to}"
        );
    }
    assert_eq!(board, before);
}

#[test]
fn pawn_diagonal_capture() {
    let mut board = Board::empty();
    put(&mut board, "e1", PieceType::King, Color::White);
    put(&mut board, "e8", PieceType::King, Color::Black);
    put(&mut board, "d4", PieceType::Pawn, Color::White);
    put(&mut board, "e5", PieceType::Pawn, Color::Black);
    let black_before = board.remaining(Color::Black);

    assert_eq!(board.attempt_move(sq("d4"), sq("e5")), MoveOutcome::Accepted);
    assert_eq!(board.remaining(Color::Black), black_before - 1);
    assert_eq!(board.remaining(Color::White), 2);
    assert_eq!(board.piece_at(sq("e5")), Some(Piece::new(PieceType::Pawn, Color::White)));
    assert_eq!(board.piece_at(sq("d4")), None);
    assert_eq!(board.turn(), Color::Black);
}

#[test]
fn rejection_order() {
    let mut board = Board::new();
    assert_eq!(board.attempt_move(sq("e4"), sq("e5")), MoveOutcome::EmptySquare);
    assert_eq!(board.attempt_move(sq("e7"), sq("e5")), MoveOutcome::WrongTurn);
    // Wrong turn is reported before a null move.
    assert_eq!(board.attempt_move(sq("e7"), sq("e7")), MoveOutcome::WrongTurn);
    assert_eq!(board.attempt_move(sq("e2"), sq("e2")), MoveOutcome::NullMove);
    assert_eq!(board, Board::new());
}

/// Every (from, to) pair from a few positions: rejected moves leave the board
/// exactly as it was, accepted ones flip the turn once and lower the
/// opponent's counter only on a capture.
#[test]
fn every_move_respects_the_state_invariants() {
    let mut positions = vec![Board::new()];
    let mut midgame = Board::new();
    for (from, to) in [("e2", "e4"), ("d7", "d5"), ("f1", "b5"), ("c8", "g4")] {
        assert!(midgame.attempt_move(sq(from), sq(to)).is_accepted());
    }
    positions.push(midgame);

    for start in positions {
        for from in Square::all() {
            for to in Square::all() {
                let mut board = start.clone();
                let mover = board.turn();
                let victim = board.piece_at(to);
                let outcome = board.attempt_move(from, to);

                if !outcome.is_accepted() {
                    assert_eq!(board, start, "{from}-{to} rejected as {outcome:?} but mutated");
                    continue;
                }

                assert_eq!(board.turn(), mover.opposite(), "{from}-{to}");
                assert_eq!(board.piece_at(to), start.piece_at(from));
                assert_eq!(board.piece_at(from), None);
                assert_eq!(board.remaining(mover), start.remaining(mover));
                let expected = start.remaining(mover.opposite()) - u8::from(victim.is_some());
                assert_eq!(board.remaining(mover.opposite()), expected, "{from}-{to}");
            }
        }
    }
}
