use chess_table::board::Board;
use chess_table::engine::{pick_move, PlayConfig};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut config = PlayConfig::new();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(n) => config.max_moves = n,
            Err(_) => {
                eprintln!("usage: selfplay [max_moves]");
                std::process::exit(2);
            }
        }
    }

    let mut board = Board::new();
    let mut move_count = 0;

    while !board.is_game_over() && move_count < config.max_moves {
        match pick_move(&board, &config) {
            Some(mv) => {
                let outcome = board.attempt_move(mv.from, mv.to);
                debug_assert!(outcome.is_accepted(), "engine picked {mv}, board said {outcome:?}");
                move_count += 1;
                log::debug!("{move_count}. {}", mv.to_uci());
            }
            None => break,
        }
    }

    let result = match board.winner() {
        Some(color) => format!("{color} wins"),
        None => "unfinished".to_string(),
    };
    eprintln!("Game over after {move_count} moves: {result}");
    eprintln!("{board}");

    let record = serde_json::to_string_pretty(&board)?;
    println!("{record}");
    Ok(())
}
