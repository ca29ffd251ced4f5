use std::io::{self, BufRead, Write};

use chess_table::board::Board;
use chess_table::engine::{pick_move, PlayConfig};
use chess_table::moves::{Move, Square};
use chess_table::piece::Color;

const HELP: &str = "\
Enter moves as \"e2 e4\" or \"e2e4\".
  moves <square>   list destinations for the piece on <square>
  new              start over
  quit             leave";

/// Parse "e2 e4" or "e2e4".
fn parse_move(line: &str) -> Option<Result<Move, String>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let parsed = match parts.as_slice() {
        [uci] => Move::from_uci(uci),
        [from, to] => from
            .parse::<Square>()
            .and_then(|f| to.parse::<Square>().map(|t| Move::new(f, t))),
        _ => return None,
    };
    Some(parsed.map_err(|e| e.to_string()))
}

fn main() -> io::Result<()> {
    env_logger::init();

    let vs_random = std::env::args().skip(1).any(|a| a == "--vs-random");
    let config = PlayConfig::new();

    let mut board = Board::new();
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    writeln!(out, "{HELP}\n\n{board}")?;

    loop {
        if let Some(winner) = board.winner() {
            writeln!(out, "{winner} won.")?;
        }
        write!(out, "{} to move> ", board.turn())?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            "new" => {
                board = Board::new();
                writeln!(out, "{board}")?;
                continue;
            }
            _ => {}
        }

        if let Some(arg) = line.strip_prefix("moves ") {
            match arg.trim().parse::<Square>() {
                Ok(from) => {
                    let targets: Vec<String> =
                        board.legal_destinations(from).iter().map(Square::to_string).collect();
                    writeln!(out, "{from}: {}", targets.join(" "))?;
                }
                Err(e) => writeln!(out, "{e}")?,
            }
            continue;
        }

        let mv = match parse_move(line) {
            Some(Ok(mv)) => mv,
            Some(Err(e)) => {
                writeln!(out, "{e}")?;
                continue;
            }
            None => {
                writeln!(out, "Unrecognised input. Type \"help\".")?;
                continue;
            }
        };

        let outcome = board.attempt_move(mv.from, mv.to);
        writeln!(out, "{outcome}")?;
        if !outcome.is_accepted() {
            continue;
        }

        if vs_random && board.turn() == Color::Black {
            if let Some(reply) = pick_move(&board, &config) {
                let outcome = board.attempt_move(reply.from, reply.to);
                writeln!(out, "Black plays {reply}: {outcome}")?;
            }
        }
        writeln!(out, "{board}")?;
    }

    Ok(())
}
