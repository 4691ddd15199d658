//! Line-oriented interface around the legality engine: set up a position,
//! attempt moves for the side to move and query check status.

use std::io::{self, BufRead};

use arbiter::chess::board::Board;
use arbiter::chess::core::{Move, Player};

fn main() {
    arbiter::print_engine_info();
    let mut board = Board::starting();
    let mut side_to_move = Player::White;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.unwrap();
        let input = line.trim();
        if let Some(placement) = input.strip_prefix("position ") {
            match Board::try_from(placement) {
                Ok(parsed) => {
                    board = parsed;
                    side_to_move = Player::White;
                },
                Err(e) => println!("Error reading the position: {e}"),
            }
        } else if let Some(squares) = input.strip_prefix("move ") {
            match Move::from_uci(squares.trim(), side_to_move) {
                Ok(m) => {
                    if board.apply_if_legal(m) {
                        println!("{m} played by {side_to_move}");
                        side_to_move = side_to_move.opponent();
                    } else {
                        println!("{m} is illegal for {side_to_move}");
                    }
                },
                Err(e) => println!("Error reading the move: {e}"),
            }
        } else if input == "check" {
            for player in [Player::White, Player::Black] {
                println!("{player} in check: {}", board.is_in_check(player));
            }
        } else if input == "d" {
            println!("{board:?}");
        } else if input == "quit" {
            break;
        }
    }
}
