use arbiter::chess::board::Board;
use arbiter::chess::core::{Move, Piece, PieceKind, Player, Square};
use pretty_assertions::assert_eq;

fn setup(placement: &str) -> Board {
    let board = Board::try_from(placement);
    assert!(board.is_ok(), "input: {placement}");
    let board = board.unwrap();
    assert_eq!(board.to_string(), placement);
    board
}

fn white(from: Square, to: Square) -> Move {
    Move::new(from, to, Player::White)
}

fn black(from: Square, to: Square) -> Move {
    Move::new(from, to, Player::Black)
}

#[test]
fn null_moves() {
    let board = Board::starting();
    // Occupied or not, no piece can stay in place, for either player.
    for square in [Square::E2, Square::E4, Square::E7, Square::A1] {
        assert!(!board.is_valid_move(white(square, square)));
        assert!(!board.is_valid_move(black(square, square)));
    }
}

#[test]
fn only_own_pieces_move() {
    let board = Board::starting();
    // Black does not get to push White's pawn and vice versa.
    assert!(!board.is_valid_move(black(Square::E2, Square::E3)));
    assert!(!board.is_valid_move(white(Square::E7, Square::E6)));
    // Nobody moves from an empty square.
    assert!(!board.is_valid_move(white(Square::E4, Square::E5)));
    assert!(!board.is_valid_move(black(Square::E4, Square::E5)));
}

#[test]
fn knight_shape() {
    let board = setup("8/8/8/8/3N4/8/8/8");
    for to in [
        Square::B3,
        Square::B5,
        Square::C2,
        Square::C6,
        Square::E2,
        Square::E6,
        Square::F3,
        Square::F5,
    ] {
        assert!(
            board.is_valid_move(white(Square::D4, to)),
            "d4{to} should be a legal knight move"
        );
    }
    for to in [
        Square::D5,
        Square::E5,
        Square::D6,
        Square::F6,
        Square::B2,
        Square::H8,
        Square::D8,
        Square::A4,
    ] {
        assert!(
            !board.is_valid_move(white(Square::D4, to)),
            "d4{to} should not be a legal knight move"
        );
    }
}

#[test]
fn king_shape() {
    let board = setup("8/8/8/8/4K3/8/8/8");
    for to in [
        Square::D3,
        Square::D4,
        Square::D5,
        Square::E3,
        Square::E5,
        Square::F3,
        Square::F4,
        Square::F5,
    ] {
        assert!(board.is_valid_move(white(Square::E4, to)));
    }
    for to in [Square::E6, Square::G6, Square::G5, Square::C4] {
        assert!(!board.is_valid_move(white(Square::E4, to)));
    }
}

#[test]
fn pawn_direction() {
    let board = setup("8/8/8/8/8/8/4P3/8");
    assert!(board.is_valid_move(white(Square::E2, Square::E3)));
    // Backwards, sideways, diagonally or two squares at once: all illegal.
    assert!(!board.is_valid_move(white(Square::E2, Square::E1)));
    assert!(!board.is_valid_move(white(Square::E2, Square::D2)));
    assert!(!board.is_valid_move(white(Square::E2, Square::D3)));
    assert!(!board.is_valid_move(white(Square::E2, Square::F3)));
    assert!(!board.is_valid_move(white(Square::E2, Square::E4)));

    let board = setup("8/4p3/8/8/8/8/8/8");
    assert!(board.is_valid_move(black(Square::E7, Square::E6)));
    assert!(!board.is_valid_move(black(Square::E7, Square::E8)));
    assert!(!board.is_valid_move(black(Square::E7, Square::D6)));
    assert!(!board.is_valid_move(black(Square::E7, Square::E5)));
}

#[test]
fn sliding_shapes_ignore_blockers() {
    let board = Board::starting();
    // Intervening pieces are not modeled: the queen slides right through the
    // pawn chain, the rook through its own pawn.
    assert!(board.is_valid_move(white(Square::D1, Square::H5)));
    assert!(board.is_valid_move(white(Square::A1, Square::A4)));
    assert!(board.is_valid_move(white(Square::C1, Square::G5)));
    assert!(board.is_valid_move(black(Square::D8, Square::D5)));
    // The shapes themselves are still enforced.
    assert!(!board.is_valid_move(white(Square::D1, Square::E3)));
    assert!(!board.is_valid_move(white(Square::A1, Square::B2)));
    assert!(!board.is_valid_move(white(Square::C1, Square::C3)));
}

#[test]
fn destination_occupancy_ignored() {
    let mut board = Board::starting();
    // Moving the queen onto its own pawn is legal: captures are not modeled
    // and the destination occupant is simply overwritten.
    assert!(board.apply_if_legal(white(Square::D1, Square::D2)));
    assert_eq!(
        board.to_string(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPQPPPP/RNB1KBNR"
    );
}

#[test]
fn illegal_move_leaves_board_unchanged() {
    let mut board = Board::starting();
    let before = board.to_string();
    assert!(!board.apply_if_legal(white(Square::E2, Square::E5)));
    assert!(!board.apply_if_legal(white(Square::E7, Square::E6)));
    assert!(!board.apply_if_legal(black(Square::B8, Square::B6)));
    assert_eq!(board.to_string(), before);
    assert!(board.history().is_empty());
}

#[test]
fn legal_move_relocates_piece() {
    let mut board = Board::starting();
    assert!(board.apply_if_legal(white(Square::E2, Square::E3)));
    assert_eq!(board.piece_at(Square::E2), None);
    assert_eq!(
        board.piece_at(Square::E3),
        Some(Piece {
            owner: Player::White,
            kind: PieceKind::Pawn,
        })
    );
    assert_eq!(
        board.to_string(),
        "rnbqkbnr/pppppppp/8/8/8/4P3/PPPP1PPP/RNBQKBNR"
    );
    // Move application does not maintain the log.
    assert!(board.history().is_empty());
}

#[test]
fn king_can_not_step_into_a_rook_line() {
    // Black rook on b8 does not attack a1, but covers the whole b-file and
    // the b8-h2 diagonal.
    let board = setup("1r6/8/8/8/8/8/8/K7");
    assert!(!board.is_in_check(Player::White));
    assert!(board.is_valid_move(white(Square::A1, Square::A2)));
    assert!(!board.is_valid_move(white(Square::A1, Square::B1)));
    assert!(!board.is_valid_move(white(Square::A1, Square::B2)));
}

#[test]
fn king_can_not_step_onto_a_knight_target() {
    let board = setup("8/8/8/8/5n2/8/8/3K4");
    // f4 covers e2: the king may not walk there, while c1 and e1 are safe.
    assert!(!board.is_valid_move(white(Square::D1, Square::E2)));
    assert!(board.is_valid_move(white(Square::D1, Square::C1)));
    assert!(board.is_valid_move(white(Square::D1, Square::E1)));
}

#[test]
fn moves_that_do_not_resolve_a_check_are_illegal() {
    // White is already in check from the e8 rook; shuffling the a1 rook does
    // not help, the king has to step off the e-file.
    let board = setup("4r3/8/8/8/8/8/4K3/R7");
    assert!(board.is_in_check(Player::White));
    assert!(!board.is_valid_move(white(Square::A1, Square::A3)));
    assert!(!board.is_valid_move(white(Square::E2, Square::E3)));
    assert!(board.is_valid_move(white(Square::E2, Square::D2)));
    assert!(board.is_valid_move(white(Square::E2, Square::F3)));
}

#[test]
fn no_check_in_starting_position() {
    let board = Board::starting();
    assert!(!board.is_in_check(Player::White));
    assert!(!board.is_in_check(Player::Black));
}

#[test]
fn rook_checks_along_the_file() {
    let board = setup("4k3/8/8/8/8/8/4R3/4K3");
    assert!(board.is_in_check(Player::Black));
    assert!(!board.is_in_check(Player::White));
}

#[test]
fn bishop_checks_through_blockers() {
    // The b5 pawn sits on the a4-e8 diagonal but does not block the attack:
    // intervening pieces are not modeled.
    let board = setup("4k3/8/8/1p6/B7/8/8/4K3");
    assert!(board.is_in_check(Player::Black));
    assert!(!board.is_in_check(Player::White));
}

#[test]
fn pawn_checks_straight_ahead() {
    // Pawns attack the square straight in front of them: diagonal captures
    // are not modeled.
    let board = setup("4k3/4P3/8/8/8/8/8/4K3");
    assert!(board.is_in_check(Player::Black));
    assert!(!board.is_in_check(Player::White));
}

#[test]
fn kings_do_not_attack_each_other() {
    // Kings are never collected as attackers, so two adjacent kings do not
    // check each other.
    let board = setup("8/8/8/8/8/8/4k3/4K3");
    assert!(!board.is_in_check(Player::White));
    assert!(!board.is_in_check(Player::Black));
}

#[test]
fn no_king_means_no_check() {
    let board = setup("8/8/8/8/8/8/8/R7");
    assert!(!board.is_in_check(Player::White));
    assert!(!board.is_in_check(Player::Black));
}

#[test]
fn simulation_does_not_mutate_the_live_board() {
    let board = setup("1r6/8/8/8/8/8/8/K7");
    let before = board.to_string();
    // A rejected move runs the full simulation path; the live board must not
    // change in the process.
    assert!(!board.is_valid_move(white(Square::A1, Square::B1)));
    assert!(board.is_valid_move(white(Square::A1, Square::A2)));
    assert_eq!(board.to_string(), before);
    assert!(board.history().is_empty());
}
