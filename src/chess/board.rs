//! Provides the [`Board`]: an 8x8 grid of pieces plus a move log, answering
//! single-move legality and check queries.
//!
//! Legality combines per-piece [movement shape] rules with the self-check
//! constraint: a move is illegal if it would leave the mover's own king
//! attacked. The latter is decided by simulating the candidate move on an
//! independent copy of the board and re-running check detection there, so a
//! failed or exploratory query has no observable effect on the live game
//! state.
//!
//! Path-blocking for sliding pieces, captures, castling, en passant and
//! two-square pawn advances are not modeled.
//!
//! [movement shape]: https://www.chessprogramming.org/Pieces

use std::fmt::{self, Write};

use anyhow::bail;
use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::core::{
    Delta,
    File,
    Move,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};

/// Piece kinds on each back rank in the standard starting position, from
/// [`File::A`] to [`File::H`].
const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// State of the game: the piece grid and the log of applied moves.
///
/// The grid is indexed by rank, then file. Each [`Board`] owns its grid and
/// history outright; [`Clone`] produces a fully independent duplicate with no
/// shared storage, which is what the self-check simulation runs on.
///
/// The engine assumes (but does not enforce) that each player has exactly one
/// king on the grid: that invariant holds for every position reachable from
/// [`Board::starting`] through [`Board::apply_if_legal`]. When a king is
/// missing, check detection reports no check instead of failing.
#[derive(Clone)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
    history: Vec<Move>,
}

impl Board {
    /// Creates a board with the standard starting position and an empty move
    /// log.
    ///
    /// ```
    /// use arbiter::chess::board::Board;
    ///
    /// assert_eq!(
    ///     &Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            let backrank = Rank::backrank(player);
            let pawns = Rank::pawns_starting(player);
            for (file, kind) in File::iter().zip(BACKRANK) {
                board.set_piece_at(
                    Square::new(file, backrank),
                    Some(Piece {
                        owner: player,
                        kind,
                    }),
                );
            }
            for file in File::iter() {
                board.set_piece_at(
                    Square::new(file, pawns),
                    Some(Piece {
                        owner: player,
                        kind: PieceKind::Pawn,
                    }),
                );
            }
        }
        board
    }

    // Creates a board with no pieces, to be filled by the parser.
    fn empty() -> Self {
        Self {
            grid: [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
            history: Vec::new(),
        }
    }

    /// Parses a board from the piece placement field of [Forsyth-Edwards
    /// Notation]: 8 ranks from rank 8 to rank 1 separated by '/', where a
    /// digit encodes a run of empty squares and a letter a piece (uppercase
    /// for White, lowercase for Black).
    ///
    /// The resulting board has an empty move log. King presence is not
    /// validated: the caller is responsible for providing a position that
    /// makes sense for the queries it is going to run.
    ///
    /// NOTE: This expects properly-formatted input: no extra symbols or
    /// surrounding whitespace. Use [`Board::try_from`] for cleaning up the
    /// input if it is coming from an untrusted source.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] on malformed input: wrong number of ranks,
    /// a rank that does not cover exactly 8 squares or an unknown symbol.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(input: &str) -> anyhow::Result<Self> {
        let mut board = Self::empty();
        let mut rank_id = BOARD_WIDTH;
        for rank_input in input.split('/') {
            if rank_id == 0 {
                bail!("incorrect placement: expected 8 ranks, got {input}");
            }
            rank_id -= 1;
            let rank = Rank::try_from(rank_id)?;
            let mut file: u8 = 0;
            for symbol in rank_input.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect placement: rank {rank_input} exceeds {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' => bail!("incorrect placement: empty square run can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                board.set_piece_at(Square::new(file.try_into()?, rank), Some(piece));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect placement: rank should cover exactly {BOARD_WIDTH} squares, got \
                     {rank_input}"
                );
            }
        }
        if rank_id != 0 {
            bail!("incorrect placement: expected 8 ranks, got {input}");
        }
        Ok(board)
    }

    /// Returns the piece occupying the given square, `None` for an empty one.
    #[must_use]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    // The only way to mutate a single square. Not exposed: all external
    // mutation goes through move application.
    fn set_piece_at(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Returns the log of moves applied to this board, in chronological
    /// order.
    // TODO: Record applied moves here once move application starts
    // maintaining the log.
    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns whether the move is legal in the current position: its shape
    /// matches the moving piece's rules and applying it would not leave the
    /// mover's own king attacked.
    ///
    /// Any rule violation results in `false`; this never fails.
    #[must_use]
    pub fn is_valid_move(&self, m: Move) -> bool {
        self.is_shape_legal(m) && !self.would_leave_king_attacked(m, m.player)
    }

    // Steps 1-4 of the legality check: no null moves, the origin piece must
    // belong to the moving player and the move's delta must match the piece
    // kind's shape rule. Destination occupancy and intervening pieces are
    // ignored.
    fn is_shape_legal(&self, m: Move) -> bool {
        if m.from == m.to {
            return false;
        }
        let piece = match self.piece_at(m.from) {
            Some(piece) => piece,
            // Nobody can move from an empty square.
            None => return false,
        };
        if piece.owner != m.player {
            return false;
        }
        let delta = Delta::between(m.from, m.to);
        match piece.kind {
            // A single-square step in any direction.
            // TODO: Take castling into account.
            PieceKind::King => matches!((delta.files, delta.ranks), (1, 1) | (0, 1) | (1, 0)),
            // A single non-capturing step straight ahead. Two-square
            // advances, diagonal captures and en passant are not modeled.
            PieceKind::Pawn => {
                if delta.files != 0 || delta.ranks != 1 {
                    return false;
                }
                // A pawn may never move toward its own back rank.
                match m.player {
                    Player::White => m.to.rank() > m.from.rank(),
                    Player::Black => m.to.rank() < m.from.rank(),
                }
            },
            PieceKind::Queen => {
                delta.files == delta.ranks || delta.files == 0 || delta.ranks == 0
            },
            PieceKind::Rook => delta.files == 0 || delta.ranks == 0,
            PieceKind::Bishop => delta.files == delta.ranks,
            PieceKind::Knight => matches!((delta.files, delta.ranks), (2, 1) | (1, 2)),
        }
    }

    // Simulates the candidate move on an independent copy of the board and
    // reports whether the given player's king is attacked in the resulting
    // position. The live board is untouched; the copy is discarded.
    fn would_leave_king_attacked(&self, m: Move, player: Player) -> bool {
        let mut hypothetical = self.clone();
        hypothetical.apply_unconditionally(m);
        hypothetical.is_in_check(player)
    }

    /// Validates the move and, if it is legal, applies it. Returns whether
    /// the move was applied; an illegal move leaves the board unchanged.
    pub fn apply_if_legal(&mut self, m: Move) -> bool {
        if !self.is_valid_move(m) {
            return false;
        }
        self.apply_unconditionally(m);
        true
    }

    /// Relocates the piece at the move's origin to its destination without
    /// any legality checking, overwriting whatever occupied the destination
    /// and clearing the origin.
    ///
    /// This is the mutation-only half of move application: it exists
    /// separately from [`Board::apply_if_legal`] so that the self-check
    /// simulation can apply a hypothetical move without recursing back into
    /// validation. Callers holding a move that is already known to be legal
    /// can use it to skip re-validation.
    pub fn apply_unconditionally(&mut self, m: Move) {
        let moving = self.piece_at(m.from);
        self.set_piece_at(m.to, moving);
        self.set_piece_at(m.from, None);
    }

    /// Returns whether the given player's king is attacked in the current
    /// position, i.e. whether any piece has a shape-legal move onto the
    /// king's square.
    ///
    /// Only the shape rules are consulted for the attackers (intervening
    /// pieces do not block an attack), and kings are never collected as
    /// attackers. If the player has no king on the grid, there is nothing to
    /// attack and the result is `false`.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        let mut piece_squares = ArrayVec::<Square, { BOARD_SIZE as usize }>::new();
        let mut king_square = None;
        for square in Square::iter() {
            match self.piece_at(square) {
                Some(piece) if piece.kind == PieceKind::King => {
                    if piece.owner == player {
                        king_square = Some(square);
                    }
                },
                Some(_) => piece_squares.push(square),
                None => (),
            }
        }
        let Some(king_square) = king_square else {
            return false;
        };
        // Shape-only legality: testing full move legality here would recurse
        // back into the self-check simulation.
        piece_squares
            .iter()
            .any(|&from| self.is_shape_legal(Move::new(from, king_square, player.opponent())))
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Cleans up the input (strips surrounding whitespace) and parses it as a
    /// piece placement field, see [`Board::from_placement`].
    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_placement(input.trim())
    }
}

impl fmt::Display for Board {
    /// Prints the board as the piece placement field of FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0;
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                write!(f, "{RANK_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for an empty square, FEN
    /// algebraic symbol for a piece) a-la Stockfish "debug" command in UCI
    /// mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn starting_layout() {
        let board = Board::starting();
        // Spot-check the corners and the royal couple.
        assert_eq!(
            board.piece_at(Square::A1),
            Some(Piece {
                owner: Player::White,
                kind: PieceKind::Rook,
            })
        );
        assert_eq!(
            board.piece_at(Square::E1),
            Some(Piece {
                owner: Player::White,
                kind: PieceKind::King,
            })
        );
        assert_eq!(
            board.piece_at(Square::D8),
            Some(Piece {
                owner: Player::Black,
                kind: PieceKind::Queen,
            })
        );
        assert_eq!(
            board.piece_at(Square::H8),
            Some(Piece {
                owner: Player::Black,
                kind: PieceKind::Rook,
            })
        );
        // 16 pieces per side, the four middle ranks empty.
        let mut white = 0;
        let mut black = 0;
        for square in Square::iter() {
            match board.piece_at(square) {
                Some(piece) => match piece.owner {
                    Player::White => white += 1,
                    Player::Black => black += 1,
                },
                None => assert!(
                    square.rank() >= Rank::Three && square.rank() <= Rank::Six,
                    "unexpected empty square {square}"
                ),
            }
        }
        assert_eq!(white, 16);
        assert_eq!(black, 16);
        assert!(board.history().is_empty());
    }

    #[test]
    fn starting_dump() {
        assert_eq!(
            Board::starting().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(
            format!("{:?}", Board::starting()),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
    }

    #[test]
    fn clone_independence() {
        let source = Board::starting();
        let mut copy = source.clone();
        copy.apply_unconditionally(Move::new(Square::E2, Square::E4, Player::White));
        assert_eq!(
            copy.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
        // The source grid and history are untouched.
        assert_eq!(
            source.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(source.history(), copy.history());
    }
}
