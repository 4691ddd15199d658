//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::mem;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Represents a move of a single piece from its original square to a new one,
/// attributed to the player making it. A move is the only way to mutate
/// [`crate::chess::board::Board`] and change the game state.
///
/// Moves are immutable values constructed by the caller; the engine never
/// modifies them. Whether a move is actually legal in a concrete position is
/// decided by [`crate::chess::board::Board::is_valid_move`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub(super) from: Square,
    pub(super) to: Square,
    pub(super) player: Player,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square, player: Player) -> Self {
        Self { from, to, player }
    }

    /// Parses a move from [Pure Coordinate Notation] (e.g. "e2e4") and
    /// attributes it to the given player.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if the input is not exactly two valid
    /// squares.
    ///
    /// [Pure Coordinate Notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
    pub fn from_uci(input: &str, player: Player) -> anyhow::Result<Self> {
        let (from_file, from_rank, to_file, to_rank) = match input.chars().collect_tuple() {
            Some(chars) => chars,
            None => bail!("move should be four-char (e.g. e2e4), got {input}"),
        };
        Ok(Self::new(
            Square::new(from_file.try_into()?, from_rank.try_into()?),
            Square::new(to_file.try_into()?, to_rank.try_into()?),
            player,
        ))
    }
}

impl fmt::Display for Move {
    /// Serializes a move in [UCI format].
    ///
    /// [UCI format]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Absolute file and rank distance between two squares. The movement shape
/// rules are defined purely in terms of these distances: e.g. a knight move
/// is a (2, 1) or (1, 2) delta regardless of its direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delta {
    #[allow(missing_docs)]
    pub files: u8,
    #[allow(missing_docs)]
    pub ranks: u8,
}

impl Delta {
    /// Computes the distances between two squares.
    #[must_use]
    pub const fn between(from: Square, to: Square) -> Self {
        Self {
            files: (from.file() as u8).abs_diff(to.file() as u8),
            ranks: (from.rank() as u8).abs_diff(to.rank() as u8),
        }
    }
}

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use arbiter::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use arbiter::chess::core::Square;
/// use std::mem;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        // Exclusive range patterns are not allowed:
        // https://github.com/rust-lang/rust/issues/37854
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(unsafe { mem::transmute(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.bytes().len()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute(file as u8 - b'a') }),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
///
/// The orientation convention is fixed once for the whole crate:
/// [`Rank::One`] (index 0) is White's back rank, [`Rank::Eight`] (index 7) is
/// Black's. Board initialization, pawn direction checks and grid indexing all
/// follow it.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    pub(super) fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    pub(super) fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute(rank as u8 - b'1') }),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Player::White => 'w',
                Player::Black => 'b',
            }
        )
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. An empty square is not a
/// piece: it is modeled as the absence of one (`Option<Piece>::None`), never
/// as a special value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol {
            'K' => Ok(Self {
                owner: Player::White,
                kind: PieceKind::King,
            }),
            'Q' => Ok(Self {
                owner: Player::White,
                kind: PieceKind::Queen,
            }),
            'R' => Ok(Self {
                owner: Player::White,
                kind: PieceKind::Rook,
            }),
            'B' => Ok(Self {
                owner: Player::White,
                kind: PieceKind::Bishop,
            }),
            'N' => Ok(Self {
                owner: Player::White,
                kind: PieceKind::Knight,
            }),
            'P' => Ok(Self {
                owner: Player::White,
                kind: PieceKind::Pawn,
            }),
            'k' => Ok(Self {
                owner: Player::Black,
                kind: PieceKind::King,
            }),
            'q' => Ok(Self {
                owner: Player::Black,
                kind: PieceKind::Queen,
            }),
            'r' => Ok(Self {
                owner: Player::Black,
                kind: PieceKind::Rook,
            }),
            'b' => Ok(Self {
                owner: Player::Black,
                kind: PieceKind::Bishop,
            }),
            'n' => Ok(Self {
                owner: Player::Black,
                kind: PieceKind::Knight,
            }),
            'p' => Ok(Self {
                owner: Player::Black,
                kind: PieceKind::Pawn,
            }),
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(match (&self.owner, &self.kind) {
            // White player: uppercase symbols.
            (Player::White, PieceKind::King) => 'K',
            (Player::White, PieceKind::Queen) => 'Q',
            (Player::White, PieceKind::Rook) => 'R',
            (Player::White, PieceKind::Bishop) => 'B',
            (Player::White, PieceKind::Knight) => 'N',
            (Player::White, PieceKind::Pawn) => 'P',
            // Black player: lowercase symbols.
            (Player::Black, PieceKind::King) => 'k',
            (Player::Black, PieceKind::Queen) => 'q',
            (Player::Black, PieceKind::Rook) => 'r',
            (Player::Black, PieceKind::Bishop) => 'b',
            (Player::Black, PieceKind::Knight) => 'n',
            (Player::Black, PieceKind::Pawn) => 'p',
        })
    }
}
