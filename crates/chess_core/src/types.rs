use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: i8 = 8;

/// A (row, col) pair. Row 0 is Black's back rank, row 7 is White's.
pub type Square = (i8, i8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
    pub fn from_code(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// Row holding this side's king and rooks in the starting layout.
    pub fn home_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
    /// Row this side's pawns start from.
    pub fn pawn_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
    /// Row delta of a single pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    /// The farthest rank, where this side's pawns promote.
    pub fn promotion_row(self) -> i8 {
        self.opponent().home_row()
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

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn from_code(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
    /// Kinds a pawn may promote into; anything else is rejected.
    pub fn promotion_target(c: char) -> Option<PieceKind> {
        match PieceKind::from_code(c)? {
            kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight) => {
                Some(kind)
            }
            _ => None,
        }
    }
}

/// A board occupant. Color and kind are fixed at construction; promotion
/// replaces the occupant instead of mutating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            moved: false,
        }
    }
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn kind(&self) -> PieceKind {
        self.kind
    }
    /// True once the piece has been relocated or promoted into place. Never reset.
    pub fn moved(&self) -> bool {
        self.moved
    }
    pub(crate) fn set_moved(&mut self) {
        self.moved = true;
    }
    /// Builds a copy carrying the given `moved` flag, for restoring saved positions.
    pub(crate) fn with_moved(mut self, moved: bool) -> Self {
        self.moved = moved;
        self
    }
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.kind.code())
    }
}

// Helpers
pub fn in_bounds(row: i8, col: i8) -> bool {
    (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col)
}

/// Every square of the board, row by row.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
}
