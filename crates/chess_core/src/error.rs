//! Error types for board transitions and position parsing.

use thiserror::Error;

/// Why a transition or legality probe was refused. Whatever the variant, the
/// board is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalOperation {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfBounds { row: i8, col: i8 },
    #[error("source and destination are the same square")]
    SameSquare,
    #[error("no piece on the source square")]
    EmptySquare,
    #[error("it is not this piece's turn")]
    WrongTurn,
    #[error("destination holds a piece of the same color")]
    FriendlyCapture,
    #[error("kings cannot be captured")]
    KingCapture,
    #[error("the piece cannot reach the destination")]
    Unreachable,
    #[error("the move would leave the king under attack")]
    ExposesKing,
    #[error("the move does not bring a pawn to its last rank")]
    NotPromoting,
    #[error("'{0}' is not a promotion piece (expected Q, R, B or N)")]
    InvalidPromotion(char),
    #[error("castling is not available")]
    CastleUnavailable,
}

/// Malformed serialized position text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFieldError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row}: expected 8 cells, found {found}")]
    ColumnCount { row: usize, found: usize },
    #[error("cell ({row}, {col}): malformed code {code:?}")]
    CellCode {
        row: usize,
        col: usize,
        code: String,
    },
    #[error("cell ({row}, {col}): unknown color character '{found}'")]
    UnknownColor { row: usize, col: usize, found: char },
    #[error("cell ({row}, {col}): unknown piece character '{found}'")]
    UnknownKind { row: usize, col: usize, found: char },
}
