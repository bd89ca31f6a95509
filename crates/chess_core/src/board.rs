use tracing::{debug, trace};

use crate::error::IllegalOperation;
use crate::rules;
use crate::types::*;

pub type Grid = [[Option<Piece>; 8]; 8];

/// The game board: sole owner and sole mutator of the pieces on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    turn: Color,
    pub(crate) check: Option<Color>,
    pub(crate) mate: Option<Color>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut b = Board::empty();

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (col, &kind) in back.iter().enumerate() {
                let col = col as i8;
                b.set((color.home_row(), col), Some(Piece::new(color, kind)));
                b.set(
                    (color.pawn_row(), col),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        b
    }

    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            turn: Color::White,
            check: None,
            mate: None,
        }
    }

    pub fn current_player_color(&self) -> Color {
        self.turn
    }

    /// Overrides the side to move. Meant for restoring a saved session.
    pub fn set_active_color(&mut self, color: Color) {
        self.turn = color;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Occupant of (row, col); `None` for empty or off-board squares.
    pub fn get_piece(&self, row: i8, col: i8) -> Option<Piece> {
        if !in_bounds(row, col) {
            return None;
        }
        self.grid[row as usize][col as usize]
    }

    /// Two-character code of the cell: `"  "` when empty, else color then kind.
    pub fn cell(&self, row: i8, col: i8) -> String {
        match self.get_piece(row, col) {
            Some(piece) => piece.to_string(),
            None => "  ".to_string(),
        }
    }

    /// Places (or clears) an occupant directly, bypassing move rules.
    /// Returns the previous occupant. Check and mate are not recomputed;
    /// call [`Board::check_check`] once the position is set up.
    pub fn put(
        &mut self,
        row: i8,
        col: i8,
        piece: Option<Piece>,
    ) -> Result<Option<Piece>, IllegalOperation> {
        if !in_bounds(row, col) {
            return Err(IllegalOperation::OutOfBounds { row, col });
        }
        let prev = self.get_piece(row, col);
        self.set((row, col), piece);
        Ok(prev)
    }

    /// All occupants with their squares, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        all_squares().filter_map(move |sq| self.get_piece(sq.0, sq.1).map(|pc| (sq, pc)))
    }

    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.0 as usize][sq.1 as usize] = piece;
    }

    // =========================================================================
    // Legality probes
    // =========================================================================

    /// The piece on (row, col) belongs to the side to move and may go to the
    /// empty square (row1, col1), either by its own movement rule or, for a
    /// king, by castling.
    pub fn can_move(&self, row: i8, col: i8, row1: i8, col1: i8) -> bool {
        let Ok((from, to)) = squares(row, col, row1, col1) else {
            return false;
        };
        let Ok(piece) = self.mover(from) else {
            return false;
        };
        if self.at(to).is_some() {
            return false;
        }
        self.validate(piece, from, to).is_ok()
            || (piece.kind() == PieceKind::King && self.castle_check(from, to).is_ok())
    }

    /// The piece on (row, col) belongs to the side to move and may capture
    /// the opposing, non-king occupant of (row1, col1).
    pub fn can_attack(&self, row: i8, col: i8, row1: i8, col1: i8) -> bool {
        let Ok((from, to)) = squares(row, col, row1, col1) else {
            return false;
        };
        let Ok(piece) = self.mover(from) else {
            return false;
        };
        self.at(to).is_some() && self.validate(piece, from, to).is_ok()
    }

    pub fn can_castle(&self, row: i8, col: i8, row1: i8, col1: i8) -> bool {
        squares(row, col, row1, col1)
            .and_then(|(from, to)| self.castle_check(from, to))
            .is_ok()
    }

    /// True if any piece of `color` currently strikes (row, col).
    /// Friendly occupants of the target do not shield it.
    pub fn is_under_attack(&self, row: i8, col: i8, color: Color) -> bool {
        if !in_bounds(row, col) {
            return false;
        }
        self.pieces()
            .filter(|(_, pc)| pc.color() == color)
            .any(|(sq, pc)| rules::attacks(self, pc, sq, (row, col)))
    }

    /// The pending move or capture is legal and lands a pawn on its farthest
    /// rank, so the caller should ask which piece to promote to.
    pub fn is_promoting_move(&self, row: i8, col: i8, row1: i8, col1: i8) -> bool {
        let Some(piece) = self.get_piece(row, col) else {
            return false;
        };
        piece.kind() == PieceKind::Pawn
            && row1 == piece.color().promotion_row()
            && (self.can_move(row, col, row1, col1) || self.can_attack(row, col, row1, col1))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Moves or captures with the piece on (row, col). Returns `false` and
    /// leaves the board untouched when the move is illegal.
    pub fn move_piece(&mut self, row: i8, col: i8, row1: i8, col1: i8) -> bool {
        self.try_move_piece(row, col, row1, col1).is_ok()
    }

    pub fn try_move_piece(
        &mut self,
        row: i8,
        col: i8,
        row1: i8,
        col1: i8,
    ) -> Result<(), IllegalOperation> {
        let result = squares(row, col, row1, col1).and_then(|(from, to)| self.apply_move(from, to));
        log_outcome("move", (row, col), (row1, col1), result)
    }

    /// Castles the king on (row, col) toward column `col1` (2 or 6).
    pub fn castle(&mut self, row: i8, col: i8, row1: i8, col1: i8) -> bool {
        self.try_castle(row, col, row1, col1).is_ok()
    }

    pub fn try_castle(
        &mut self,
        row: i8,
        col: i8,
        row1: i8,
        col1: i8,
    ) -> Result<(), IllegalOperation> {
        let result = squares(row, col, row1, col1).and_then(|(from, to)| {
            self.castle_check(from, to)?;
            self.apply_castle(from, to);
            Ok(())
        });
        log_outcome("castle", (row, col), (row1, col1), result)
    }

    /// Moves a pawn onto its last rank and replaces it with a new piece of
    /// the kind named by `code` (`Q`, `R`, `B` or `N`).
    pub fn move_and_promote_pawn(
        &mut self,
        row: i8,
        col: i8,
        row1: i8,
        col1: i8,
        code: char,
    ) -> bool {
        self.try_move_and_promote_pawn(row, col, row1, col1, code).is_ok()
    }

    pub fn try_move_and_promote_pawn(
        &mut self,
        row: i8,
        col: i8,
        row1: i8,
        col1: i8,
        code: char,
    ) -> Result<(), IllegalOperation> {
        let result = squares(row, col, row1, col1)
            .and_then(|(from, to)| self.apply_promotion(from, to, code));
        log_outcome("promotion", (row, col), (row1, col1), result)
    }

    fn apply_move(&mut self, from: Square, to: Square) -> Result<(), IllegalOperation> {
        let piece = self.mover(from)?;

        // A king that cannot step there may still be castling.
        if piece.kind() == PieceKind::King
            && self.at(to).is_none()
            && !piece.can_move(self, from, to)
        {
            self.castle_check(from, to)
                .map_err(|_| IllegalOperation::Unreachable)?;
            self.apply_castle(from, to);
            return Ok(());
        }

        self.validate(piece, from, to)?;
        self.relocate(from, to);
        self.finish_turn();
        Ok(())
    }

    fn apply_promotion(
        &mut self,
        from: Square,
        to: Square,
        code: char,
    ) -> Result<(), IllegalOperation> {
        let piece = self.mover(from)?;
        if piece.kind() != PieceKind::Pawn || to.0 != piece.color().promotion_row() {
            return Err(IllegalOperation::NotPromoting);
        }
        let kind = PieceKind::promotion_target(code)
            .ok_or(IllegalOperation::InvalidPromotion(code))?;
        self.validate(piece, from, to)?;

        self.set(from, None);
        self.set(to, Some(Piece::new(piece.color(), kind).with_moved(true)));
        self.finish_turn();
        Ok(())
    }

    fn apply_castle(&mut self, from: Square, to: Square) {
        let (rook_from, rook_to) = castle_rook_squares(from.0, to.1);
        self.relocate(from, to);
        self.relocate(rook_from, rook_to);
        self.finish_turn();
    }

    /// Marks the piece moved and moves it; whatever stood on `to` is captured.
    fn relocate(&mut self, from: Square, to: Square) {
        if let Some(mut piece) = self.at(from) {
            piece.set_moved();
            self.set(from, None);
            self.set(to, Some(piece));
        }
    }

    fn finish_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.check_check();
    }

    // =========================================================================
    // Validation helpers
    // =========================================================================

    fn at(&self, sq: Square) -> Option<Piece> {
        self.get_piece(sq.0, sq.1)
    }

    /// The occupant of `from`, provided it belongs to the side to move.
    fn mover(&self, from: Square) -> Result<Piece, IllegalOperation> {
        let piece = self.at(from).ok_or(IllegalOperation::EmptySquare)?;
        if piece.color() != self.turn {
            return Err(IllegalOperation::WrongTurn);
        }
        Ok(piece)
    }

    /// Destination, geometry and king-safety checks for `piece` standing on
    /// `from`. Turn ownership is not consulted here.
    pub(crate) fn validate(
        &self,
        piece: Piece,
        from: Square,
        to: Square,
    ) -> Result<(), IllegalOperation> {
        match self.at(to) {
            None => {
                if !piece.can_move(self, from, to) {
                    return Err(IllegalOperation::Unreachable);
                }
            }
            Some(target) if target.color() == piece.color() => {
                return Err(IllegalOperation::FriendlyCapture);
            }
            Some(target) if target.kind() == PieceKind::King => {
                return Err(IllegalOperation::KingCapture);
            }
            Some(_) => {
                if !piece.can_attack(self, from, to) {
                    return Err(IllegalOperation::Unreachable);
                }
            }
        }
        if self.exposes_king(piece.color(), from, to) {
            return Err(IllegalOperation::ExposesKing);
        }
        Ok(())
    }

    /// Playing `from` -> `to` would leave `color`'s king attacked.
    fn exposes_king(&self, color: Color, from: Square, to: Square) -> bool {
        let mut probe = self.clone();
        probe.set(to, probe.at(from));
        probe.set(from, None);
        probe.in_check(color)
    }

    /// King and rook unmoved on their home squares, nothing between them,
    /// and the king neither in check nor crossing or landing on an attacked
    /// square.
    fn castle_check(&self, from: Square, to: Square) -> Result<(), IllegalOperation> {
        let king = self.mover(from)?;
        let row = king.color().home_row();
        if king.kind() != PieceKind::King
            || king.moved()
            || from != (row, 4)
            || to.0 != row
            || (to.1 != 2 && to.1 != 6)
        {
            return Err(IllegalOperation::CastleUnavailable);
        }

        let (rook_from, rook_to) = castle_rook_squares(row, to.1);
        match self.at(rook_from) {
            Some(rook) if rook.is(king.color(), PieceKind::Rook) && !rook.moved() => {}
            _ => return Err(IllegalOperation::CastleUnavailable),
        }
        if !rules::clear_path(self, from, rook_from) {
            return Err(IllegalOperation::CastleUnavailable);
        }

        let enemy = king.color().opponent();
        if self.is_under_attack(from.0, from.1, enemy)
            || !rules::king_safe(self, king, from, rook_to)
            || !rules::king_safe(self, king, from, to)
        {
            return Err(IllegalOperation::ExposesKing);
        }
        Ok(())
    }
}

/// Rook origin and destination for a king castling on `row` toward `king_col`.
fn castle_rook_squares(row: i8, king_col: i8) -> (Square, Square) {
    if king_col == 2 {
        ((row, 0), (row, 3))
    } else {
        ((row, 7), (row, 5))
    }
}

/// Bounds and same-square checks shared by every mutating entry point.
fn squares(row: i8, col: i8, row1: i8, col1: i8) -> Result<(Square, Square), IllegalOperation> {
    for (r, c) in [(row, col), (row1, col1)] {
        if !in_bounds(r, c) {
            return Err(IllegalOperation::OutOfBounds { row: r, col: c });
        }
    }
    if (row, col) == (row1, col1) {
        return Err(IllegalOperation::SameSquare);
    }
    Ok(((row, col), (row1, col1)))
}

fn log_outcome(
    what: &str,
    from: Square,
    to: Square,
    result: Result<(), IllegalOperation>,
) -> Result<(), IllegalOperation> {
    match &result {
        Ok(()) => trace!(?from, ?to, "{} played", what),
        Err(reason) => debug!(?from, ?to, %reason, "{} rejected", what),
    }
    result
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
