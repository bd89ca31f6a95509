//! Movement and attack geometry for every piece kind.
//!
//! All predicates here are read-only: they query the board for blocking
//! occupants but never mutate it. The six kinds are dispatched with a single
//! `match` on [`PieceKind`].

use crate::board::Board;
use crate::types::*;

/// Raw attack geometry: true if `piece` standing on `from` strikes `to`,
/// whatever occupies `to`. This is what [`Board::is_under_attack`] scans with,
/// so squares holding friendly pieces still count as covered.
///
/// The king's reach here is plain adjacency; its own safety is only checked
/// when it actually moves, which keeps the two kings from recursing into
/// each other.
pub fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if !in_bounds(to.0, to.1) || from == to {
        return false;
    }
    let dr = to.0 - from.0;
    let dc = to.1 - from.1;
    match piece.kind() {
        PieceKind::Pawn => dr == piece.color().forward() && dc.abs() == 1,
        PieceKind::Knight => knight_jump(dr, dc),
        PieceKind::Bishop => dr.abs() == dc.abs() && clear_path(board, from, to),
        PieceKind::Rook => (dr == 0 || dc == 0) && clear_path(board, from, to),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && clear_path(board, from, to)
        }
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

/// Sorted absolute deltas equal (1, 2). Knights jump, so nothing blocks them.
fn knight_jump(dr: i8, dc: i8) -> bool {
    let (a, b) = (dr.abs(), dc.abs());
    (a.min(b), a.max(b)) == (1, 2)
}

/// Every square strictly between `from` and `to` is empty.
/// Only meaningful for squares sharing a row, column or diagonal.
pub fn clear_path(board: &Board, from: Square, to: Square) -> bool {
    let step_r = (to.0 - from.0).signum();
    let step_c = (to.1 - from.1).signum();
    let mut r = from.0 + step_r;
    let mut c = from.1 + step_c;
    while (r, c) != to {
        if board.get_piece(r, c).is_some() {
            return false;
        }
        r += step_r;
        c += step_c;
    }
    true
}

/// Single step forward into an empty square, or the double step from the
/// starting rank when both squares ahead are empty.
fn pawn_advance(board: &Board, color: Color, from: Square, to: Square) -> bool {
    if from.1 != to.1 || board.get_piece(to.0, to.1).is_some() {
        return false;
    }
    let fwd = color.forward();
    if to.0 == from.0 + fwd {
        return true;
    }
    from.0 == color.pawn_row()
        && to.0 == from.0 + 2 * fwd
        && board.get_piece(from.0 + fwd, from.1).is_none()
}

/// The king would not stand attacked on `to` once lifted from `from`
/// (capturing whatever was on `to`).
pub fn king_safe(board: &Board, king: Piece, from: Square, to: Square) -> bool {
    if !in_bounds(from.0, from.1) || !in_bounds(to.0, to.1) {
        return false;
    }
    let mut probe = board.clone();
    probe.set(from, None);
    probe.set(to, Some(king));
    !probe.is_under_attack(to.0, to.1, king.color().opponent())
}

impl Piece {
    /// Checks shared by every kind: both squares on the board, distinct,
    /// destination not held by a piece of the same color.
    fn base_check(&self, board: &Board, from: Square, to: Square) -> bool {
        if !in_bounds(from.0, from.1) || !in_bounds(to.0, to.1) || from == to {
            return false;
        }
        match board.get_piece(to.0, to.1) {
            Some(other) => other.color() != self.color(),
            None => true,
        }
    }

    /// Kind-specific movement rule from `from` to `to`.
    pub fn can_move(&self, board: &Board, from: Square, to: Square) -> bool {
        if !self.base_check(board, from, to) {
            return false;
        }
        match self.kind() {
            PieceKind::Pawn => pawn_advance(board, self.color(), from, to),
            PieceKind::King => attacks(board, *self, from, to) && king_safe(board, *self, from, to),
            _ => attacks(board, *self, from, to),
        }
    }

    /// Kind-specific attack rule from `from` to `to`.
    pub fn can_attack(&self, board: &Board, from: Square, to: Square) -> bool {
        if !self.base_check(board, from, to) {
            return false;
        }
        match self.kind() {
            // pawns only ever capture onto an occupied square
            PieceKind::Pawn => {
                board.get_piece(to.0, to.1).is_some() && attacks(board, *self, from, to)
            }
            PieceKind::King => attacks(board, *self, from, to) && king_safe(board, *self, from, to),
            _ => attacks(board, *self, from, to),
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
