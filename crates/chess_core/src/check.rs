//! Check and mate detection.
//!
//! `check` names the color whose king is attacked, i.e. the side that must
//! respond. Mate is full detection: the side in check is mated when none of
//! its pieces has a move or capture that leaves its king unattacked.

use tracing::info;

use crate::board::Board;
use crate::types::*;

impl Board {
    /// Recomputes the check and mate flags from the current grid.
    /// Runs after every successful transition and after loading a position.
    pub fn check_check(&mut self) {
        self.check = None;
        self.mate = None;
        for color in [Color::White, Color::Black] {
            if !self.in_check(color) {
                continue;
            }
            info!(%color, "king in check");
            self.check = Some(color);
            self.mate_check(color);
        }
    }

    fn mate_check(&mut self, color: Color) {
        if self.has_escape(color) {
            return;
        }
        info!(%color, "checkmate");
        self.mate = Some(color);
    }

    /// Any piece of `color` can move or capture without leaving its own king
    /// attacked. Castling never counts: it is unavailable while in check.
    pub fn has_escape(&self, color: Color) -> bool {
        self.pieces()
            .filter(|(_, pc)| pc.color() == color)
            .any(|(from, pc)| all_squares().any(|to| self.validate(pc, from, to).is_ok()))
    }

    /// The king of `color` is attacked. A side without a king is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some((row, col)) => self.is_under_attack(row, col, color.opponent()),
            None => false,
        }
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    pub fn get_check(&self) -> Option<Color> {
        self.check
    }

    pub fn get_mate(&self) -> Option<Color> {
        self.mate
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod check_tests;
