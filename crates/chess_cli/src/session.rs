//! Saved game session and leaderboard, stored as JSON.

use anyhow::{Context, Result};
use chess_core::{Board, Color};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One position of the current game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board in the flat text encoding
    pub field: String,
    /// Side to move in that position
    pub turn: Color,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStore {
    /// Positions of the game in progress, oldest first
    pub snapshots: Vec<Snapshot>,
    /// Winner of every finished game
    pub leaderboard: Vec<Color>,
}

impl SessionStore {
    /// Load the store from a JSON file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Save the store to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn add_move(&mut self, board: &Board) {
        self.snapshots.push(Snapshot {
            field: board.field_as_text(),
            turn: board.current_player_color(),
        });
    }

    /// Rebuild the board of the latest snapshot, if any.
    pub fn restore(&self) -> Result<Option<Board>> {
        let Some(last) = self.snapshots.last() else {
            return Ok(None);
        };
        let board = Board::from_text(&last.field, last.turn).context("saved session is corrupt")?;
        Ok(Some(board))
    }

    pub fn clear_session(&mut self) {
        self.snapshots.clear();
    }

    pub fn record_winner(&mut self, winner: Color) {
        self.leaderboard.push(winner);
    }

    /// Games won by `color`.
    pub fn wins(&self, color: Color) -> usize {
        self.leaderboard.iter().filter(|&&c| c == color).count()
    }
}
