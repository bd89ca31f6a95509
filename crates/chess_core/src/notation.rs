//! Flat text encoding of the board used by session storage.
//!
//! Rows are joined by `;` and cells within a row by `,`. An empty cell is
//! `_`, an occupied one is its two-character code such as `wK` or `bP`.

use std::fmt;

use crate::board::{Board, Grid};
use crate::error::ParseFieldError;
use crate::types::*;

const EMPTY_CELL: &str = "_";

impl Board {
    pub fn field_as_text(&self) -> String {
        self.grid()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(piece) => piece.to_string(),
                        None => EMPTY_CELL.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Replaces the grid with the position encoded in `text` and recomputes
    /// check and mate. The side to move is left alone. On error the board is
    /// untouched.
    ///
    /// The encoding carries no `moved` flags. Kings and rooks found away from
    /// their starting squares come back moved; everything else comes back
    /// unmoved.
    pub fn field_from_text(&mut self, text: &str) -> Result<(), ParseFieldError> {
        let grid = parse_grid(text)?;
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                self.set((row as i8, col as i8), *cell);
            }
        }
        self.check_check();
        Ok(())
    }

    /// Builds a board from encoded text with `turn` to move.
    pub fn from_text(text: &str, turn: Color) -> Result<Board, ParseFieldError> {
        let mut board = Board::empty();
        board.field_from_text(text)?;
        board.set_active_color(turn);
        Ok(board)
    }
}

fn parse_grid(text: &str) -> Result<Grid, ParseFieldError> {
    let rows: Vec<&str> = text.trim().split(';').collect();
    if rows.len() != 8 {
        return Err(ParseFieldError::RowCount(rows.len()));
    }

    let mut grid: Grid = [[None; 8]; 8];
    for (row, row_text) in rows.iter().enumerate() {
        let cells: Vec<&str> = row_text.split(',').collect();
        if cells.len() != 8 {
            return Err(ParseFieldError::ColumnCount {
                row,
                found: cells.len(),
            });
        }
        for (col, code) in cells.iter().enumerate() {
            let code = code.trim();
            if code == EMPTY_CELL {
                continue;
            }
            let piece = parse_cell(row, col, code)?;
            let moved = restored_moved(piece, row as i8, col as i8);
            grid[row][col] = Some(piece.with_moved(moved));
        }
    }
    Ok(grid)
}

fn parse_cell(row: usize, col: usize, code: &str) -> Result<Piece, ParseFieldError> {
    let chars: Vec<char> = code.chars().collect();
    let &[c, k] = chars.as_slice() else {
        return Err(ParseFieldError::CellCode {
            row,
            col,
            code: code.to_string(),
        });
    };
    let Some(color) = Color::from_code(c) else {
        return Err(ParseFieldError::UnknownColor { row, col, found: c });
    };
    let Some(kind) = PieceKind::from_code(k) else {
        return Err(ParseFieldError::UnknownKind { row, col, found: k });
    };
    Ok(Piece::new(color, kind))
}

/// Only kings and rooks use the flag; those still on their starting squares
/// keep their castling rights.
fn restored_moved(piece: Piece, row: i8, col: i8) -> bool {
    let home = row == piece.color().home_row();
    match piece.kind() {
        PieceKind::King => !(home && col == 4),
        PieceKind::Rook => !(home && (col == 0 || col == 7)),
        _ => false,
    }
}

impl fmt::Display for Board {
    /// ASCII diagram with row 7 on top and column indices underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "     +----+----+----+----+----+----+----+----+";
        writeln!(f, "{rule}")?;
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "  {row}  ")?;
            for col in 0..BOARD_SIZE {
                write!(f, "| {} ", self.cell(row, col))?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{rule}")?;
        }
        write!(f, "       ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}   ")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
