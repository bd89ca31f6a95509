//! Rules engine for standard chess.
//!
//! [`Board`] owns the 8x8 grid, the side to move and the derived check/mate
//! flags, and is the only thing that ever mutates the position. [`Piece`]
//! answers per-kind movement and attack questions against a board without
//! touching it.
//!
//! Presentation, input parsing and persistence are left to callers; they
//! talk to the engine through the methods on [`Board`] and the flat text
//! encoding in [`notation`].

pub mod board;
pub mod check;
pub mod error;
pub mod notation;
pub mod rules;
pub mod types;

pub use board::*;
pub use error::*;
pub use types::*;
