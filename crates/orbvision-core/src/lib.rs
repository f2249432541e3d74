//! Core board model shared by the vision crates.

pub mod board;

pub use board::{Board, BoardCell, OrbType, BOARD_COLS, BOARD_ROWS, cells};
