//! The 5x6 orb board and its cell types.

pub mod grid;
pub mod orb;

pub use grid::{Board, BoardCell, BOARD_COLS, BOARD_ROWS, cells};
pub use orb::OrbType;
