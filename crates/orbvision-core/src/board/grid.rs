use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::orb::OrbType;

pub const BOARD_ROWS: usize = 5;
pub const BOARD_COLS: usize = 6;

/// Row-major iterator over the `(row, col)` coordinates of the grid.
pub fn cells() -> impl Iterator<Item = (usize, usize)> {
    (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| (row, col)))
}

/// One classified cell: the orb and the distance score it matched at.
/// Lower score means higher confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardCell {
    pub orb: OrbType,
    pub score: f64,
}

impl BoardCell {
    pub fn new(orb: OrbType, score: f64) -> Self {
        Self { orb, score }
    }

    pub fn unknown() -> Self {
        Self::new(OrbType::Unknown, 0.0)
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A 5x6 grid of classified cells, row-major with the origin at the top-left.
///
/// Every cell always holds an orb type; a cell nothing matched holds the
/// unknown sentinel, never an absent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<BoardCell>,
}

impl Board {
    /// A board with every cell at the unknown sentinel.
    pub fn new() -> Self {
        Self {
            cells: vec![BoardCell::unknown(); BOARD_ROWS * BOARD_COLS],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> BoardCell {
        self.cells[Self::index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: BoardCell) {
        self.cells[Self::index(row, col)] = cell;
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &BoardCell> {
        self.cells.iter()
    }

    /// The five rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.cells.chunks(BOARD_COLS)
    }

    /// Parse a board from five lines of six orb symbols. Whitespace inside a
    /// line is ignored; scores are zeroed.
    pub fn from_symbols(text: &str) -> Result<Board> {
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.len() != BOARD_ROWS {
            bail!("expected {BOARD_ROWS} rows, got {}", lines.len());
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_COLS {
                bail!("row {row}: expected {BOARD_COLS} symbols, got {}", symbols.len());
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let orb = OrbType::from_symbol(symbol)
                    .with_context(|| format!("row {row}, col {col}: unknown symbol '{symbol}'"))?;
                board.set(row, col, BoardCell::new(orb, 0.0));
            }
        }
        Ok(board)
    }

    fn index(row: usize, col: usize) -> usize {
        assert!(row < BOARD_ROWS && col < BOARD_COLS, "cell ({row}, {col}) out of range");
        row * BOARD_COLS + col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.orb.symbol())?;
            }
        }
        Ok(())
    }
}
