//! First-hit pixel lookup classification.

use image::RgbImage;
use orbvision_core::{Board, BoardCell, cells};

use super::OrbClassifier;
use crate::Result;
use crate::color::to_hsv;
use crate::geometry::BoardGeometry;
use crate::reference::PixelLookupTable;

/// Classifies each cell from the first pixel whose hue/saturation pair the
/// lookup table knows.
///
/// Cheaper than the similarity strategy (no per-reference distances), but
/// entirely dependent on lookup-table completeness and brittle to per-device
/// color rendering. Both strategies stay available behind [`OrbClassifier`];
/// neither is silently preferred.
#[derive(Debug, Clone, Copy)]
pub struct PixelLookupClassifier<'a> {
    table: &'a PixelLookupTable,
}

impl<'a> PixelLookupClassifier<'a> {
    pub fn new(table: &'a PixelLookupTable) -> Self {
        Self { table }
    }

    /// Row-major scan of one HSV cell crop; stops at the first table hit.
    /// A cell with no hit stays at the unknown sentinel.
    fn match_cell(&self, cell: &RgbImage) -> BoardCell {
        for pixel in cell.pixels() {
            let [hue, sat, _value] = pixel.0;
            if let Some(orb) = self.table.get(hue, sat) {
                return BoardCell::new(orb, 0.0);
            }
        }
        BoardCell::unknown()
    }
}

impl OrbClassifier for PixelLookupClassifier<'_> {
    fn classify(&self, screenshot: &RgbImage) -> Result<Board> {
        // The table is keyed on hue/saturation, so geometry detection and
        // cropping both run on the converted buffer. Cells are not resized.
        let hsv = to_hsv(screenshot);
        let geometry = BoardGeometry::detect(&hsv)?;

        let mut board = Board::new();
        for (row, col) in cells() {
            board.set(row, col, self.match_cell(&geometry.crop_cell(&hsv, row, col)));
        }
        Ok(board)
    }
}
