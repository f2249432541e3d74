//! Board geometry detection by boundary scanning.
//!
//! The surrounding chrome (status bars, buttons, monster panels) varies by
//! device, so nothing about the board's position is known in advance. Two
//! bounded linear scans find the board's left edge and baseline; the 30 cell
//! rectangles derive from those plus the screenshot width.

use image::{RgbImage, imageops};
use orbvision_core::{BOARD_COLS, BOARD_ROWS};

use crate::Result;
use crate::error::VisionError;

/// Horizontal trim applied to the measured board width. Calibrated against
/// device screenshots; re-derive if the game's rendering changes.
pub const X_ADJ: f64 = 0.0;
/// Vertical lift applied to the derived grid top. Calibration data.
pub const Y_ADJ: f64 = 2.0;
/// Per-cell shrink compensating for orb border padding. Calibration data.
pub const ORB_ADJ: f64 = 1.0;

/// Columns right of the detected left edge where the baseline scan probes.
const BASELINE_PROBE_OFFSET: u32 = 10;

/// Integer pixel rectangle of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Where the 5x6 grid lies within one screenshot.
///
/// Computed once per screenshot and discarded after the cell rectangles are
/// derived. The cell size is fractional: the board width rarely divides
/// evenly into six columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    /// Column of the first lit pixel on the probe row.
    pub left: u32,
    /// Row of the board's bottom edge.
    pub baseline: u32,
    /// Fractional edge length of one cell.
    pub cell_size: f64,
    /// Fractional row where the grid starts.
    pub top: f64,
}

impl BoardGeometry {
    /// Locate the board inside `img`.
    ///
    /// Both scans are plain loops bounded by the image dimensions, so a fully
    /// black or corrupt screenshot terminates with a detection failure
    /// instead of spinning.
    pub fn detect(img: &RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(VisionError::MalformedImage {
                reason: format!("zero-sized image ({width}x{height})"),
            });
        }

        // The board sits in the lower part of the screen and is indented less
        // than the chrome above it, so the first lit pixel at this height is
        // its left edge.
        let probe_row = (u64::from(height) * 2 / 3) as u32;
        let mut left = None;
        for x in 0..width {
            if is_lit(img, x, probe_row) {
                left = Some(x);
                break;
            }
        }
        let left = left.ok_or_else(|| VisionError::GeometryDetection {
            detail: format!("left boundary scan exhausted row {probe_row}"),
        })?;

        // Scanning up from the bottom edge skips navigation buttons below
        // the board.
        let probe_col = (left + BASELINE_PROBE_OFFSET).min(width - 1);
        let mut baseline = None;
        for y in (0..height).rev() {
            if is_lit(img, probe_col, y) {
                baseline = Some(y);
                break;
            }
        }
        let baseline = baseline.ok_or_else(|| VisionError::GeometryDetection {
            detail: format!("baseline scan exhausted column {probe_col}"),
        })?;

        // Left and right margins are assumed symmetric.
        let board_width = f64::from(width) - 2.0 * f64::from(left) - X_ADJ;
        let cell_size = board_width / BOARD_COLS as f64 - ORB_ADJ;
        if cell_size <= 0.0 {
            return Err(VisionError::GeometryDetection {
                detail: format!("non-positive cell size {cell_size:.2}"),
            });
        }
        let top = f64::from(baseline) - cell_size * BOARD_ROWS as f64 + Y_ADJ;

        Ok(Self { left, baseline, cell_size, top })
    }

    /// Floored pixel rectangle of the cell at `(row, col)`. Adjacent cells
    /// share edges, so the 30 rectangles tile the board within a pixel of
    /// rounding.
    pub fn cell_rect(&self, row: usize, col: usize) -> CellRect {
        let x0 = (col as f64 * self.cell_size + f64::from(self.left)).floor().max(0.0) as u32;
        let y0 = (row as f64 * self.cell_size + self.top).floor().max(0.0) as u32;
        let x1 = ((col + 1) as f64 * self.cell_size + f64::from(self.left)).floor().max(0.0) as u32;
        let y1 = ((row + 1) as f64 * self.cell_size + self.top).floor().max(0.0) as u32;

        CellRect {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }

    /// Crop the cell at `(row, col)`, clamped to the image bounds.
    pub fn crop_cell(&self, img: &RgbImage, row: usize, col: usize) -> RgbImage {
        let rect = self.cell_rect(row, col);
        let x = rect.x.min(img.width());
        let y = rect.y.min(img.height());
        let width = rect.width.min(img.width() - x);
        let height = rect.height.min(img.height() - y);
        imageops::crop_imm(img, x, y, width, height).to_image()
    }
}

fn is_lit(img: &RgbImage, x: u32, y: u32) -> bool {
    let [r, g, b] = img.get_pixel(x, y).0;
    r > 0 || g > 0 || b > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    /// Black screenshot with a solid board spanning symmetric side margins
    /// down to `baseline`, tall enough to cover the probe row.
    fn synthetic_screenshot(width: u32, height: u32, margin: u32, baseline: u32) -> RgbImage {
        let mut img = RgbImage::new(width, height);
        for y in height / 3..=baseline {
            for x in margin..width - margin {
                img.put_pixel(x, y, RED);
            }
        }
        img
    }

    #[test]
    fn detects_margins_and_cell_size() {
        let img = synthetic_screenshot(240, 400, 12, 380);
        let geometry = BoardGeometry::detect(&img).unwrap();

        assert_eq!(geometry.left, 12);
        assert_eq!(geometry.baseline, 380);
        // board width 216 -> 36 per column, minus the per-cell adjustment
        assert!((geometry.cell_size - 35.0).abs() < 1e-9);
        assert!((geometry.top - (380.0 - 5.0 * 35.0 + Y_ADJ)).abs() < 1e-9);
    }

    #[test]
    fn cell_rects_tile_the_grid() {
        let img = synthetic_screenshot(240, 400, 12, 380);
        let geometry = BoardGeometry::detect(&img).unwrap();

        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let rect = geometry.cell_rect(row, col);
                assert!((34..=36).contains(&rect.width));
                assert!((34..=36).contains(&rect.height));

                if col + 1 < BOARD_COLS {
                    assert_eq!(rect.x + rect.width, geometry.cell_rect(row, col + 1).x);
                }
                if row + 1 < BOARD_ROWS {
                    assert_eq!(rect.y + rect.height, geometry.cell_rect(row + 1, col).y);
                }
            }
        }
    }

    #[test]
    fn crops_have_cell_dimensions() {
        let img = synthetic_screenshot(240, 400, 12, 380);
        let geometry = BoardGeometry::detect(&img).unwrap();

        let crop = geometry.crop_cell(&img, 0, 0);
        assert_eq!(crop.dimensions(), (35, 35));
        assert_eq!(crop.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn crop_is_clamped_to_image_bounds() {
        let img = RgbImage::new(100, 100);
        let geometry = BoardGeometry {
            left: 80,
            baseline: 99,
            cell_size: 30.0,
            top: 60.0,
        };

        let crop = geometry.crop_cell(&img, 1, 0);
        assert!(crop.width() <= 20 && crop.height() <= 10);
    }

    #[test]
    fn fully_black_image_is_a_detection_failure() {
        let img = RgbImage::new(64, 64);
        assert!(matches!(
            BoardGeometry::detect(&img),
            Err(VisionError::GeometryDetection { .. })
        ));
    }

    #[test]
    fn zero_sized_image_is_malformed() {
        let img = RgbImage::new(0, 0);
        assert!(matches!(
            BoardGeometry::detect(&img),
            Err(VisionError::MalformedImage { .. })
        ));
    }
}
