//! Nearest-reference classification.

use image::RgbImage;
use orbvision_core::{Board, BoardCell, OrbType, cells};

use super::OrbClassifier;
use crate::Result;
use crate::geometry::BoardGeometry;
use crate::reference::{ReferenceSet, resize_to_reference};
use crate::similarity::Metric;

/// Score a cell starts from before any reference has been compared; cells
/// that match nothing keep it.
pub const UNMATCHED_SCORE: f64 = 99_999.0;

/// Classifies each cell as the globally closest reference image.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityClassifier<'a> {
    references: &'a ReferenceSet,
    metric: Metric,
}

impl<'a> SimilarityClassifier<'a> {
    pub fn new(references: &'a ReferenceSet) -> Self {
        Self::with_metric(references, Metric::default())
    }

    pub fn with_metric(references: &'a ReferenceSet, metric: Metric) -> Self {
        Self { references, metric }
    }

    /// Closest reference to one canonical-size cell crop. Strictly lower
    /// distance wins; equal distance keeps the earlier reference, in bucket
    /// order and then in-bucket order.
    pub fn best_match(&self, cell: &RgbImage) -> Result<BoardCell> {
        let mut best = BoardCell::new(OrbType::Unknown, UNMATCHED_SCORE);
        for (orb, images) in self.references.buckets() {
            for reference in images {
                let distance = self.metric.distance(cell, reference)?;
                if distance < best.score {
                    best = BoardCell::new(*orb, distance);
                }
            }
        }
        Ok(best)
    }

    fn classify_cell(
        &self,
        geometry: &BoardGeometry,
        screenshot: &RgbImage,
        row: usize,
        col: usize,
    ) -> Result<BoardCell> {
        let crop = geometry.crop_cell(screenshot, row, col);
        self.best_match(&resize_to_reference(&crop))
    }
}

impl OrbClassifier for SimilarityClassifier<'_> {
    fn classify(&self, screenshot: &RgbImage) -> Result<Board> {
        let geometry = BoardGeometry::detect(screenshot)?;
        let mut board = Board::new();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let coords: Vec<_> = cells().collect();
            let classified = coords
                .par_iter()
                .map(|&(row, col)| self.classify_cell(&geometry, screenshot, row, col))
                .collect::<Result<Vec<_>>>()?;
            for ((row, col), cell) in coords.into_iter().zip(classified) {
                board.set(row, col, cell);
            }
        }

        #[cfg(not(feature = "parallel"))]
        for (row, col) in cells() {
            board.set(row, col, self.classify_cell(&geometry, screenshot, row, col)?);
        }

        Ok(board)
    }
}
