//! Board detector facade: owns the loaded reference state and dispatches to
//! a classification strategy.

use image::RgbImage;
use orbvision_core::Board;
use std::path::Path;
use tracing::info;

use super::DetectorConfig;
use crate::Result;
use crate::classify::{OrbClassifier, PixelLookupClassifier, SimilarityClassifier, Strategy};
use crate::error::VisionError;
use crate::reference::{PixelLookupTable, ReferenceSet};

/// Owns the immutable reference state consumed by classification.
///
/// Both stores are loaded fully before the detector exists and never change
/// afterwards, so one detector is shared by reference across concurrent
/// per-screenshot calls without locking. To pick up new reference data,
/// build a fresh detector and swap the shared reference.
#[derive(Debug)]
pub struct BoardDetector {
    config: DetectorConfig,
    references: ReferenceSet,
    lookup: PixelLookupTable,
}

impl BoardDetector {
    /// Load both stores named by `config`.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let references = ReferenceSet::load_dir(&config.reference_dir)?;
        let lookup = PixelLookupTable::load(&config.lookup_table_path);
        info!(
            "detector ready: {} references, {} lookup entries",
            references.len(),
            lookup.len()
        );
        Ok(Self { config, references, lookup })
    }

    /// Build from stores loaded elsewhere. Tests construct isolated
    /// instances this way.
    pub fn from_parts(
        config: DetectorConfig,
        references: ReferenceSet,
        lookup: PixelLookupTable,
    ) -> Self {
        Self { config, references, lookup }
    }

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn lookup(&self) -> &PixelLookupTable {
        &self.lookup
    }

    /// Extract the board from a decoded screenshot with the chosen strategy.
    pub fn detect(&self, screenshot: &RgbImage, strategy: Strategy) -> Result<Board> {
        match strategy {
            Strategy::Similarity => {
                SimilarityClassifier::with_metric(&self.references, self.config.metric)
                    .classify(screenshot)
            }
            Strategy::PixelLookup => PixelLookupClassifier::new(&self.lookup).classify(screenshot),
        }
    }

    /// Decode the screenshot at `path` and extract its board.
    pub fn detect_from_file<P: AsRef<Path>>(&self, path: P, strategy: Strategy) -> Result<Board> {
        let screenshot = image::open(path.as_ref())?.to_rgb8();
        if screenshot.width() == 0 || screenshot.height() == 0 {
            return Err(VisionError::MalformedImage {
                reason: format!("decoded image has zero dimension: {}", path.as_ref().display()),
            });
        }
        self.detect(&screenshot, strategy)
    }

    /// Write a board as pretty-printed JSON.
    pub fn export_json<P: AsRef<Path>>(&self, board: &Board, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(board)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use orbvision_core::{OrbType, cells};
    use std::fs;

    fn screenshot_with_uniform_board(rgb: [u8; 3]) -> RgbImage {
        let mut img = RgbImage::new(240, 400);
        for y in 133..=380 {
            for x in 12..228 {
                img.put_pixel(x, y, Rgb(rgb));
            }
        }
        img
    }

    fn red_detector() -> BoardDetector {
        let mut references = ReferenceSet::new();
        references.insert(OrbType::Fire, RgbImage::from_pixel(40, 40, Rgb([255, 0, 0])));
        references.insert(OrbType::Water, RgbImage::from_pixel(40, 40, Rgb([0, 0, 255])));

        let mut lookup = PixelLookupTable::new();
        lookup.insert(0, 255, OrbType::Fire);

        let config = DetectorConfig {
            metric: crate::similarity::Metric::MeanSquared,
            ..DetectorConfig::default()
        };
        BoardDetector::from_parts(config, references, lookup)
    }

    #[test]
    fn both_strategies_share_the_board_contract() {
        let detector = red_detector();
        let screenshot = screenshot_with_uniform_board([255, 0, 0]);

        for strategy in [Strategy::Similarity, Strategy::PixelLookup] {
            let board = detector.detect(&screenshot, strategy).unwrap();
            for (row, col) in cells() {
                assert_eq!(board.get(row, col).orb, OrbType::Fire);
            }
        }
    }

    #[test]
    fn undecodable_file_is_a_malformed_image() {
        let dir = std::env::temp_dir().join(format!("orbvision-detector-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not-a-screenshot.png");
        fs::write(&path, b"junk").unwrap();

        let detector = red_detector();
        assert!(matches!(
            detector.detect_from_file(&path, Strategy::Similarity),
            Err(VisionError::MalformedImage { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_json_writes_the_grid() {
        let dir = std::env::temp_dir().join(format!("orbvision-export-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("board.json");

        let detector = red_detector();
        let board = detector
            .detect(&screenshot_with_uniform_board([255, 0, 0]), Strategy::Similarity)
            .unwrap();
        detector.export_json(&board, &path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("Fire"));

        let _ = fs::remove_dir_all(&dir);
    }
}
