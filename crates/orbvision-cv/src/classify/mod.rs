//! Cell classification strategies.

pub mod pixel;
pub mod similarity;

pub use pixel::PixelLookupClassifier;
pub use similarity::SimilarityClassifier;

use image::RgbImage;
use orbvision_core::Board;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Capability shared by both classification strategies: a decoded screenshot
/// in, a fully labeled 30-cell board out.
pub trait OrbClassifier {
    fn classify(&self, screenshot: &RgbImage) -> Result<Board>;
}

/// Tag selecting a classification strategy at the detector boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Nearest labeled reference under a similarity metric. Robust to colors
    /// the lookup table has never seen, at the cost of comparing every
    /// reference for every cell.
    Similarity,
    /// First pixel whose hue/saturation key is in the lookup table. Cheap,
    /// but only as complete as the table and sensitive to per-device color
    /// rendering.
    PixelLookup,
}
