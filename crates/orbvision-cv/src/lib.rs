//! Orb board vision library
//!
//! Extracts a 5x6 orb board from a game screenshot: boundary-scan geometry
//! detection plus two interchangeable cell classification strategies.

pub mod classify;
pub mod color;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod reference;
pub mod similarity;

// Re-export commonly used types
pub use classify::{OrbClassifier, PixelLookupClassifier, SimilarityClassifier, Strategy};
pub use detection::{BoardDetector, DetectorConfig};
pub use error::VisionError;
pub use geometry::{BoardGeometry, CellRect};
pub use reference::{PixelLookupTable, REFERENCE_EDGE, ReferenceSet};
pub use similarity::Metric;

// Error handling
pub type Result<T> = std::result::Result<T, VisionError>;
