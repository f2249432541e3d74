//! Detector configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::similarity::Metric;

/// Configuration for building a [`BoardDetector`](crate::BoardDetector).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Directory of labeled reference images; the leading character of each
    /// file name is its orb symbol.
    pub reference_dir: PathBuf,
    /// Persisted hue/saturation lookup table.
    pub lookup_table_path: PathBuf,
    /// Metric used by the similarity strategy.
    pub metric: Metric,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            reference_dir: "assets/orbs".into(),
            lookup_table_path: "assets/hsv_table.bin".into(),
            metric: Metric::default(),
        }
    }
}
