//! Error taxonomy for the vision core.
//!
//! Detection and decoding failures are fatal for the call that hit them and
//! propagate to the caller; per-file problems during reference loading are
//! absorbed as warnings instead (the set stays usable with fewer entries).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    /// The screenshot failed to decode or has degenerate dimensions.
    #[error("malformed image: {reason}")]
    MalformedImage { reason: String },

    /// A boundary scan exhausted the image without finding board content.
    #[error("board geometry detection failed: {detail}")]
    GeometryDetection { detail: String },

    /// A similarity metric was invoked on images of different shapes; the
    /// caller must resize before comparing.
    #[error("image dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },

    #[error("lookup table serialization failed: {0}")]
    LookupEncode(#[from] bincode::Error),

    #[error("board serialization failed: {0}")]
    BoardEncode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for VisionError {
    fn from(err: image::ImageError) -> Self {
        VisionError::MalformedImage { reason: err.to_string() }
    }
}
