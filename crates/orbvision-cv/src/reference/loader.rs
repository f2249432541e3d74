//! Loading of reference directories and persisted lookup tables.

use image::{RgbImage, imageops, imageops::FilterType};
use orbvision_core::OrbType;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::{PixelLookupTable, REFERENCE_EDGE, ReferenceSet};
use crate::Result;

/// Resize to the canonical reference square: cubic interpolation when
/// upscaling, area-style averaging when downscaling.
pub fn resize_to_reference(img: &RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    if width < REFERENCE_EDGE || height < REFERENCE_EDGE {
        imageops::resize(img, REFERENCE_EDGE, REFERENCE_EDGE, FilterType::CatmullRom)
    } else if width > REFERENCE_EDGE || height > REFERENCE_EDGE {
        imageops::resize(img, REFERENCE_EDGE, REFERENCE_EDGE, FilterType::Triangle)
    } else {
        img.clone()
    }
}

impl ReferenceSet {
    /// Load every readable image in `dir`. The leading character of each
    /// file name is its orb symbol.
    ///
    /// A file that fails to decode, or whose label is unrecognized, is
    /// skipped with a warning; a single bad file never aborts the load.
    /// Entries are visited in file-name order so bucket order (the
    /// classification tie-break) is reproducible.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<ReferenceSet> {
        let dir = dir.as_ref();
        let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut set = ReferenceSet::new();
        let mut skipped = 0usize;
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name();
            let name = name.to_string_lossy();
            let orb = match name.chars().next().and_then(OrbType::from_symbol) {
                Some(orb) if !orb.is_unknown() => orb,
                _ => {
                    warn!("skipping reference with unrecognized label: {}", name);
                    skipped += 1;
                    continue;
                }
            };

            let image = match image::open(&path) {
                Ok(decoded) => decoded.to_rgb8(),
                Err(err) => {
                    warn!("skipping unreadable reference {}: {}", path.display(), err);
                    skipped += 1;
                    continue;
                }
            };

            set.insert(orb, resize_to_reference(&image));
        }

        info!(
            "loaded {} reference images from {} ({} skipped)",
            set.len(),
            dir.display(),
            skipped
        );
        Ok(set)
    }
}

impl PixelLookupTable {
    /// Load a persisted table. Any read or decode failure yields the empty
    /// table after a warning; classification then resolves every cell to the
    /// unknown sentinel, observable via [`PixelLookupTable::is_empty`].
    pub fn load<P: AsRef<Path>>(path: P) -> PixelLookupTable {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to read lookup table {}: {}", path.display(), err);
                return PixelLookupTable::new();
            }
        };

        let raw: HashMap<(u8, u8), char> = match bincode::deserialize(&bytes) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to decode lookup table {}: {}", path.display(), err);
                return PixelLookupTable::new();
            }
        };

        let mut table = PixelLookupTable::new();
        for ((hue, sat), symbol) in raw {
            match OrbType::from_symbol(symbol) {
                Some(orb) if !orb.is_unknown() => table.insert(hue, sat, orb),
                _ => warn!(
                    "dropping lookup entry ({}, {}) with unrecognized symbol '{}'",
                    hue, sat, symbol
                ),
            }
        }
        table
    }

    /// Persist in the on-disk format [`PixelLookupTable::load`] reads.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw: HashMap<(u8, u8), char> = self
            .entries
            .iter()
            .map(|(&key, orb)| (key, orb.symbol()))
            .collect();
        let bytes = bincode::serialize(&raw)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
