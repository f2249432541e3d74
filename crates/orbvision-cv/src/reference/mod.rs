//! Reference library for similarity classification and the persisted
//! hue/saturation lookup table.
//!
//! Both structures are built fully at startup and never mutated afterwards,
//! so they are shared by reference across concurrent classifications. To
//! pick up new data, build a fresh value and swap the shared reference.

pub mod loader;

pub use loader::resize_to_reference;

use image::RgbImage;
use orbvision_core::OrbType;
use std::collections::HashMap;

/// Canonical square edge for reference images and resized cell crops.
pub const REFERENCE_EDGE: u32 = 40;

/// Labeled reference images, bucketed by orb type in load order.
///
/// Bucket order, and image order within a bucket, is the tie-break order
/// during classification, so both are preserved.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    buckets: Vec<(OrbType, Vec<RgbImage>)>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one reference under `orb`, creating its bucket on first use.
    pub fn insert(&mut self, orb: OrbType, image: RgbImage) {
        match self.buckets.iter_mut().find(|(existing, _)| *existing == orb) {
            Some((_, images)) => images.push(image),
            None => self.buckets.push((orb, vec![image])),
        }
    }

    /// Buckets in insertion order.
    pub fn buckets(&self) -> &[(OrbType, Vec<RgbImage>)] {
        &self.buckets
    }

    /// Total number of reference images across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, images)| images.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Hue/saturation to orb lookup.
///
/// The value channel is deliberately absent from the key so brightness
/// variation between devices does not miss the table. Cheap to query, but
/// only as complete as the data it was built from.
#[derive(Debug, Clone, Default)]
pub struct PixelLookupTable {
    entries: HashMap<(u8, u8), OrbType>,
}

impl PixelLookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hue: u8, sat: u8, orb: OrbType) {
        self.entries.insert((hue, sat), orb);
    }

    pub fn get(&self, hue: u8, sat: u8) -> Option<OrbType> {
        self.entries.get(&(hue, sat)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// An empty table is the observable degraded state after a failed load:
    /// every cell then classifies to the unknown sentinel.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
