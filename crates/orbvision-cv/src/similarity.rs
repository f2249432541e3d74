//! Similarity metrics between equally sized cell images.
//!
//! A distance of 0 means identical; larger means more different. The
//! thresholded variants binarize against a local neighborhood mean first,
//! which makes them insensitive to lighting and shading gradients.

use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::color::to_grayscale;
use crate::error::VisionError;

/// Neighborhood edge length for adaptive binarization.
const BINARIZE_BLOCK: u32 = 7;
/// Offset subtracted from the neighborhood mean before thresholding.
const BINARIZE_OFFSET: f64 = 3.0;
/// Fixed L2 normalization keeping scores on a comparable scale.
const L2_SCALE: f64 = 100.0 * 100.0;

/// Distance strategy between two images of identical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Root of summed squared channel differences on a fixed 100x100 scale.
    L2,
    /// Summed squared channel differences per pixel.
    MeanSquared,
    /// Grayscale + adaptive binarization, then `L2`.
    L2Thresholded,
    /// Grayscale + adaptive binarization, then `MeanSquared`.
    MeanSquaredThresholded,
}

impl Metric {
    /// Whether this metric binarizes before measuring.
    pub fn is_thresholded(&self) -> bool {
        matches!(self, Metric::L2Thresholded | Metric::MeanSquaredThresholded)
    }

    /// Distance between `a` and `b`. The images must already have identical
    /// dimensions; the metric never resizes.
    pub fn distance(&self, a: &RgbImage, b: &RgbImage) -> Result<f64> {
        if a.dimensions() != b.dimensions() {
            return Err(VisionError::DimensionMismatch {
                left: a.dimensions(),
                right: b.dimensions(),
            });
        }

        let (width, height) = a.dimensions();
        Ok(match self {
            Metric::L2 => l2_error(a.as_raw(), b.as_raw()),
            Metric::MeanSquared => mean_squared_error(a.as_raw(), b.as_raw(), width, height),
            Metric::L2Thresholded => {
                l2_error(binarize(a).as_raw(), binarize(b).as_raw())
            }
            Metric::MeanSquaredThresholded => {
                mean_squared_error(binarize(a).as_raw(), binarize(b).as_raw(), width, height)
            }
        })
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::L2Thresholded
    }
}

/// Grayscale then black/white classification of each pixel against the mean
/// of its local neighborhood, shifted down by a fixed offset.
pub fn binarize(img: &RgbImage) -> GrayImage {
    adaptive_binarize(&to_grayscale(img), BINARIZE_BLOCK, BINARIZE_OFFSET)
}

/// Adaptive mean binarization with a `block` x `block` window, clamped at the
/// image border. A pixel becomes white when it exceeds its window mean minus
/// `offset`.
pub fn adaptive_binarize(gray: &GrayImage, block: u32, offset: f64) -> GrayImage {
    let (width, height) = gray.dimensions();
    let integral = IntegralImage::new(gray);
    let radius = i64::from(block / 2);

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let x0 = (i64::from(x) - radius).max(0) as u32;
            let y0 = (i64::from(y) - radius).max(0) as u32;
            let x1 = (i64::from(x) + radius).min(i64::from(width) - 1) as u32;
            let y1 = (i64::from(y) + radius).min(i64::from(height) - 1) as u32;

            let count = f64::from((x1 - x0 + 1) * (y1 - y0 + 1));
            let mean = integral.sum(x0, y0, x1, y1) as f64 / count;

            let value = if f64::from(gray.get_pixel(x, y).0[0]) > mean - offset {
                255
            } else {
                0
            };
            out.put_pixel(x, y, Luma([value]));
        }
    }
    out
}

fn sum_squared_error(a: &[u8], b: &[u8]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

fn l2_error(a: &[u8], b: &[u8]) -> f64 {
    sum_squared_error(a, b).sqrt() / L2_SCALE
}

fn mean_squared_error(a: &[u8], b: &[u8], width: u32, height: u32) -> f64 {
    let pixels = f64::from(width) * f64::from(height);
    if pixels == 0.0 {
        return 0.0;
    }
    sum_squared_error(a, b) / pixels
}

/// Summed-area table over a grayscale buffer, for O(1) window sums.
struct IntegralImage {
    data: Vec<u64>,
    stride: usize,
}

impl IntegralImage {
    fn new(gray: &GrayImage) -> Self {
        let (width, height) = (gray.width() as usize, gray.height() as usize);
        let stride = width + 1;
        let mut data = vec![0u64; stride * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0u64;
            for x in 0..width {
                row_sum += u64::from(gray.get_pixel(x as u32, y as u32).0[0]);
                data[(y + 1) * stride + (x + 1)] = data[y * stride + (x + 1)] + row_sum;
            }
        }
        Self { data, stride }
    }

    /// Pixel sum over the inclusive rectangle `(x0, y0)..=(x1, y1)`.
    fn sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        let (x0, y0) = (x0 as usize, y0 as usize);
        let (x1, y1) = (x1 as usize + 1, y1 as usize + 1);
        self.data[y1 * self.stride + x1] + self.data[y0 * self.stride + x0]
            - self.data[y0 * self.stride + x1]
            - self.data[y1 * self.stride + x0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const ALL_METRICS: [Metric; 4] = [
        Metric::L2,
        Metric::MeanSquared,
        Metric::L2Thresholded,
        Metric::MeanSquaredThresholded,
    ];

    fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn distance_to_self_is_zero() {
        let img = uniform(40, 40, [120, 30, 200]);
        for metric in ALL_METRICS {
            assert_eq!(metric.distance(&img, &img).unwrap(), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        let a = uniform(40, 40, [200, 0, 0]);
        let b = uniform(40, 40, [0, 0, 200]);
        for metric in ALL_METRICS {
            let ab = metric.distance(&a, &b).unwrap();
            assert_eq!(ab, metric.distance(&b, &a).unwrap());
            assert!(ab >= 0.0);
        }
    }

    #[test]
    fn mismatched_dimensions_are_a_caller_error() {
        let a = uniform(40, 40, [0, 0, 0]);
        let b = uniform(20, 40, [0, 0, 0]);
        for metric in ALL_METRICS {
            assert!(matches!(
                metric.distance(&a, &b),
                Err(VisionError::DimensionMismatch { .. })
            ));
        }
    }

    #[test]
    fn raw_metrics_match_hand_computation() {
        let mut a = uniform(2, 1, [0, 0, 0]);
        let b = uniform(2, 1, [0, 0, 0]);
        a.put_pixel(0, 0, Rgb([10, 0, 0]));

        // one channel off by 10 over two pixels
        assert_eq!(Metric::MeanSquared.distance(&a, &b).unwrap(), 50.0);
        assert_eq!(Metric::L2.distance(&a, &b).unwrap(), 10.0 / L2_SCALE);
    }

    #[test]
    fn thresholded_metrics_ignore_uniform_brightness_shifts() {
        let dim = uniform(40, 40, [60, 60, 60]);
        let bright = uniform(40, 40, [180, 180, 180]);

        assert!(Metric::MeanSquared.distance(&dim, &bright).unwrap() > 0.0);
        assert_eq!(
            Metric::MeanSquaredThresholded.distance(&dim, &bright).unwrap(),
            0.0
        );
        assert_eq!(Metric::L2Thresholded.distance(&dim, &bright).unwrap(), 0.0);
    }

    #[test]
    fn adaptive_binarize_splits_against_the_local_mean() {
        let mut gray = GrayImage::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                let value = if (x + y) % 2 == 0 { 200 } else { 0 };
                gray.put_pixel(x, y, Luma([value]));
            }
        }

        let bin = adaptive_binarize(&gray, 7, 3.0);
        assert_eq!(bin.get_pixel(3, 3).0[0], 255);
        assert_eq!(bin.get_pixel(3, 4).0[0], 0);
    }

    #[test]
    fn integral_image_sums_windows() {
        let mut gray = GrayImage::new(3, 2);
        for (i, pixel) in gray.pixels_mut().enumerate() {
            *pixel = Luma([i as u8 + 1]); // 1..=6 row-major
        }

        let integral = IntegralImage::new(&gray);
        assert_eq!(integral.sum(0, 0, 2, 1), 21);
        assert_eq!(integral.sum(1, 0, 2, 0), 5);
        assert_eq!(integral.sum(2, 1, 2, 1), 6);
    }
}
