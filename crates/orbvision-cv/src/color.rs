//! Pixel-space conversions. All conversions produce new buffers; the input
//! screenshot is never mutated.

use image::{GrayImage, Rgb, RgbImage};

/// Single-channel grayscale (Rec. 601 luma weights).
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Convert an RGB buffer to HSV with hue halved into `[0, 180)` and
/// saturation/value in `[0, 255]`, the encoding persisted lookup tables are
/// keyed against. Black maps to black, so boundary scans behave identically
/// on the converted buffer.
pub fn to_hsv(img: &RgbImage) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        out.put_pixel(x, y, Rgb(rgb_to_hsv(pixel.0)));
    }
    out
}

/// HSV of a single pixel, `[hue, sat, value]` in the same u8 encoding.
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let value = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = value - min;

    let sat = if value == 0.0 { 0.0 } else { 255.0 * delta / value };

    let hue = if delta == 0.0 {
        0.0
    } else if value == rf {
        60.0 * (gf - bf) / delta
    } else if value == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    [(hue / 2.0).round() as u8, sat.round() as u8, value.round() as u8]
}
