//! Color space conversion
//!
//! RGB <-> YCbCr with JFIF/BT.601 coefficients. The forward direction keeps
//! full precision; only the inverse rounds and clamps back to 8 bits.

use rgb::RGB8;

use crate::error::Error;
use crate::types::{Channel, Image};
use crate::Result;

/// Convert one RGB pixel to unrounded YCbCr
///
/// The conversion formula is:
/// - Y  =  0.299 * R + 0.587 * G + 0.114 * B
/// - Cb = -0.168736 * R - 0.331264 * G + 0.5 * B + 128
/// - Cr =  0.5 * R - 0.418688 * G - 0.081312 * B + 128
#[inline]
pub fn rgb_to_ycbcr_pixel(px: RGB8) -> (f64, f64, f64) {
    let r = px.r as f64;
    let g = px.g as f64;
    let b = px.b as f64;

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;

    (y, cb, cr)
}

/// Convert YCbCr back to RGB, rounding and clamping each component
#[inline]
pub fn ycbcr_to_rgb_pixel(y: f64, cb: f64, cr: f64) -> RGB8 {
    let cb = cb - 128.0;
    let cr = cr - 128.0;

    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;

    RGB8::new(to_u8(r), to_u8(g), to_u8(b))
}

#[inline]
fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Split an image into Y, Cb and Cr planes.
pub fn rgb_to_ycbcr(image: &Image) -> (Channel, Channel, Channel) {
    let n = image.pixels().len();
    let mut y_plane = Vec::with_capacity(n);
    let mut cb_plane = Vec::with_capacity(n);
    let mut cr_plane = Vec::with_capacity(n);

    for &px in image.pixels() {
        let (y, cb, cr) = rgb_to_ycbcr_pixel(px);
        y_plane.push(y);
        cb_plane.push(cb);
        cr_plane.push(cr);
    }

    let (w, h) = (image.width(), image.height());
    (
        Channel::from_parts(w, h, y_plane),
        Channel::from_parts(w, h, cb_plane),
        Channel::from_parts(w, h, cr_plane),
    )
}

/// Merge Y, Cb and Cr planes back into an RGB image.
///
/// All three planes must share one shape.
pub fn ycbcr_to_rgb(y: &Channel, cb: &Channel, cr: &Channel) -> Result<Image> {
    for other in [cb, cr] {
        if other.shape() != y.shape() {
            return Err(Error::ShapeMismatch {
                expected: y.shape(),
                actual: other.shape(),
                reason: "chroma plane shape differs from luma plane",
            });
        }
    }

    let pixels = y
        .data()
        .iter()
        .zip(cb.data())
        .zip(cr.data())
        .map(|((&y, &cb), &cr)| ycbcr_to_rgb_pixel(y, cb, cr))
        .collect();

    Image::new(y.width(), y.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_ycbcr_roundtrip() {
        // Test several colors
        let colors = [
            (0, 0, 0),       // Black
            (255, 255, 255), // White
            (255, 0, 0),     // Red
            (0, 255, 0),     // Green
            (0, 0, 255),     // Blue
            (128, 128, 128), // Gray
            (200, 100, 50),
        ];

        for (r, g, b) in colors {
            let (y, cb, cr) = rgb_to_ycbcr_pixel(RGB8::new(r, g, b));
            let back = ycbcr_to_rgb_pixel(y, cb, cr);

            // Allow ±1 due to rounding
            assert!((r as i16 - back.r as i16).abs() <= 1, "R: {} vs {}", r, back.r);
            assert!((g as i16 - back.g as i16).abs() <= 1, "G: {} vs {}", g, back.g);
            assert!((b as i16 - back.b as i16).abs() <= 1, "B: {} vs {}", b, back.b);
        }
    }

    #[test]
    fn test_gray_has_neutral_chroma() {
        let (y, cb, cr) = rgb_to_ycbcr_pixel(RGB8::new(77, 77, 77));
        assert!((y - 77.0).abs() < 1e-9);
        assert!((cb - 128.0).abs() < 1e-9);
        assert!((cr - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_clamps_out_of_range() {
        assert_eq!(ycbcr_to_rgb_pixel(300.0, 128.0, 128.0), RGB8::new(255, 255, 255));
        assert_eq!(ycbcr_to_rgb_pixel(-20.0, 128.0, 128.0), RGB8::new(0, 0, 0));
    }

    #[test]
    fn test_plane_shape_mismatch() {
        let y = Channel::zeros(8, 8);
        let cb = Channel::zeros(8, 8);
        let cr = Channel::zeros(16, 8);
        assert!(matches!(
            ycbcr_to_rgb(&y, &cb, &cr),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
