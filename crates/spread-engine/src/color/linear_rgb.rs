//! Linear RGB color type
//!
//! Linear RGB is the hub between gamma-encoded sRGB and the matrix-based
//! spaces (CIE XYZ and OKLab).

use super::srgb::{srgb_to_linear, Srgb};

/// A color in linear-light RGB with sRGB primaries.
///
/// Values may leave `0.0..=1.0` for out-of-gamut colors produced by the
/// inverse transforms; they are only clamped on the way back to hex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb> for LinearRgb {
    /// Decode the sRGB transfer curve.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}
