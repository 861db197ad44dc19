//! sRGB color type
//!
//! sRGB is the interchange format of the engine: every color enters as a hex
//! string and every result leaves as one. All other spaces are reached from
//! here.

use std::fmt;
use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use crate::palette::ParseColorError;

/// A color in gamma-encoded sRGB.
///
/// Channels are nominally in `0.0..=1.0`. Conversions from other spaces may
/// produce values outside that range; [`Srgb::clamped`] and [`Srgb::to_bytes`]
/// bring them back before anything is encoded as hex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-encoded, 0.0..=1.0)
    pub r: f64,
    /// Green channel (gamma-encoded, 0.0..=1.0)
    pub g: f64,
    /// Blue channel (gamma-encoded, 0.0..=1.0)
    pub b: f64,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use spread_engine::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// Rounds and clamps values to the 0..=255 range.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Clamp every channel into `0.0..=1.0`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Snap to the nearest color representable as 8-bit hex.
    ///
    /// Candidate colors pass through this so that the objective scores
    /// exactly the colors that are eventually reported.
    #[inline]
    pub fn quantized(self) -> Self {
        Self::from_bytes(self.to_bytes())
    }

    /// Format as uppercase `#RRGGBB`.
    ///
    /// ```
    /// use spread_engine::Srgb;
    /// assert_eq!(Srgb::from_u8(0x44, 0x77, 0xAA).to_hex(), "#4477AA");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl From<LinearRgb> for Srgb {
    /// Gamma-encode linear light (IEC 61966-2-1).
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Accepts `#RRGGBB` and `RRGGBB`, case-insensitive, with surrounding
    /// whitespace trimmed. Shorthand `#RGB` is rejected: palette input is
    /// always six digits.
    ///
    /// ```
    /// use spread_engine::Srgb;
    ///
    /// let white: Srgb = "#ffffff".parse().unwrap();
    /// assert_eq!(white.to_hex(), "#FFFFFF");
    /// assert!("#FFF".parse::<Srgb>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if s.len() != 6 || !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        // from_str_radix would also accept a leading '+'
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16)
                .map_err(|_| ParseColorError::InvalidHex(s.to_string()))
        };
        Ok(Self::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// IEC 61966-2-1 transfer function: encoded sRGB to linear light.
#[inline]
pub(crate) fn srgb_to_linear(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 transfer function: linear light to encoded sRGB.
///
/// Negative input (out of gamut) is mirrored so the curve stays monotonic.
#[inline]
pub(crate) fn linear_to_srgb(linear: f64) -> f64 {
    if linear.abs() <= 0.0031308 {
        linear * 12.92
    } else {
        linear.signum() * (1.055 * linear.abs().powf(1.0 / 2.4) - 0.055)
    }
}
