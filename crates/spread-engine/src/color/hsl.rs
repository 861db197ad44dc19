//! HSL (hexcone model over gamma-encoded sRGB)

use super::srgb::Srgb;

/// A color in HSL.
///
/// `h` is in degrees `0.0..360.0`, `s` and `l` are percentages `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl From<Srgb> for Hsl {
    fn from(rgb: Srgb) -> Self {
        let Srgb { r, g, b } = rgb.clamped();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta <= f64::EPSILON {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self::new(h.rem_euclid(360.0), s * 100.0, l * 100.0)
    }
}

impl From<Hsl> for Srgb {
    fn from(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(360.0);
        let s = (hsl.s / 100.0).clamp(0.0, 1.0);
        let l = (hsl.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = h / 60.0;
        let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h_prime as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Srgb::new(r + m, g + m, b + m)
    }
}
