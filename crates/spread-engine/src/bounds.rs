//! Admissible search region per channel
//!
//! New colors are kept near the input palette: for each channel the bounds
//! start from a quantile span of the palette's normalized values and are
//! widened toward the full `[0, 1]` range as the width parameter drops.
//!
//! ```text
//! width 0.0   [0 ......................... 1]   unconstrained
//! width 0.5   [0 .... |  q_lo ... q_hi  | .. 1]
//! width 1.0   [0 ......  q_lo ... q_hi  .... 1]  quantile span only
//! ```

use crate::color::{ChannelRole, Channels, ColorSpace};

const FULL_RANGE_EPSILON: f64 = 1e-9;

/// Normalized `[low, high]` range of one channel.
///
/// For a circular channel `high` may exceed 1.0, meaning the range runs
/// from `low` up through 1.0, wraps to 0.0 and continues to `high - 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelBounds {
    pub low: f64,
    pub high: f64,
}

impl ChannelBounds {
    pub const FULL: ChannelBounds = ChannelBounds { low: 0.0, high: 1.0 };

    #[inline]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Whether this is exactly the unconstrained `[0, 1]` range.
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Length of the range, treating an empty circular range as the full
    /// circle.
    pub fn circular_span(&self) -> f64 {
        let span = (self.high - self.low + 1.0).rem_euclid(1.0);
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }
}

impl From<(f64, f64)> for ChannelBounds {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

/// Bounds for all three channels of a space, in channel order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    channels: [ChannelBounds; 3],
}

impl Bounds {
    pub fn new(channels: [ChannelBounds; 3]) -> Self {
        Self { channels }
    }

    /// `[0, 1]` for every channel.
    pub fn full() -> Self {
        Self::new([ChannelBounds::FULL; 3])
    }

    pub fn channel(&self, index: usize) -> ChannelBounds {
        self.channels[index]
    }

    pub fn channels(&self) -> &[ChannelBounds; 3] {
        &self.channels
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::full()
    }
}

/// Quantile with linear interpolation between order statistics
/// (Hyndman & Fan type 7, the R and NumPy default).
///
/// Returns `None` for an empty slice. NaN values sort last.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Widen a quantile pair into channel bounds.
///
/// `width <= 0` gives the full range. Otherwise the desired length is
/// `span + (1 - span)(1 - width)`, centered on the midpoint of the pair.
/// Circular channels wrap both ends into `[0, 1)` and carry `high` past 1.0
/// when the wrap inverts them; linear channels clamp to `[0, 1]`.
///
/// ```
/// use spread_engine::width_bounds;
///
/// assert_eq!(width_bounds((0.4, 0.6), 0.0, false), (0.0, 1.0));
/// let (low, high) = width_bounds((0.4, 0.6), 1.0, false);
/// assert!((low - 0.4).abs() < 1e-12 && (high - 0.6).abs() < 1e-12);
/// ```
pub fn width_bounds(pair: (f64, f64), width: f64, circular: bool) -> (f64, f64) {
    if width <= 0.0 {
        return (0.0, 1.0);
    }
    let (q_low, q_high) = pair;
    let span = q_high - q_low;
    let desired = span + (1.0 - span) * (1.0 - width);
    if desired >= 1.0 - FULL_RANGE_EPSILON {
        return (0.0, 1.0);
    }

    let mid = (q_low + q_high) / 2.0;
    let low = mid - desired / 2.0;
    let high = mid + desired / 2.0;

    if circular {
        let low = low.rem_euclid(1.0);
        let mut high = high.rem_euclid(1.0);
        if high < low {
            high += 1.0;
        }
        (low, high)
    } else {
        (low.clamp(0.0, 1.0), high.clamp(0.0, 1.0))
    }
}

/// Build bounds for `space` from the palette's normalized channel values.
///
/// Lightness channels use the 10th/90th percentiles, every other channel
/// the 5th/95th. An empty palette leaves every channel unconstrained.
pub fn compute_bounds(
    normalized_colors: &[Channels],
    space: ColorSpace,
    widths: [f64; 3],
) -> Bounds {
    if normalized_colors.is_empty() {
        return Bounds::full();
    }

    let mut channels = [ChannelBounds::FULL; 3];
    for (i, channel) in space.channels().iter().enumerate() {
        let values: Vec<f64> = normalized_colors.iter().map(|c| c[i]).collect();
        let (p_low, p_high) = match channel.role {
            ChannelRole::Lightness => (0.10, 0.90),
            _ => (0.05, 0.95),
        };
        let (Some(q_low), Some(q_high)) = (quantile(&values, p_low), quantile(&values, p_high))
        else {
            continue;
        };
        channels[i] = width_bounds((q_low, q_high), widths[i], channel.is_circular()).into();
    }

    tracing::trace!(%space, ?channels, "computed bounds");
    Bounds::new(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    #[test]
    fn test_quantile_type7() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert!((quantile(&v, 0.5).unwrap() - 2.5).abs() < 1e-12);
        // h = 3 * 0.1 = 0.3 -> 1 + 0.3
        assert!((quantile(&v, 0.1).unwrap() - 1.3).abs() < 1e-12);
        // Unsorted input
        assert!((quantile(&[4.0, 1.0, 3.0, 2.0], 0.5).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[0.7], 0.9), Some(0.7));
    }

    #[test]
    fn test_zero_width_is_full_range() {
        for pair in [(0.2, 0.3), (0.0, 0.0), (0.9, 0.95)] {
            assert_eq!(width_bounds(pair, 0.0, false), (0.0, 1.0));
            assert_eq!(width_bounds(pair, 0.0, true), (0.0, 1.0));
            assert_eq!(width_bounds(pair, -0.5, false), (0.0, 1.0));
        }
    }

    #[test]
    fn test_full_span_is_full_range() {
        assert_eq!(width_bounds((0.0, 1.0), 0.8, false), (0.0, 1.0));
    }

    #[test]
    fn test_linear_bounds_shrink_monotonically() {
        let pair = (0.3, 0.5);
        let mut previous = 1.0 + 1e-12;
        for step in 1..=10 {
            let width = step as f64 / 10.0;
            let (low, high) = width_bounds(pair, width, false);
            let len = high - low;
            assert!(len <= previous, "width {width}: {len} > {previous}");
            assert!(low <= 0.3 + 1e-12 && high >= 0.5 - 1e-12);
            previous = len;
        }
    }

    #[test]
    fn test_linear_bounds_clamped() {
        let (low, high) = width_bounds((0.9, 1.0), 0.5, false);
        assert!(low >= 0.0 && high <= 1.0);
        assert_eq!(high, 1.0);
    }

    #[test]
    fn test_circular_bounds_wrap() {
        // Midpoint 0.975, length 0.525: crosses 1.0
        let (low, high) = width_bounds((0.95, 1.0), 0.5, true);
        assert!(high > low);
        assert!(high > 1.0, "expected wrapped high, got {high}");
        assert!((0.0..1.0).contains(&low));
        assert!((high - low - 0.525).abs() < 1e-9);
    }

    #[test]
    fn test_circular_bounds_ordered_or_full() {
        for &(a, b) in &[(0.0, 0.1), (0.45, 0.55), (0.8, 0.99), (0.0, 0.0)] {
            for step in 0..=10 {
                let w = step as f64 / 10.0;
                let bounds = ChannelBounds::from(width_bounds((a, b), w, true));
                assert!(
                    bounds.high > bounds.low || bounds.circular_span() == 1.0,
                    "({a}, {b}) width {w}: {bounds:?}"
                );
            }
        }
    }

    #[test]
    fn test_empty_input_is_unconstrained() {
        assert_eq!(compute_bounds(&[], ColorSpace::Oklch, [1.0; 3]), Bounds::full());
    }

    #[test]
    fn test_single_color_bounds_contain_midpoint() {
        let palette = Palette::from_hex(&["#000000"]).unwrap();
        for space in ColorSpace::ALL {
            let normalized = palette.normalized(space);
            for width in [0.0, 0.3, 0.5, 1.0] {
                let bounds = compute_bounds(&normalized, space, [width; 3]);
                for i in 0..3 {
                    let b = bounds.channel(i);
                    let v = if space.channels()[i].is_circular() {
                        normalized[0][i].rem_euclid(1.0)
                    } else {
                        normalized[0][i]
                    };
                    let inside = b.is_full()
                        || (b.low - 1e-9 <= v && v <= b.high + 1e-9)
                        || (b.low - 1e-9 <= v + 1.0 && v + 1.0 <= b.high + 1e-9);
                    assert!(inside, "{space} channel {i} width {width}: {b:?} misses {v}");
                }
            }
        }
    }

    #[test]
    fn test_lightness_uses_inner_quantiles() {
        // Lightness of black and white normalize to 0 and 1; the 10/90
        // quantiles of [0, 1] are 0.1 and 0.9
        let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
        let normalized = palette.normalized(ColorSpace::Oklab);
        let bounds = compute_bounds(&normalized, ColorSpace::Oklab, [1.0, 0.0, 0.0]);
        let l = bounds.channel(0);
        assert!((l.low - 0.1).abs() < 1e-6, "{l:?}");
        assert!((l.high - 0.9).abs() < 1e-6, "{l:?}");
        assert!(bounds.channel(1).is_full());
    }
}
