//! Cartesian/polar helpers shared by LCh and Oklch.

/// Convert an `(a, b)` pair to `(chroma, hue)` with hue in degrees `0.0..360.0`.
#[inline]
pub(crate) fn to_polar(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    // atan2(0, 0) is 0, so achromatic colors land on hue 0
    let h = b.atan2(a).to_degrees().rem_euclid(360.0);
    (c, h)
}

/// Convert `(chroma, hue in degrees)` back to an `(a, b)` pair.
#[inline]
pub(crate) fn from_polar(c: f64, h: f64) -> (f64, f64) {
    let (sin, cos) = h.to_radians().sin_cos();
    (c * cos, c * sin)
}
