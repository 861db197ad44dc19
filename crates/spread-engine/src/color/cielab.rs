//! CIE XYZ, CIELAB and CIELCh(ab), D65 white point
//!
//! CIELAB is the space CIEDE2000 is defined on, so every color is taken
//! through here before distances are measured, whatever the optimization
//! space is.

use super::linear_rgb::LinearRgb;
use super::polar::{from_polar, to_polar};

/// Linear sRGB to XYZ, D65.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// D65 reference white (2° observer), taken as the image of RGB white so
/// that #FFFFFF lands on L=100, a=b=0. Y is 1 to within 1e-7.
const WHITE: [f64; 3] = [
    RGB_TO_XYZ[0][0] + RGB_TO_XYZ[0][1] + RGB_TO_XYZ[0][2],
    RGB_TO_XYZ[1][0] + RGB_TO_XYZ[1][1] + RGB_TO_XYZ[1][2],
    RGB_TO_XYZ[2][0] + RGB_TO_XYZ[2][1] + RGB_TO_XYZ[2][2],
];

/// CIE epsilon (216/24389) and kappa (24389/27) from the exact CIE standard.
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

/// A color in CIE XYZ (Y normalized to 1 for the white point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<LinearRgb> for Xyz {
    fn from(rgb: LinearRgb) -> Self {
        let [x, y, z] =
            RGB_TO_XYZ.map(|row| row[0] * rgb.r + row[1] * rgb.g + row[2] * rgb.b);
        Self { x, y, z }
    }
}

impl From<Xyz> for LinearRgb {
    fn from(xyz: Xyz) -> Self {
        LinearRgb::new(
            3.2404542 * xyz.x - 1.5371385 * xyz.y - 0.4985314 * xyz.z,
            -0.9692660 * xyz.x + 1.8760108 * xyz.y + 0.0415560 * xyz.z,
            0.0556434 * xyz.x - 0.2040259 * xyz.y + 1.0572252 * xyz.z,
        )
    }
}

/// A color in CIELAB.
///
/// - `l`: lightness, 0 to 100
/// - `a`: green-red axis, roughly -128 to 127
/// - `b`: blue-yellow axis, roughly -128 to 127
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    let cube = f * f * f;
    if cube > EPSILON {
        cube
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = lab_f(xyz.x / WHITE[0]);
        let fy = lab_f(xyz.y / WHITE[1]);
        let fz = lab_f(xyz.z / WHITE[2]);
        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;
        let y = if lab.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            lab.l / KAPPA
        };
        Self {
            x: lab_f_inv(fx) * WHITE[0],
            y: y * WHITE[1],
            z: lab_f_inv(fz) * WHITE[2],
        }
    }
}

impl From<LinearRgb> for Lab {
    fn from(rgb: LinearRgb) -> Self {
        Lab::from(Xyz::from(rgb))
    }
}

impl From<Lab> for LinearRgb {
    fn from(lab: Lab) -> Self {
        LinearRgb::from(Xyz::from(lab))
    }
}

/// CIELCh(ab): polar CIELAB with hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl From<Lab> for Lch {
    fn from(lab: Lab) -> Self {
        let (c, h) = to_polar(lab.a, lab.b);
        Self { l: lab.l, c, h }
    }
}

impl From<Lch> for Lab {
    fn from(lch: Lch) -> Self {
        let (a, b) = from_polar(lch.c, lch.h);
        Self::new(lch.l, a, b)
    }
}
