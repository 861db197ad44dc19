//! CIEDE2000 color difference
//!
//! # References
//!
//! G. Sharma, W. Wu, E. N. Dalal, "The CIEDE2000 color-difference formula:
//! Implementation notes, supplementary test data, and mathematical
//! observations", Color Research & Application 30(1), 2005.

use crate::color::Lab;

/// 25^7, the chroma pivot of the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// Hue angle of `(a, b)` in degrees, `0.0..360.0`; zero for the origin.
fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    }
}

/// CIEDE2000 difference between two CIELAB colors, with kL = kC = kH = 1.
///
/// Symmetric, zero for identical inputs, never negative.
///
/// ```
/// use spread_engine::{delta_e_2000, Lab};
///
/// let a = Lab::new(50.0, 2.6772, -79.7751);
/// let b = Lab::new(50.0, 0.0, -82.7485);
/// assert!((delta_e_2000(a, b) - 2.0425).abs() < 1e-3);
/// ```
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1_ab = lab1.a.hypot(lab1.b);
    let c2_ab = lab2.a.hypot(lab2.b);
    let c_ab_mean_7 = ((c1_ab + c2_ab) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_ab_mean_7 / (c_ab_mean_7 + POW25_7)).sqrt());

    let a1 = lab1.a * (1.0 + g);
    let a2 = lab2.a * (1.0 + g);
    let c1 = a1.hypot(lab1.b);
    let c2 = a2.hypot(lab2.b);
    let h1 = hue_degrees(a1, lab1.b);
    let h2 = hue_degrees(a2, lab2.b);

    let chroma_product = c1 * c2;

    let delta_l = lab2.l - lab1.l;
    let delta_c = c2 - c1;
    let delta_h = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2 - h1;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let delta_big_h = 2.0 * chroma_product.sqrt() * (delta_h.to_radians() / 2.0).sin();

    let l_mean = (lab1.l + lab2.l) / 2.0;
    let c_mean = (c1 + c2) / 2.0;
    let h_mean = if chroma_product == 0.0 {
        h1 + h2
    } else if (h1 - h2).abs() <= 180.0 {
        (h1 + h2) / 2.0
    } else if h1 + h2 < 360.0 {
        (h1 + h2 + 360.0) / 2.0
    } else {
        (h1 + h2 - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

    let l_offset_sq = (l_mean - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_offset_sq / (20.0 + l_offset_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_mean;
    let s_h = 1.0 + 0.015 * c_mean * t;

    let delta_theta = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
    let c_mean_7 = c_mean.powi(7);
    let r_c = 2.0 * (c_mean_7 / (c_mean_7 + POW25_7)).sqrt();
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let term_l = delta_l / s_l;
    let term_c = delta_c / s_c;
    let term_h = delta_big_h / s_h;

    (term_l * term_l + term_c * term_c + term_h * term_h + r_t * term_c * term_h)
        .max(0.0)
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (L1, a1, b1, L2, a2, b2, ΔE00) from Sharma et al. (2005), table 1.
    const SHARMA: [(f64, f64, f64, f64, f64, f64, f64); 34] = [
        (50.0, 2.6772, -79.7751, 50.0, 0.0, -82.7485, 2.0425),
        (50.0, 3.1571, -77.2803, 50.0, 0.0, -82.7485, 2.8615),
        (50.0, 2.8361, -74.0200, 50.0, 0.0, -82.7485, 3.4412),
        (50.0, -1.3802, -84.2814, 50.0, 0.0, -82.7485, 1.0000),
        (50.0, -1.1848, -84.8006, 50.0, 0.0, -82.7485, 1.0000),
        (50.0, -0.9009, -85.5211, 50.0, 0.0, -82.7485, 1.0000),
        (50.0, 0.0, 0.0, 50.0, -1.0, 2.0, 2.3669),
        (50.0, -1.0, 2.0, 50.0, 0.0, 0.0, 2.3669),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0009, 7.1792),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0010, 7.1792),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0011, 7.2195),
        (50.0, 2.4900, -0.0010, 50.0, -2.4900, 0.0012, 7.2195),
        (50.0, -0.0010, 2.4900, 50.0, 0.0009, -2.4900, 4.8045),
        (50.0, -0.0010, 2.4900, 50.0, 0.0010, -2.4900, 4.8045),
        (50.0, -0.0010, 2.4900, 50.0, 0.0011, -2.4900, 4.7461),
        (50.0, 2.5, 0.0, 50.0, 0.0, -2.5, 4.3065),
        (50.0, 2.5, 0.0, 73.0, 25.0, -18.0, 27.1492),
        (50.0, 2.5, 0.0, 61.0, -5.0, 29.0, 22.8977),
        (50.0, 2.5, 0.0, 56.0, -27.0, -3.0, 31.9030),
        (50.0, 2.5, 0.0, 58.0, 24.0, 15.0, 19.4535),
        (50.0, 2.5, 0.0, 50.0, 3.1736, 0.5854, 1.0000),
        (50.0, 2.5, 0.0, 50.0, 3.2972, 0.0, 1.0000),
        (50.0, 2.5, 0.0, 50.0, 1.8634, 0.5757, 1.0000),
        (50.0, 2.5, 0.0, 50.0, 3.2592, 0.3350, 1.0000),
        (60.2574, -34.0099, 36.2677, 60.4626, -34.1751, 39.4387, 1.2644),
        (63.0109, -31.0961, -5.8663, 62.8187, -29.7946, -4.0864, 1.2630),
        (61.2901, 3.7196, -5.3901, 61.4292, 2.2480, -4.9620, 1.8731),
        (35.0831, -44.1164, 3.7933, 35.0232, -40.0716, 1.5901, 1.8645),
        (22.7233, 20.0904, -46.6940, 23.0331, 14.9730, -42.5619, 2.0373),
        (36.4612, 47.8580, 18.3852, 36.2715, 50.5065, 21.2231, 1.4146),
        (90.8027, -2.0831, 1.4410, 91.1528, -1.6435, 0.0447, 1.4441),
        (90.9257, -0.5406, -0.9208, 88.6381, -0.8985, -0.7239, 1.5381),
        (6.7747, -0.2908, -2.4247, 5.8714, -0.0985, -2.2286, 0.6377),
        (2.0776, 0.0795, -1.1350, 0.9033, -0.0636, -0.5514, 0.9082),
    ];

    #[test]
    fn test_sharma_reference_pairs() {
        for (i, &(l1, a1, b1, l2, a2, b2, expected)) in SHARMA.iter().enumerate() {
            let got = delta_e_2000(Lab::new(l1, a1, b1), Lab::new(l2, a2, b2));
            assert!(
                (got - expected).abs() < 1e-3,
                "pair {}: expected {expected:.4}, got {got:.4}",
                i + 1
            );
        }
    }

    #[test]
    fn test_symmetry() {
        for &(l1, a1, b1, l2, a2, b2, _) in SHARMA.iter() {
            let x = Lab::new(l1, a1, b1);
            let y = Lab::new(l2, a2, b2);
            assert!((delta_e_2000(x, y) - delta_e_2000(y, x)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_identity() {
        for lab in [
            Lab::new(0.0, 0.0, 0.0),
            Lab::new(50.0, 20.0, -30.0),
            Lab::new(100.0, 0.0, 0.0),
        ] {
            assert_eq!(delta_e_2000(lab, lab), 0.0);
        }
    }

    #[test]
    fn test_achromatic_lightness_only() {
        // Greys differ only in L; with S_L at L=50 equal to 1 this is |ΔL|
        let d = delta_e_2000(Lab::new(45.0, 0.0, 0.0), Lab::new(55.0, 0.0, 0.0));
        assert!(d > 9.0 && d <= 10.0, "got {d}");
    }
}
