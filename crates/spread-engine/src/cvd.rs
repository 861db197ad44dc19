//! Color-vision deficiency simulation
//!
//! Dichromatic vision is approximated by a fixed 3×3 matrix applied to
//! gamma-encoded RGB. The matrices are coarse, but they are cheap and
//! deterministic, which is what the objective needs: it only has to know
//! which pairs of colors collapse onto each other for a given viewer.

use std::fmt;
use std::str::FromStr;

use crate::color::Srgb;

/// A simulated vision type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CvdState {
    /// Typical trichromatic vision (identity).
    None,
    /// Deuteranopia (missing M cones).
    Deutan,
    /// Protanopia (missing L cones).
    Protan,
    /// Tritanopia (missing S cones).
    Tritan,
}

const DEUTAN: [[f64; 3]; 3] = [[0.625, 0.375, 0.0], [0.7, 0.3, 0.0], [0.0, 0.3, 0.7]];

const PROTAN: [[f64; 3]; 3] = [
    [0.56667, 0.43333, 0.0],
    [0.55833, 0.44167, 0.0],
    [0.0, 0.24167, 0.75833],
];

const TRITAN: [[f64; 3]; 3] = [
    [0.95, 0.05, 0.0],
    [0.0, 0.43333, 0.56667],
    [0.0, 0.475, 0.525],
];

impl CvdState {
    /// All states, in the order the objective evaluates them.
    pub const ALL: [CvdState; 4] = [
        CvdState::Deutan,
        CvdState::Protan,
        CvdState::Tritan,
        CvdState::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CvdState::None => "none",
            CvdState::Deutan => "deutan",
            CvdState::Protan => "protan",
            CvdState::Tritan => "tritan",
        }
    }

    fn matrix(self) -> Option<&'static [[f64; 3]; 3]> {
        match self {
            CvdState::None => None,
            CvdState::Deutan => Some(&DEUTAN),
            CvdState::Protan => Some(&PROTAN),
            CvdState::Tritan => Some(&TRITAN),
        }
    }
}

impl fmt::Display for CvdState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown vision state name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vision state '{0}' (expected one of none, deutan, protan, tritan)")]
pub struct UnknownCvdState(pub String);

impl FromStr for CvdState {
    type Err = UnknownCvdState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "normal" => Ok(CvdState::None),
            "deutan" | "deuteranopia" => Ok(CvdState::Deutan),
            "protan" | "protanopia" => Ok(CvdState::Protan),
            "tritan" | "tritanopia" => Ok(CvdState::Tritan),
            _ => Err(UnknownCvdState(s.to_string())),
        }
    }
}

/// Simulate how `color` appears under `state`.
///
/// The input is clamped, multiplied by the state's matrix, clamped again
/// and snapped to 8-bit, so the result is always a valid hex color.
/// `CvdState::None` returns the (quantized) input unchanged.
///
/// ```
/// use spread_engine::{simulate, CvdState, Srgb};
///
/// let red: Srgb = "#FF0000".parse().unwrap();
/// assert_eq!(simulate(red, CvdState::None).to_hex(), "#FF0000");
/// assert_eq!(simulate(red, CvdState::Deutan).to_hex(), "#9FB300");
/// ```
pub fn simulate(color: Srgb, state: CvdState) -> Srgb {
    let Some(m) = state.matrix() else {
        return color.quantized();
    };
    let Srgb { r, g, b } = color.clamped();
    Srgb::new(
        m[0][0] * r + m[0][1] * g + m[0][2] * b,
        m[1][0] * r + m[1][1] * g + m[1][2] * b,
        m[2][0] * r + m[2][1] * g + m[2][2] * b,
    )
    .clamped()
    .quantized()
}

/// Non-negative weight per vision state.
///
/// The objective always evaluates every state; a zero weight only removes
/// that state from the score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvdWeights {
    pub none: f64,
    pub deutan: f64,
    pub protan: f64,
    pub tritan: f64,
}

impl CvdWeights {
    /// The same weight for every state.
    pub fn uniform(weight: f64) -> Self {
        Self {
            none: weight,
            deutan: weight,
            protan: weight,
            tritan: weight,
        }
    }

    pub fn get(&self, state: CvdState) -> f64 {
        match state {
            CvdState::None => self.none,
            CvdState::Deutan => self.deutan,
            CvdState::Protan => self.protan,
            CvdState::Tritan => self.tritan,
        }
    }

    /// First state whose weight is negative or not finite.
    pub(crate) fn first_invalid(&self) -> Option<(CvdState, f64)> {
        CvdState::ALL
            .into_iter()
            .map(|s| (s, self.get(s)))
            .find(|&(_, w)| !w.is_finite() || w < 0.0)
    }
}

impl Default for CvdWeights {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}
