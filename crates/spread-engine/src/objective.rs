//! The score minimized by the optimizer
//!
//! A parameter vector holds three unconstrained reals per new color. Each
//! value is squashed through a logistic into its channel's bounds, so any
//! point in parameter space decodes to an admissible color:
//!
//! ```text
//! params ──logistic──> normalized channels ──unscale──> space units ──encode──> Srgb
//! ```
//!
//! The lightness channel is special: every color after the first adds
//! `exp(p)` to the running sum before squashing, which keeps the new colors
//! in strictly increasing lightness and removes the permutation symmetry
//! between them.
//!
//! The score is the negated, CVD-weighted harmonic mean of CIEDE2000
//! distances plus a small L2 penalty that keeps parameters out of the flat
//! tails of the logistic.

use crate::bounds::{Bounds, ChannelBounds};
use crate::color::{ChannelRole, Channels, ColorSpace, Lab, Srgb};
use crate::cvd::{simulate, CvdState, CvdWeights};
use crate::distance::delta_e_2000;
use crate::palette::Palette;

/// Floor applied to each distance before taking reciprocals.
const DISTANCE_EPSILON: f64 = 1e-6;

/// Harmonic-mean distance per vision state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateDistances {
    pub none: f64,
    pub deutan: f64,
    pub protan: f64,
    pub tritan: f64,
}

impl StateDistances {
    pub fn get(&self, state: CvdState) -> f64 {
        match state {
            CvdState::None => self.none,
            CvdState::Deutan => self.deutan,
            CvdState::Protan => self.protan,
            CvdState::Tritan => self.tritan,
        }
    }

    fn set(&mut self, state: CvdState, value: f64) {
        match state {
            CvdState::None => self.none = value,
            CvdState::Deutan => self.deutan = value,
            CvdState::Protan => self.protan = value,
            CvdState::Tritan => self.tritan = value,
        }
    }

    /// `(state, distance)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (CvdState, f64)> + '_ {
        CvdState::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

/// Full breakdown of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    /// The decoded candidate colors.
    pub colors: Vec<Srgb>,
    pub state_distances: StateDistances,
}

#[inline]
fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[inline]
fn into_range(s: f64, bounds: ChannelBounds) -> f64 {
    bounds.low + s * (bounds.high - bounds.low)
}

/// Harmonic mean with each value floored at [`DISTANCE_EPSILON`]; 0 when
/// there are no values.
fn harmonic_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let reciprocal_sum: f64 = values.iter().map(|&d| 1.0 / d.max(DISTANCE_EPSILON)).sum();
    values.len() as f64 / reciprocal_sum
}

/// Objective over the parameter vectors for `n_new` new colors.
///
/// Built once per run. The simulated Lab values of the existing palette are
/// computed here and reused by every evaluation.
#[derive(Debug, Clone)]
pub struct Objective {
    space: ColorSpace,
    bounds: Bounds,
    weights: CvdWeights,
    n_new: usize,
    penalty_weight: f64,
    /// Existing palette under each state, indexed like [`CvdState::ALL`].
    existing: [Vec<Lab>; 4],
}

impl Objective {
    pub fn new(
        palette: &Palette,
        space: ColorSpace,
        bounds: Bounds,
        weights: CvdWeights,
        n_new: usize,
        penalty_weight: f64,
    ) -> Self {
        let existing = CvdState::ALL.map(|state| {
            palette
                .colors()
                .iter()
                .map(|&c| Lab::from(simulate(c, state)))
                .collect()
        });
        Self {
            space,
            bounds,
            weights,
            n_new,
            penalty_weight,
            existing,
        }
    }

    /// Length of the parameter vector this objective expects.
    pub fn dimension(&self) -> usize {
        self.n_new * 3
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Map parameters to normalized channel triples, one per new color.
    ///
    /// `params` must hold exactly [`dimension`](Self::dimension) values.
    pub fn decode_normalized(&self, params: &[f64]) -> Vec<Channels> {
        debug_assert_eq!(
            params.len(),
            self.dimension(),
            "parameter vector does not match {} new colors",
            self.n_new
        );
        let at = |color: usize, channel: usize| params[color * 3 + channel];
        let mut out = vec![[0.0; 3]; self.n_new];

        for (ch, channel) in self.space.channels().iter().enumerate() {
            let bounds = self.bounds.channel(ch);
            match channel.role {
                ChannelRole::Lightness => {
                    let mut cumulative = 0.0;
                    for (k, color) in out.iter_mut().enumerate() {
                        let raw = at(k, ch);
                        cumulative = if k == 0 { raw } else { cumulative + raw.exp() };
                        color[ch] = into_range(logistic(cumulative), bounds);
                    }
                }
                ChannelRole::Hue => {
                    let span = bounds.circular_span();
                    for (k, color) in out.iter_mut().enumerate() {
                        let s = logistic(at(k, ch));
                        color[ch] = (bounds.low + s * span).rem_euclid(1.0);
                    }
                }
                ChannelRole::Chroma | ChannelRole::Other => {
                    for (k, color) in out.iter_mut().enumerate() {
                        color[ch] = into_range(logistic(at(k, ch)), bounds);
                    }
                }
            }
        }
        out
    }

    /// Map parameters to the candidate colors, snapped to 8-bit.
    pub fn decode(&self, params: &[f64]) -> Vec<Srgb> {
        self.decode_normalized(params)
            .into_iter()
            .map(|n| self.space.encode(self.space.unscale(n)).quantized())
            .collect()
    }

    /// Objective value; lower is better.
    pub fn evaluate(&self, params: &[f64]) -> f64 {
        self.evaluate_detailed(params).score
    }

    pub fn evaluate_detailed(&self, params: &[f64]) -> Evaluation {
        let penalty = self.penalty_weight * params.iter().map(|p| p * p).sum::<f64>();
        self.score_candidates(self.decode(params), penalty)
    }

    /// Score already-decoded candidates with a precomputed penalty term.
    pub(crate) fn score_candidates(&self, colors: Vec<Srgb>, penalty: f64) -> Evaluation {
        let mut state_distances = StateDistances::default();
        let mut weighted = 0.0;
        let mut distances = Vec::new();

        for (existing, state) in self.existing.iter().zip(CvdState::ALL) {
            let candidates: Vec<Lab> = colors
                .iter()
                .map(|&c| Lab::from(simulate(c, state)))
                .collect();

            distances.clear();
            for &old in existing {
                distances.extend(candidates.iter().map(|&new| delta_e_2000(old, new)));
            }
            for (i, &a) in candidates.iter().enumerate() {
                distances.extend(candidates[i + 1..].iter().map(|&b| delta_e_2000(a, b)));
            }

            let mean = harmonic_mean(&distances);
            state_distances.set(state, mean);
            weighted += self.weights.get(state) * mean;
        }

        Evaluation {
            score: -weighted + penalty,
            colors,
            state_distances,
        }
    }
}
