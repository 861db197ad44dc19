//! Run configuration and its validation.

use super::error::EngineError;
use crate::color::ColorSpace;
use crate::cvd::CvdWeights;
use crate::optimize::NelderMeadOptions;

/// Smallest accepted iteration budget per restart.
pub const MIN_ITERATIONS: usize = 10;

/// Everything a run needs besides the palette.
///
/// # Defaults
///
/// - `space`: OKLab
/// - `n_colors_to_add`: 1
/// - `restarts`: 10
/// - `iterations`: 300
/// - `widths`: 0.5 on every channel
/// - `cvd_weights`: 1.0 for every state
/// - `penalty_weight`: 1e-3
/// - `nelder_mead`: step 0.5, tolerance 1e-6
/// - `seed`: none (entropy)
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerSettings {
    pub space: ColorSpace,
    pub n_colors_to_add: usize,
    /// Number of independent local searches.
    pub restarts: usize,
    /// Simplex iteration budget per restart.
    pub iterations: usize,
    /// Bounds tightness per channel, in channel order: 0 leaves the channel
    /// unconstrained, 1 restricts it to the palette's quantile span.
    pub widths: [f64; 3],
    pub cvd_weights: CvdWeights,
    /// Weight of the L2 penalty on the raw parameters.
    pub penalty_weight: f64,
    pub nelder_mead: NelderMeadOptions,
    pub seed: Option<u64>,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            space: ColorSpace::default(),
            n_colors_to_add: 1,
            restarts: 10,
            iterations: 300,
            widths: [0.5; 3],
            cvd_weights: CvdWeights::default(),
            penalty_weight: 1e-3,
            nelder_mead: NelderMeadOptions::default(),
            seed: None,
        }
    }
}

impl OptimizerSettings {
    /// Check every field; the first violation is reported.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: String| Err(EngineError::InvalidSettings(msg));

        if self.n_colors_to_add < 1 {
            return invalid("n_colors_to_add must be at least 1".into());
        }
        if self.restarts < 1 {
            return invalid("restarts must be at least 1".into());
        }
        if self.iterations < MIN_ITERATIONS {
            return invalid(format!(
                "iterations must be at least {MIN_ITERATIONS}, got {}",
                self.iterations
            ));
        }
        for (i, &w) in self.widths.iter().enumerate() {
            if !(0.0..=1.0).contains(&w) {
                return invalid(format!("width {i} must be within [0, 1], got {w}"));
            }
        }
        if let Some((state, w)) = self.cvd_weights.first_invalid() {
            return invalid(format!("{state} weight must be finite and non-negative, got {w}"));
        }
        if !self.penalty_weight.is_finite() || self.penalty_weight < 0.0 {
            return invalid(format!(
                "penalty_weight must be finite and non-negative, got {}",
                self.penalty_weight
            ));
        }
        let step = self.nelder_mead.initial_step;
        if !step.is_finite() || step <= 0.0 {
            return invalid(format!("initial_step must be positive, got {step}"));
        }
        let tolerance = self.nelder_mead.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return invalid(format!("tolerance must be non-negative, got {tolerance}"));
        }
        Ok(())
    }
}
