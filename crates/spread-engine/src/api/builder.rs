//! PaletteExtender builder -- the primary entry point for the crate.
//!
//! [`PaletteExtender`] wires the bounds builder, the objective and the
//! multi-start optimizer together behind a fluent configuration API.

use std::ops::ControlFlow;

use super::error::EngineError;
use super::settings::OptimizerSettings;
use crate::bounds::{compute_bounds, Bounds};
use crate::color::{ColorSpace, Srgb};
use crate::cvd::CvdWeights;
use crate::objective::{Objective, StateDistances};
use crate::optimize::{
    Convergence, MultiStartRunner, NelderMeadOptions, ProgressSink, RestartProgress,
};
use crate::palette::Palette;

/// Everything a finished (or cancelled) run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Objective value of the best parameter vector; lower is better.
    pub best_score: f64,
    pub best_params: Vec<f64>,
    /// The colors to append to the palette, in increasing lightness.
    pub new_colors: Vec<Srgb>,
    /// How the restart that produced the best value stopped.
    pub convergence: Convergence,
    /// Best-so-far score after each completed restart (non-increasing).
    pub progress: Vec<f64>,
    /// Harmonic-mean distances of the best candidate per vision state.
    pub state_distances: StateDistances,
    pub completed_restarts: usize,
    /// Whether the progress sink stopped the run early.
    pub cancelled: bool,
    /// Search bounds the run used.
    pub bounds: Bounds,
}

impl RunResult {
    /// New colors as uppercase `#RRGGBB` strings.
    pub fn new_hex(&self) -> Vec<String> {
        self.new_colors.iter().map(|c| c.to_hex()).collect()
    }
}

/// Finds colors to add to a palette.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`run()`](Self::run) takes `&self`, so one extender can run repeatedly
///   (each run draws fresh starting points unless a seed is set)
///
/// # Example
///
/// ```
/// use spread_engine::{ColorSpace, Palette, PaletteExtender};
///
/// let palette = Palette::from_hex(&["#4477AA", "#228833"]).unwrap();
/// let result = PaletteExtender::new(palette)
///     .space(ColorSpace::Oklab)
///     .colors_to_add(1)
///     .restarts(2)
///     .iterations(50)
///     .seed(1)
///     .run_to_completion()
///     .unwrap();
///
/// assert_eq!(result.new_colors.len(), 1);
/// assert_eq!(result.progress.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteExtender {
    palette: Palette,
    settings: OptimizerSettings,
}

impl PaletteExtender {
    /// Create an extender with [`OptimizerSettings::default`].
    pub fn new(palette: Palette) -> Self {
        Self::with_settings(palette, OptimizerSettings::default())
    }

    pub fn with_settings(palette: Palette, settings: OptimizerSettings) -> Self {
        Self { palette, settings }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Set the color space searched in.
    #[inline]
    pub fn space(mut self, space: ColorSpace) -> Self {
        self.settings.space = space;
        self
    }

    /// Set how many colors to add.
    #[inline]
    pub fn colors_to_add(mut self, n: usize) -> Self {
        self.settings.n_colors_to_add = n;
        self
    }

    #[inline]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.settings.restarts = restarts;
        self
    }

    /// Set the simplex iteration budget per restart.
    #[inline]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.settings.iterations = iterations;
        self
    }

    /// Set bounds tightness per channel.
    #[inline]
    pub fn widths(mut self, widths: [f64; 3]) -> Self {
        self.settings.widths = widths;
        self
    }

    #[inline]
    pub fn cvd_weights(mut self, weights: CvdWeights) -> Self {
        self.settings.cvd_weights = weights;
        self
    }

    #[inline]
    pub fn penalty_weight(mut self, weight: f64) -> Self {
        self.settings.penalty_weight = weight;
        self
    }

    #[inline]
    pub fn nelder_mead(mut self, options: NelderMeadOptions) -> Self {
        self.settings.nelder_mead = options;
        self
    }

    /// Fix the random seed so runs are reproducible.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    /// Bounds the run will search within.
    pub fn bounds(&self) -> Bounds {
        let space = self.settings.space;
        compute_bounds(&self.palette.normalized(space), space, self.settings.widths)
    }

    /// Run every restart, reporting to `sink` after each one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSettings`] before any work is done if
    /// the settings fail [`OptimizerSettings::validate`].
    pub fn run<S>(&self, sink: &mut S) -> Result<RunResult, EngineError>
    where
        S: ProgressSink + ?Sized,
    {
        let settings = &self.settings;
        settings.validate()?;

        let bounds = self.bounds();
        let objective = Objective::new(
            &self.palette,
            settings.space,
            bounds,
            settings.cvd_weights,
            settings.n_colors_to_add,
            settings.penalty_weight,
        );

        tracing::debug!(
            space = %settings.space,
            colors = self.palette.len(),
            add = settings.n_colors_to_add,
            restarts = settings.restarts,
            iterations = settings.iterations,
            seed = ?settings.seed,
            "starting palette optimization"
        );

        let runner = MultiStartRunner {
            dimension: objective.dimension(),
            restarts: settings.restarts,
            max_iterations: settings.iterations,
            options: settings.nelder_mead,
            seed: settings.seed,
        };
        let outcome = runner
            .run(|x: &[f64]| objective.evaluate(x), sink)
            .ok_or_else(|| EngineError::InvalidSettings("restarts must be at least 1".into()))?;

        let completed_restarts = outcome.completed_restarts();
        let best = outcome.best;
        let evaluation = objective.evaluate_detailed(&best.x);

        Ok(RunResult {
            best_score: best.value,
            new_colors: evaluation.colors,
            best_params: best.x,
            convergence: best.convergence,
            progress: outcome.progress,
            state_distances: evaluation.state_distances,
            completed_restarts,
            cancelled: outcome.cancelled,
            bounds,
        })
    }

    /// Run without progress reporting or cancellation.
    pub fn run_to_completion(&self) -> Result<RunResult, EngineError> {
        self.run(&mut |_: &RestartProgress| ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extender() -> PaletteExtender {
        let palette = Palette::from_hex(&["#4477AA", "#228833", "#EE6677"]).unwrap();
        PaletteExtender::new(palette)
            .restarts(3)
            .iterations(60)
            .seed(11)
    }

    #[test]
    fn test_new_defaults() {
        let ext = PaletteExtender::new(Palette::from_hex(&["#000000"]).unwrap());
        assert_eq!(ext.settings(), &OptimizerSettings::default());
    }

    #[test]
    fn test_builder_chaining() {
        let ext = extender()
            .space(ColorSpace::Hsl)
            .colors_to_add(2)
            .widths([0.1, 0.2, 0.3])
            .penalty_weight(0.0)
            .cvd_weights(CvdWeights::uniform(2.0));
        let s = ext.settings();
        assert_eq!(s.space, ColorSpace::Hsl);
        assert_eq!(s.n_colors_to_add, 2);
        assert_eq!(s.widths, [0.1, 0.2, 0.3]);
        assert_eq!(s.penalty_weight, 0.0);
        assert_eq!(s.cvd_weights, CvdWeights::uniform(2.0));
        assert_eq!(s.seed, Some(11));
    }

    #[test]
    fn test_invalid_settings_rejected_before_running() {
        let mut calls = 0;
        let mut sink = |_: &RestartProgress| {
            calls += 1;
            ControlFlow::Continue(())
        };
        let err = extender().iterations(3).run(&mut sink).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSettings(_)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_result_shape() {
        let result = extender().colors_to_add(2).run_to_completion().unwrap();
        assert_eq!(result.new_colors.len(), 2);
        assert_eq!(result.best_params.len(), 6);
        assert_eq!(result.completed_restarts, 3);
        assert_eq!(result.progress.len(), 3);
        assert!(!result.cancelled);
        assert_eq!(*result.progress.last().unwrap(), result.best_score);
        assert_eq!(result.new_hex().len(), 2);
    }

    #[test]
    fn test_best_score_matches_reevaluation() {
        let ext = extender();
        let result = ext.run_to_completion().unwrap();
        let settings = ext.settings();
        let objective = Objective::new(
            ext.palette(),
            settings.space,
            result.bounds,
            settings.cvd_weights,
            settings.n_colors_to_add,
            settings.penalty_weight,
        );
        assert_eq!(objective.evaluate(&result.best_params), result.best_score);
    }

    #[test]
    fn test_cancel_after_first_restart() {
        let mut sink = |_: &RestartProgress| ControlFlow::Break(());
        let result = extender().run(&mut sink).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.completed_restarts, 1);
        assert_eq!(result.new_colors.len(), 1);
    }
}
