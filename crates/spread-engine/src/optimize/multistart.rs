//! Repeated local search from random starting points

use std::ops::ControlFlow;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::nelder_mead::{minimize, Convergence, LocalMinimum, NelderMeadOptions};

/// Snapshot passed to a [`ProgressSink`] after every restart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartProgress {
    /// 1-based index of the restart that just finished.
    pub restart: usize,
    pub total: usize,
    /// `restart / total` as a percentage.
    pub percent: f64,
    /// Best objective value seen so far.
    pub best_score: f64,
}

/// Receives progress between restarts and decides whether to go on.
///
/// Returning `ControlFlow::Break(())` stops the run before the next restart;
/// the best result found so far is still returned. Any
/// `FnMut(&RestartProgress) -> ControlFlow<()>` closure is a sink.
pub trait ProgressSink {
    fn restart_finished(&mut self, progress: &RestartProgress) -> ControlFlow<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(&RestartProgress) -> ControlFlow<()>,
{
    fn restart_finished(&mut self, progress: &RestartProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Outcome of a multi-start run.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStart {
    pub best: LocalMinimum,
    /// Best-so-far value after each completed restart.
    pub progress: Vec<f64>,
    pub cancelled: bool,
}

impl MultiStart {
    pub fn completed_restarts(&self) -> usize {
        self.progress.len()
    }

    pub fn convergence(&self) -> Convergence {
        self.best.convergence
    }
}

/// Multi-start driver.
#[derive(Debug, Clone)]
pub struct MultiStartRunner {
    pub dimension: usize,
    pub restarts: usize,
    pub max_iterations: usize,
    pub options: NelderMeadOptions,
    /// Fixed seed for reproducible runs; entropy when `None`.
    pub seed: Option<u64>,
}

impl MultiStartRunner {
    /// Run every restart in order, notifying `sink` after each.
    ///
    /// Returns `None` only when `restarts` is zero.
    pub fn run<F, S>(&self, mut objective: F, sink: &mut S) -> Option<MultiStart>
    where
        F: FnMut(&[f64]) -> f64,
        S: ProgressSink + ?Sized,
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut best: Option<LocalMinimum> = None;
        let mut progress = Vec::with_capacity(self.restarts);
        let mut cancelled = false;

        for restart in 1..=self.restarts {
            let x0: Vec<f64> = (0..self.dimension)
                .map(|_| rng.sample(StandardNormal))
                .collect();
            let local = minimize(&mut objective, &x0, &self.options, self.max_iterations);

            tracing::debug!(
                restart,
                total = self.restarts,
                value = local.value,
                iterations = local.iterations,
                convergence = %local.convergence,
                "restart finished"
            );

            let improved = best.as_ref().map_or(true, |b| local.value < b.value);
            if improved {
                best = Some(local);
            }
            let best_score = best.as_ref().map_or(f64::INFINITY, |b| b.value);
            progress.push(best_score);

            let snapshot = RestartProgress {
                restart,
                total: self.restarts,
                percent: restart as f64 / self.restarts as f64 * 100.0,
                best_score,
            };
            if sink.restart_finished(&snapshot).is_break() {
                cancelled = restart < self.restarts;
                if cancelled {
                    tracing::debug!(restart, "run cancelled");
                }
                break;
            }
        }

        best.map(|best| MultiStart {
            best,
            progress,
            cancelled,
        })
    }
}
