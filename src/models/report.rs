use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spread_engine::{OptimizerSettings, Palette, RunResult, StateDistances};
use utoipa::ToSchema;

/// Outcome of one optimization run as returned by the API and `extend --json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Input palette as uppercase hex
    pub input_colors: Vec<String>,
    #[schema(example = "oklab")]
    pub color_space: String,
    /// Objective value of the best candidate (lower is better)
    pub best_score: f64,
    /// Colors to append, in increasing lightness
    pub new_colors: Vec<String>,
    #[schema(example = "converged (spread)")]
    pub convergence_reason: String,
    /// Best-so-far score after each completed restart
    pub progress_sequence: Vec<f64>,
    pub state_distances: StateDistancesReport,
    pub completed_restarts: usize,
    /// Whether the run was stopped before its last restart
    pub cancelled: bool,
    pub seed: Option<u64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Harmonic-mean distance of the best candidate per vision state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StateDistancesReport {
    pub none: f64,
    pub deutan: f64,
    pub protan: f64,
    pub tritan: f64,
}

impl From<StateDistances> for StateDistancesReport {
    fn from(d: StateDistances) -> Self {
        Self {
            none: d.none,
            deutan: d.deutan,
            protan: d.protan,
            tritan: d.tritan,
        }
    }
}

impl RunReport {
    pub fn new(
        palette: &Palette,
        settings: &OptimizerSettings,
        result: RunResult,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let elapsed_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        Self {
            input_colors: palette.to_hex(),
            color_space: settings.space.name().to_string(),
            best_score: result.best_score,
            new_colors: result.new_hex(),
            convergence_reason: result.convergence.to_string(),
            progress_sequence: result.progress,
            state_distances: result.state_distances.into(),
            completed_restarts: result.completed_restarts,
            cancelled: result.cancelled,
            seed: settings.seed,
            started_at,
            finished_at,
            elapsed_ms,
        }
    }

    /// Input palette followed by the new colors
    pub fn full_palette(&self) -> Vec<String> {
        self.input_colors
            .iter()
            .chain(&self.new_colors)
            .cloned()
            .collect()
    }
}
