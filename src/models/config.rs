use crate::assets::AssetLoader;
use serde::{Deserialize, Serialize};
use spread_engine::{ColorSpace, CvdWeights, NelderMeadOptions, OptimizerSettings};
use utoipa::ToSchema;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for every optimization request
    pub run: RunConfig,

    /// Optimizer internals
    pub tuning: TuningConfig,
}

/// Default run request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    /// Search space (hsl, lab, lch, oklab, oklch)
    #[serde(with = "space_name")]
    pub color_space: ColorSpace,

    /// Number of colors to add
    pub n_cols_to_add: usize,

    /// Number of optimizer restarts
    pub n_optim_runs: usize,

    /// Nelder-Mead iterations per restart
    pub nm_iterations: usize,

    /// Bounds tightness per channel (0 = unconstrained, 1 = palette span)
    pub widths: [f64; 3],

    /// Weight of each simulated vision type
    pub colorblind_weights: WeightsConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Oklab,
            n_cols_to_add: 1,
            n_optim_runs: 10,
            nm_iterations: 300,
            widths: [0.5; 3],
            colorblind_weights: WeightsConfig::default(),
        }
    }
}

/// Per-state weights as they appear in YAML
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub none: f64,
    pub deutan: f64,
    pub protan: f64,
    pub tritan: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            none: 1.0,
            deutan: 1.0,
            protan: 1.0,
            tritan: 0.5,
        }
    }
}

impl From<WeightsConfig> for CvdWeights {
    fn from(w: WeightsConfig) -> Self {
        CvdWeights {
            none: w.none,
            deutan: w.deutan,
            protan: w.protan,
            tritan: w.tritan,
        }
    }
}

/// Optimizer constants that rarely need changing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TuningConfig {
    pub penalty_weight: f64,
    pub initial_step: f64,
    pub tolerance: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            penalty_weight: 1e-3,
            initial_step: 0.5,
            tolerance: 1e-6,
        }
    }
}

/// Request-level overrides; every field left out keeps the configured value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RunOverrides {
    #[serde(with = "space_name::option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "oklch", default = json!(null))]
    pub color_space: Option<ColorSpace>,
    pub n_cols_to_add: Option<usize>,
    pub n_optim_runs: Option<usize>,
    pub nm_iterations: Option<usize>,
    #[schema(value_type = Option<Vec<f64>>)]
    pub widths: Option<[f64; 3]>,
    pub colorblind_weights: Option<WeightOverrides>,
    /// Fixed random seed for a reproducible run
    pub seed: Option<u64>,
}

/// Partial weights; missing states keep the configured weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct WeightOverrides {
    pub none: Option<f64>,
    pub deutan: Option<f64>,
    pub protan: Option<f64>,
    pub tritan: Option<f64>,
}

impl RunOverrides {
    /// Merge onto `base`, field by field.
    pub fn apply(&self, base: &RunConfig) -> RunConfig {
        let weights = match self.colorblind_weights {
            Some(w) => WeightsConfig {
                none: w.none.unwrap_or(base.colorblind_weights.none),
                deutan: w.deutan.unwrap_or(base.colorblind_weights.deutan),
                protan: w.protan.unwrap_or(base.colorblind_weights.protan),
                tritan: w.tritan.unwrap_or(base.colorblind_weights.tritan),
            },
            None => base.colorblind_weights,
        };
        RunConfig {
            color_space: self.color_space.unwrap_or(base.color_space),
            n_cols_to_add: self.n_cols_to_add.unwrap_or(base.n_cols_to_add),
            n_optim_runs: self.n_optim_runs.unwrap_or(base.n_optim_runs),
            nm_iterations: self.nm_iterations.unwrap_or(base.nm_iterations),
            widths: self.widths.unwrap_or(base.widths),
            colorblind_weights: weights,
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        space = %config.run.color_space,
                        restarts = config.run.n_optim_runs,
                        iterations = config.run.nm_iterations,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Engine settings for a request: overrides merged onto the configured
    /// run defaults, plus the tuning section.
    pub fn settings(&self, overrides: &RunOverrides) -> OptimizerSettings {
        let run = overrides.apply(&self.run);
        OptimizerSettings {
            space: run.color_space,
            n_colors_to_add: run.n_cols_to_add,
            restarts: run.n_optim_runs,
            iterations: run.nm_iterations,
            widths: run.widths,
            cvd_weights: run.colorblind_weights.into(),
            penalty_weight: self.tuning.penalty_weight,
            nelder_mead: NelderMeadOptions::new()
                .initial_step(self.tuning.initial_step)
                .tolerance(self.tuning.tolerance),
            seed: overrides.seed,
        }
    }
}

/// Serialize a [`ColorSpace`] by its lowercase name.
mod space_name {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use spread_engine::ColorSpace;

    pub fn serialize<S: Serializer>(space: &ColorSpace, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(space.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ColorSpace, D::Error> {
        let name = String::deserialize(d)?;
        name.parse().map_err(D::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            space: &Option<ColorSpace>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match space {
                Some(space) => s.serialize_some(space.name()),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<ColorSpace>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|name| name.parse().map_err(D::Error::custom))
                .transpose()
        }
    }
}
