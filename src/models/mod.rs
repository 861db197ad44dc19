pub mod config;
pub mod report;

pub use config::{AppConfig, RunConfig, RunOverrides, TuningConfig, WeightOverrides, WeightsConfig};
pub use report::{RunReport, StateDistancesReport};
