//! Public API: the [`PaletteExtender`] builder, its [`OptimizerSettings`],
//! the [`RunResult`] it produces and the [`EngineError`] it can fail with.

mod builder;
mod error;
mod settings;

pub use builder::{PaletteExtender, RunResult};
pub use error::EngineError;
pub use settings::OptimizerSettings;
