//! Test fixtures and constants.

use serde_json::{json, Value};

/// Palettes used across tests
pub mod palettes {
    /// Two-color palette from the Tol bright scheme
    pub const BLUE_GREEN: [&str; 2] = ["#4477AA", "#228833"];

    /// Three saturated colors
    pub const TOL_THREE: [&str; 3] = ["#EE6677", "#66CCEE", "#CCBB44"];

    /// Red/green pair that collapses under deutan
    pub const RED_GREEN: [&str; 2] = ["#CC3311", "#669900"];

    pub const BLACK: [&str; 1] = ["#000000"];
}

/// Seed shared by reproducibility tests
pub const SEED: u64 = 2024;

/// Optimize request that runs quickly and deterministically
pub fn quick_request(colors: &[&str]) -> Value {
    json!({
        "colors": colors,
        "nOptimRuns": 2,
        "nmIterations": 40,
        "seed": SEED,
    })
}
