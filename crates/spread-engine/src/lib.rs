#![allow(clippy::excessive_precision, clippy::module_inception)]

//! spread-engine: extend a palette with colors that stay distinguishable
//!
//! Given an existing palette, the engine searches for N additional colors
//! that keep every pair (old–new and new–new) as far apart as possible in
//! CIEDE2000, averaged over typical vision and three simulated
//! color-vision deficiencies. New colors are confined to a region derived
//! from the input palette so they still look like they belong.
//!
//! # Quick Start
//!
//! ```
//! use spread_engine::{Palette, PaletteExtender};
//!
//! let palette = Palette::from_hex(&["#4477AA", "#228833"]).unwrap();
//! let result = PaletteExtender::new(palette)
//!     .colors_to_add(1)
//!     .restarts(3)
//!     .iterations(60)
//!     .seed(7)
//!     .run_to_completion()
//!     .unwrap();
//!
//! assert_eq!(result.new_hex().len(), 1);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Palette ──normalize──> compute_bounds ─┐
//!                                        v
//! random start ──> Nelder–Mead ──> Objective::evaluate
//!       ^               │            │
//!       └── restarts ───┘            ├─ decode params -> candidate Srgb
//!                                    ├─ simulate none/deutan/protan/tritan
//!                                    ├─ CIEDE2000 old–new and new–new
//!                                    └─ weighted harmonic mean + penalty
//! ```
//!
//! # Progress and Cancellation
//!
//! [`PaletteExtender::run`] takes a [`ProgressSink`], called after every
//! restart with a [`RestartProgress`]. Returning
//! `ControlFlow::Break(())` ends the run early with the best result so far:
//!
//! ```
//! use std::ops::ControlFlow;
//! use spread_engine::{Palette, PaletteExtender, RestartProgress};
//!
//! let palette = Palette::from_hex(&["#000000"]).unwrap();
//! let mut stop_after_two = |p: &RestartProgress| {
//!     if p.restart == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
//! };
//! let result = PaletteExtender::new(palette)
//!     .restarts(5)
//!     .iterations(20)
//!     .run(&mut stop_after_two)
//!     .unwrap();
//! assert!(result.cancelled);
//! assert_eq!(result.completed_restarts, 2);
//! ```
//!
//! # Color Spaces
//!
//! The search runs in one of five spaces ([`ColorSpace`]): HSL, CIE Lab,
//! CIE LCh, OKLab and OKLCh. Distances are always CIEDE2000 in CIE Lab,
//! whatever the search space.

pub mod api;
pub mod bounds;
pub mod color;
pub mod cvd;
pub mod distance;
pub mod objective;
pub mod optimize;
pub mod palette;


pub use api::{EngineError, OptimizerSettings, PaletteExtender, RunResult};
pub use bounds::{compute_bounds, quantile, width_bounds, Bounds, ChannelBounds};
pub use color::{
    Channel, ChannelRole, Channels, ColorSpace, Hsl, Lab, Lch, LinearRgb, Oklab, Oklch, Srgb,
    UnknownColorSpace, Xyz,
};
pub use cvd::{simulate, CvdState, CvdWeights, UnknownCvdState};
pub use distance::delta_e_2000;
pub use objective::{Evaluation, Objective, StateDistances};
pub use optimize::{
    minimize, Convergence, LocalMinimum, MultiStart, MultiStartRunner, NelderMeadOptions,
    ProgressSink, RestartProgress,
};
pub use palette::{Palette, PaletteError, ParseColorError};
