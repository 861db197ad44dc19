//! Multi-start Nelder–Mead minimization.
//!
//! [`minimize`] runs one downhill-simplex search; [`MultiStartRunner`]
//! repeats it from standard-normal starting points and keeps the best.

mod multistart;
mod nelder_mead;

pub use multistart::{MultiStart, MultiStartRunner, ProgressSink, RestartProgress};
pub use nelder_mead::{minimize, Convergence, LocalMinimum, NelderMeadOptions};
