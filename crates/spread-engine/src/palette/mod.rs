//! Input palettes
//!
//! A [`Palette`] is the validated, non-empty list of existing colors the
//! optimizer has to stay distinguishable from.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;
