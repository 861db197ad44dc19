//! Color types and conversions
//!
//! Every conversion starts from or ends at [`Srgb`], the interchange type:
//!
//! ```text
//! Srgb ── Hsl
//!  │
//! LinearRgb ── Xyz ── Lab ── Lch
//!  │
//! Oklab ── Oklch
//! ```
//!
//! [`ColorSpace`] picks one of the five optimization spaces and exposes its
//! channel schema together with `decode`/`encode`/`normalize`/`unscale`.
//!
//! # Example
//!
//! ```
//! use spread_engine::{ColorSpace, Srgb};
//!
//! let color: Srgb = "#4477AA".parse().unwrap();
//! let channels = ColorSpace::Oklch.decode(color);
//! assert_eq!(ColorSpace::Oklch.encode(channels).to_hex(), "#4477AA");
//! ```

mod cielab;
mod hsl;
mod linear_rgb;
mod oklab;
mod polar;
mod space;
mod srgb;

pub use cielab::{Lab, Lch, Xyz};
pub use hsl::Hsl;
pub use linear_rgb::LinearRgb;
pub use oklab::{Oklab, Oklch};
pub use space::{Channel, ChannelRole, Channels, ColorSpace, UnknownColorSpace};
pub use srgb::Srgb;

impl From<Srgb> for Lab {
    fn from(color: Srgb) -> Self {
        Lab::from(LinearRgb::from(color))
    }
}
