//! Unified error type for the spread-engine public API.

use crate::palette::{PaletteError, ParseColorError};

/// Every way a run can be rejected before it starts.
///
/// # Example
///
/// ```
/// use spread_engine::{EngineError, Palette};
///
/// fn load() -> Result<Palette, EngineError> {
///     Ok(Palette::from_hex(&["#000000", "#FFFFFF"])?)
/// }
/// assert!(load().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Palette validation error (empty or unparsable entry)
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// A single color failed to parse
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// A setting is out of range
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
