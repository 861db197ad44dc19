//! Error types for palette input
//!
//! This module provides error types for color parsing and palette validation.

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    /// Hex string does not have exactly 6 digits after stripping '#'
    #[error("invalid hex color length (expected 6 hex digits)")]
    InvalidLength,
    /// Non-hexadecimal character in the digits
    #[error("invalid hex digits: {0}")]
    InvalidHex(String),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// A color at the given position did not parse
    #[error("invalid color at index {index}: {source}")]
    ParseColor {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}
