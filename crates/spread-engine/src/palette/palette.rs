//! The validated input palette.

use super::error::PaletteError;
use crate::color::{ColorSpace, Srgb};

/// A non-empty list of existing colors.
///
/// Order is preserved and duplicates are allowed; neither affects the
/// optimization. Colors are quantized to 8-bit on construction so the palette
/// is exactly what its hex form says.
///
/// # Example
///
/// ```
/// use spread_engine::Palette;
///
/// let palette = Palette::from_hex(&["#4477AA", "#228833"]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.to_hex(), vec!["#4477AA", "#228833"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Create a palette from sRGB colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[Srgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.iter().map(|c| c.quantized()).collect(),
        })
    }

    /// Create a palette from hex strings.
    ///
    /// Unlike host-side text parsing, every entry must be valid; the first
    /// bad entry is reported with its index.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.as_ref()
                    .parse::<Srgb>()
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Uppercase `#RRGGBB` strings in input order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// Every color decoded and normalized into `[0, 1]` for `space`.
    pub fn normalized(&self, space: ColorSpace) -> Vec<[f64; 3]> {
        self.colors
            .iter()
            .map(|&c| space.normalize(space.decode(c)))
            .collect()
    }
}
