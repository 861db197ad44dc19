//! Free-form palette text to colors.
//!
//! Accepts whatever users paste: one color per line, comma separated lists,
//! JSON-ish arrays, quoted strings. Anything that is not a six-digit hex color
//! is dropped and reported back.

use regex::Regex;
use spread_engine::{Palette, PaletteError, Srgb};
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;]+").expect("static regex"));

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9A-Fa-f]{6}$").expect("static regex"));

const TRIM_CHARS: &[char] = &['"', '\'', '`', '[', ']', '(', ')', '{', '}'];

/// Colors found in a block of text, plus every token that was not one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPalette {
    pub colors: Vec<Srgb>,
    pub rejected: Vec<String>,
}

impl ParsedPalette {
    pub fn hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] when no token was a valid color.
    pub fn into_palette(self) -> Result<Palette, PaletteError> {
        Palette::new(&self.colors)
    }
}

/// Split `text` into tokens and keep the hex colors, in input order.
pub fn parse_palette_text(text: &str) -> ParsedPalette {
    let mut parsed = ParsedPalette::default();

    for raw in SEPARATOR.split(text) {
        let token = raw.trim_matches(TRIM_CHARS);
        if token.is_empty() {
            continue;
        }
        let color = HEX_COLOR
            .is_match(token)
            .then(|| token.parse::<Srgb>().ok())
            .flatten();
        match color {
            Some(color) => parsed.colors.push(color),
            None => {
                tracing::debug!(token = %raw, "Ignoring token that is not a hex color");
                parsed.rejected.push(raw.to_string());
            }
        }
    }

    parsed
}

/// Parse a list of color strings, each of which may itself hold several colors.
pub fn parse_palette_list<S: AsRef<str>>(items: &[S]) -> ParsedPalette {
    let mut parsed = ParsedPalette::default();
    for item in items {
        let ParsedPalette { colors, rejected } = parse_palette_text(item.as_ref());
        parsed.colors.extend(colors);
        parsed.rejected.extend(rejected);
    }
    parsed
}
