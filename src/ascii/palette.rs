//! Color palette for brightness tiers.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default grayscale palette, darkest to brightest.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#000", "#111", "#333", "#555", "#777", "#999", "#ccc", "#fff",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("invalid color '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("palette needs at least one color")]
    Empty,
}

/// An sRGB color, written out as CSS hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = PaletteError;

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PaletteError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Color::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair =
                    |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Color::new(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// An ordered, immutable list of colors indexed by brightness tier.
///
/// Sized independently of the glyph ramp. A single-color palette is allowed
/// and renders every cell in that color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Parse a palette from CSS hex strings.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        let colors = colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Color>, _>>()?;
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a tier index. Out-of-range tiers clamp to the last color.
    pub fn color(&self, tier: usize) -> Color {
        self.colors[tier.min(self.colors.len() - 1)]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::new(0x00, 0x00, 0x00),
                Color::new(0x11, 0x11, 0x11),
                Color::new(0x33, 0x33, 0x33),
                Color::new(0x55, 0x55, 0x55),
                Color::new(0x77, 0x77, 0x77),
                Color::new(0x99, 0x99, 0x99),
                Color::new(0xcc, 0xcc, 0xcc),
                Color::new(0xff, 0xff, 0xff),
            ],
        }
    }
}
