//! Glyph ramp definitions for ASCII rendering.

use thiserror::Error;

/// Standard ASCII density ramp (10 levels).
/// Characters ordered from sparsest (space) to densest (@).
pub const STANDARD_RAMP: &str = " .:-=+*#%@";

/// Block character ramp (5 levels) using Unicode shade blocks.
pub const BLOCKS_RAMP: &str = " ░▒▓█";

/// Minimal ramp (4 levels).
/// Clean, less noisy look.
pub const MINIMAL_RAMP: &str = " .:#";

/// Detailed ramp with 70 levels for large renders.
pub const DETAILED_RAMP: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Which end of the ramp bright pixels land on.
///
/// Ramps are always written sparse to dense. `BrightIsDense` gives the classic
/// "light on dark" look; `BrightIsSparse` inverts it so dark pixels get the
/// busier glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampOrder {
    #[default]
    BrightIsDense,
    BrightIsSparse,
}

impl RampOrder {
    pub fn name(&self) -> &'static str {
        match self {
            RampOrder::BrightIsDense => "bright-is-dense",
            RampOrder::BrightIsSparse => "bright-is-sparse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RampError {
    #[error("glyph ramp needs at least 2 characters, got {0}")]
    TooShort(usize),
    #[error("glyph ramp contains control character {0:?}")]
    ControlChar(char),
}

/// An ordered, immutable sequence of glyphs indexed by brightness level.
///
/// Index 0 is what a brightness of 0 maps to, the last index is what 255
/// maps to. The order is fixed at construction from the written ramp and a
/// [`RampOrder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
    order: RampOrder,
}

impl GlyphRamp {
    /// Build a ramp from a sparse-to-dense string.
    pub fn new(ramp: &str, order: RampOrder) -> Result<Self, RampError> {
        let mut glyphs: Vec<char> = ramp.chars().collect();
        if glyphs.len() < 2 {
            return Err(RampError::TooShort(glyphs.len()));
        }
        // Control glyphs would break rows and the exported XML
        if let Some(&c) = glyphs.iter().find(|c| c.is_control()) {
            return Err(RampError::ControlChar(c));
        }
        if order == RampOrder::BrightIsSparse {
            glyphs.reverse();
        }
        Ok(Self { glyphs, order })
    }

    /// Number of brightness levels this ramp can express.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; a ramp holds at least two glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn order(&self) -> RampOrder {
        self.order
    }

    /// Glyph at a level index. Out-of-range levels clamp to the last glyph.
    pub fn glyph(&self, level: usize) -> char {
        self.glyphs[level.min(self.glyphs.len() - 1)]
    }

    /// Glyphs in brightness order (level 0 first).
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: STANDARD_RAMP.chars().collect(),
            order: RampOrder::BrightIsDense,
        }
    }
}

/// Built-in ramp presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampPreset {
    #[default]
    Standard,
    Blocks,
    Minimal,
    Detailed,
}

impl RampPreset {
    /// Ramp string for this preset, sparse to dense.
    pub fn ramp(&self) -> &'static str {
        match self {
            RampPreset::Standard => STANDARD_RAMP,
            RampPreset::Blocks => BLOCKS_RAMP,
            RampPreset::Minimal => MINIMAL_RAMP,
            RampPreset::Detailed => DETAILED_RAMP,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RampPreset::Standard => "standard",
            RampPreset::Blocks => "blocks",
            RampPreset::Minimal => "minimal",
            RampPreset::Detailed => "detailed",
        }
    }
}
