//! Image to colored ASCII conversion.
//!
//! The pipeline runs in four steps:
//!
//! 1. **Sizing** - pick a grid that keeps the image aspect ratio
//! 2. **Sampling** - resize the image to the grid and read back brightness
//! 3. **Mapping** - quantize brightness into a glyph and a color tier
//! 4. **Rendering** - assemble cells into markup, plain rows or ANSI text
//!
//! # Glyph ramps
//!
//! Ramps are written sparse to dense. Built-in presets live in
//! [`RampPreset`]; [`RampOrder`] picks which end bright pixels land on.

mod charset;
mod dimensions;
mod downsample;
mod grayscale;
mod grid;
mod mapping;
mod markup;
mod palette;

pub use charset::{
    GlyphRamp, RampError, RampOrder, RampPreset, BLOCKS_RAMP, DETAILED_RAMP, MINIMAL_RAMP,
    STANDARD_RAMP,
};
pub use dimensions::{
    calculate_dimensions_with_aspect, GridSize, SizingError, SizingPolicy, Viewport,
    DEFAULT_CHAR_ASPECT_RATIO, DEFAULT_VIEWPORT_FRACTION,
};
pub use downsample::{sample, BrightnessGrid, Resample};
pub use grayscale::Brightness;
pub use grid::{render, Grid, RenderedGrid};
pub use mapping::{map_all, map_brightness, RenderedCell};
pub use markup::{escape_attr, escape_text, StyledText};
pub use palette::{Color, Palette, PaletteError, DEFAULT_PALETTE};
