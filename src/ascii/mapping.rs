//! Brightness to glyph and color mapping.

use super::charset::GlyphRamp;
use super::grayscale::Brightness;
use super::palette::{Color, Palette};

/// One cell of a rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderedCell {
    pub glyph: char,
    pub color: Color,
}

/// Map a brightness sample to a glyph and a color.
///
/// Glyph and color are quantized independently:
/// `floor(b / 255 * (len - 1))` over the ramp and over the palette, so glyph
/// density and color tier can have different resolutions.
///
/// # Example
/// ```
/// use asciify::ascii::{map_brightness, Brightness, GlyphRamp, Palette, RampOrder};
///
/// let ramp = GlyphRamp::new(" .:-=+*#%@", RampOrder::BrightIsDense).unwrap();
/// let palette = Palette::parse(&["#000", "#fff"]).unwrap();
///
/// let cell = map_brightness(Brightness::WHITE, &ramp, &palette);
/// assert_eq!(cell.glyph, '@');
/// assert_eq!(cell.color.to_string(), "#ffffff");
/// ```
#[inline]
pub fn map_brightness(
    brightness: Brightness,
    ramp: &GlyphRamp,
    palette: &Palette,
) -> RenderedCell {
    RenderedCell {
        glyph: ramp.glyph(brightness.level(ramp.len())),
        color: palette.color(brightness.level(palette.len())),
    }
}

/// Map a slice of brightness samples, preserving order.
pub fn map_all(
    brightness: &[Brightness],
    ramp: &GlyphRamp,
    palette: &Palette,
) -> Vec<RenderedCell> {
    brightness
        .iter()
        .map(|&b| map_brightness(b, ramp, palette))
        .collect()
}
