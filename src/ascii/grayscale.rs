//! RGB to brightness conversion.

/// Brightness of a pixel as the unweighted mean of its red, green and blue
/// channels. Alpha never contributes.
///
/// The value is kept as the raw channel sum (0..=765) so that quantizing it
/// into ramp and palette levels is exact integer math instead of a float
/// division that can land a hair below a level boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Brightness(u16);

impl Brightness {
    /// Largest channel sum, white.
    pub const MAX_SUM: u16 = 255 * 3;

    pub const BLACK: Brightness = Brightness(0);
    pub const WHITE: Brightness = Brightness(Self::MAX_SUM);

    /// Brightness of an RGB pixel.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Brightness(r as u16 + g as u16 + b as u16)
    }

    /// Brightness of a gray pixel with the given level.
    #[inline]
    pub fn from_gray(level: u8) -> Self {
        Brightness(level as u16 * 3)
    }

    /// Mean channel value in [0, 255].
    pub fn value(&self) -> f32 {
        self.0 as f32 / 3.0
    }

    /// Raw channel sum in [0, 765].
    pub fn channel_sum(&self) -> u16 {
        self.0
    }

    /// Quantize into one of `levels` buckets:
    /// `floor(value / 255 * (levels - 1))`, clamped to `[0, levels - 1]`.
    ///
    /// `levels` of 0 or 1 always yield 0.
    #[inline]
    pub fn level(&self, levels: usize) -> usize {
        if levels <= 1 {
            return 0;
        }
        let top = levels - 1;
        let idx = (self.0 as usize * top) / Self::MAX_SUM as usize;
        idx.min(top)
    }
}
