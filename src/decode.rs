//! Image decoding with a one-shot format conversion fallback.
//!
//! Decoding is the only step of the pipeline that may take a while, so
//! [`decode_async`] moves it onto tokio's blocking pool and hands back a
//! single settled result.

use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use thiserror::Error;

/// JPEG quality used when re-encoding through the fallback converter.
pub const FALLBACK_JPEG_QUALITY: u8 = 95;

/// Errors that can occur while turning bytes into a usable bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Format not recognized or not supported
    #[error("unsupported image format: {0}")]
    Unsupported(String),
    /// Recognized format but the data is broken
    #[error("corrupt image data: {0}")]
    Corrupt(String),
    /// Decoded fine but has no pixels
    #[error("image has zero width or height")]
    EmptyImage,
    /// Asked to sample into a grid with no cells
    #[error("target grid has zero columns or rows")]
    EmptyGrid,
    /// Fallback conversion could not produce a decodable image
    #[error("format conversion failed: {0}")]
    ConversionFailed(String),
    /// The decode task panicked or was cancelled
    #[error("decode task did not complete: {0}")]
    Interrupted(String),
}

impl From<ImageError> for DecodeError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::Unsupported(_) => DecodeError::Unsupported(e.to_string()),
            other => DecodeError::Corrupt(other.to_string()),
        }
    }
}

/// Turns raw file bytes into a decoded bitmap.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError>;
}

/// Rewrites bytes the decoder rejected into a format it accepts.
pub trait FormatConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError>;
}

/// Fallback converter that tries every format the `image` crate can read,
/// explicitly rather than by signature, and re-encodes the first hit as JPEG.
///
/// This rescues formats without a magic number (TGA) and files whose
/// signature is damaged but whose payload is intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReencodeConverter;

impl FormatConverter for ReencodeConverter {
    fn convert(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let decoded = ImageFormat::all()
            .filter(|format| format.reading_enabled())
            .find_map(|format| {
                image::load_from_memory_with_format(bytes, format)
                    .ok()
                    .map(|img| (format, img))
            });

        let Some((format, img)) = decoded else {
            return Err(DecodeError::ConversionFailed(
                "no decoder accepted the data".to_string(),
            ));
        };
        log::debug!("fallback decoded data as {:?}, re-encoding to JPEG", format);

        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut out, FALLBACK_JPEG_QUALITY))
            .map_err(|e| DecodeError::ConversionFailed(e.to_string()))?;
        Ok(out)
    }
}

/// Decoder backed by the `image` crate, sniffing the format from the data.
///
/// When sniffing or decoding fails the bytes go through the configured
/// [`FormatConverter`] once and are decoded again. If that also fails the
/// original error is returned.
pub struct StandardDecoder {
    converter: Option<Box<dyn FormatConverter>>,
}

impl StandardDecoder {
    /// Decoder with the [`ReencodeConverter`] fallback.
    pub fn new() -> Self {
        Self {
            converter: Some(Box::new(ReencodeConverter)),
        }
    }

    /// Decoder that never retries.
    pub fn without_fallback() -> Self {
        Self { converter: None }
    }

    pub fn with_converter(converter: impl FormatConverter + 'static) -> Self {
        Self {
            converter: Some(Box::new(converter)),
        }
    }

    pub fn has_fallback(&self) -> bool {
        self.converter.is_some()
    }
}

impl Default for StandardDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageDecoder for StandardDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        let err = match decode_sniffed(bytes) {
            Ok(img) => return non_empty(img),
            Err(e) => e,
        };

        let Some(converter) = &self.converter else {
            return Err(err);
        };
        log::warn!("decode failed ({}), retrying via format conversion", err);

        let converted = match converter.convert(bytes) {
            Ok(converted) => converted,
            Err(e) => {
                log::warn!("format conversion failed: {}", e);
                return Err(err);
            }
        };

        match decode_sniffed(&converted) {
            Ok(img) => non_empty(img),
            Err(e) => {
                log::warn!("converted image still did not decode: {}", e);
                Err(err)
            }
        }
    }
}

fn decode_sniffed(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::Unsupported(
            "could not detect image format".to_string(),
        ));
    }
    Ok(reader.decode()?)
}

fn non_empty(img: DynamicImage) -> Result<DynamicImage, DecodeError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    Ok(img)
}

/// Run a decoder on the blocking pool and wait for its single result.
pub async fn decode_async<D>(decoder: Arc<D>, bytes: Vec<u8>) -> Result<DynamicImage, DecodeError>
where
    D: ImageDecoder + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || decoder.decode(&bytes))
        .await
        .map_err(|e| DecodeError::Interrupted(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / width.max(1)) as u8;
            Rgb([v, v, v])
        }))
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode(&gradient(8, 4), ImageFormat::Png);
        let img = StandardDecoder::new().decode(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
    }

    #[test]
    fn test_decode_garbage_is_unsupported() {
        let err = StandardDecoder::new()
            .decode(b"not an image at all")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported(_)), "got {:?}", err);
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(StandardDecoder::new().decode(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png_is_corrupt() {
        let mut bytes = encode(&gradient(16, 16), ImageFormat::Png);
        bytes.truncate(bytes.len() / 2);
        let err = StandardDecoder::without_fallback()
            .decode(&bytes)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Corrupt(_)), "got {:?}", err);
    }

    #[test]
    fn test_tga_needs_fallback() {
        let bytes = encode(&gradient(6, 3), ImageFormat::Tga);
        assert!(StandardDecoder::without_fallback().decode(&bytes).is_err());

        let img = StandardDecoder::new().decode(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (6, 3));
    }

    #[test]
    fn test_reencode_produces_jpeg() {
        let bytes = encode(&gradient(6, 3), ImageFormat::Tga);
        let converted = ReencodeConverter.convert(&bytes).unwrap();
        assert_eq!(
            image::guess_format(&converted).unwrap(),
            ImageFormat::Jpeg
        );
    }

    struct FailingConverter;

    impl FormatConverter for FailingConverter {
        fn convert(&self, _bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
            Err(DecodeError::ConversionFailed("nope".to_string()))
        }
    }

    #[test]
    fn test_fallback_failure_surfaces_original_error() {
        let err = StandardDecoder::with_converter(FailingConverter)
            .decode(b"not an image at all")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_decode_async() {
        let bytes = encode(&gradient(5, 5), ImageFormat::Png);
        let decoder = Arc::new(StandardDecoder::new());
        let img = decode_async(decoder, bytes).await.unwrap();
        assert_eq!(img.width(), 5);
    }

    #[tokio::test]
    async fn test_decode_async_dyn_decoder() {
        let decoder: Arc<dyn ImageDecoder> = Arc::new(StandardDecoder::without_fallback());
        assert!(decode_async(decoder, b"junk".to_vec()).await.is_err());
    }
}
