//! Decoding of uploaded image bytes.

use image::{DynamicImage, ImageFormat, RgbImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data is empty")]
    EmptyData,

    #[error("cannot identify image file: {0}")]
    DecodeFailed(#[from] image::ImageError),
}

/// Decoded upload, normalized to 3-channel RGB.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: RgbImage,
    /// Format guessed from the leading bytes, if recognized.
    pub format: Option<ImageFormat>,
    /// Whether the source needed conversion to RGB.
    pub converted: bool,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Converts any color mode (grayscale, alpha, 16-bit, float) to 8-bit RGB.
pub fn to_rgb(image: DynamicImage) -> (RgbImage, bool) {
    match image {
        DynamicImage::ImageRgb8(rgb) => (rgb, false),
        other => (other.into_rgb8(), true),
    }
}

/// Decodes raw upload bytes, guessing the format from its magic bytes.
pub fn decode_upload(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = image::guess_format(bytes).ok();
    let image = image::load_from_memory(bytes)?;
    let (pixels, converted) = to_rgb(image);

    Ok(DecodedImage {
        pixels,
        format,
        converted,
    })
}
