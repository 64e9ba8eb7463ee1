use std::path::PathBuf;

use async_trait::async_trait;
use image::RgbImage;
use thiserror::Error;

use crate::region::TextRegion;

#[derive(Debug, Clone)]
pub enum OcrInput {
    /// Image file on disk; the engine decodes it.
    FilePath(PathBuf),
    /// Already decoded 3-channel pixels.
    Pixels(RgbImage),
}

#[derive(Debug, Clone, Default)]
pub struct OcrOutput {
    /// Regions in the order the engine produced them.
    pub regions: Vec<TextRegion>,
}

impl OcrOutput {
    pub fn new(regions: Vec<TextRegion>) -> Self {
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("languages {0:?} cannot share one recognition model")]
    IncompatibleLanguages(Vec<String>),
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("engine error: {0}")]
    EngineError(String),
}

/// Recognition entry point shared by every engine backend.
///
/// Implementations must be safe to call concurrently from several requests.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError>;
}

/// Loads the pixels behind an [`OcrInput`], converting to RGB when needed.
pub fn load_rgb(input: &OcrInput) -> Result<RgbImage, OcrError> {
    match input {
        OcrInput::FilePath(path) => {
            if !path.exists() {
                return Err(OcrError::InvalidInput(format!(
                    "image file not found: {}",
                    path.display()
                )));
            }
            Ok(image::open(path)?.into_rgb8())
        }
        OcrInput::Pixels(pixels) => Ok(pixels.clone()),
    }
}
