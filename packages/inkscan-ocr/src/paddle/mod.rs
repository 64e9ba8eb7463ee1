//! CPU PaddleOCR backend running on ONNX Runtime.
//!
//! Expected files under [`EngineConfig::model_dir`]:
//! - `det.onnx` text detection model
//! - `rec_<script>.onnx` recognition model for the resolved script
//! - `dict_<script>.txt` character dictionary, one character per line

pub mod detection;
pub mod languages;
pub mod preprocess;
pub mod recognition;
mod session;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use image::{imageops, RgbImage};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::engine::{load_rgb, OcrEngine, OcrError, OcrInput, OcrOutput};
use crate::region::TextRegion;

use self::languages::{resolve_script, Script};
use self::recognition::Dictionary;
use self::session::OnnxModel;

const INTRA_THREADS: usize = 4;

macro_rules! progress {
    ($verbose:expr, $($arg:tt)*) => {
        if $verbose {
            info!($($arg)*);
        } else {
            debug!($($arg)*);
        }
    };
}

struct Models {
    detector: OnnxModel,
    recognizer: OnnxModel,
    dictionary: Dictionary,
}

/// Engine handle holding loaded detection and recognition models.
#[derive(Clone)]
pub struct PaddleOcrEngine {
    models: Arc<Models>,
    script: Script,
    languages: Vec<String>,
}

impl std::fmt::Debug for PaddleOcrEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddleOcrEngine")
            .field("script", &self.script)
            .field("languages", &self.languages)
            .field("dictionary_size", &self.models.dictionary.len())
            .finish_non_exhaustive()
    }
}

impl PaddleOcrEngine {
    /// Loads every model the configured languages need.
    pub fn new(config: &EngineConfig) -> Result<Self, OcrError> {
        let script = resolve_script(&config.languages)?;

        if config.gpu {
            warn!("GPU execution is not available, defaulting to CPU");
        }

        let det_path = config.model_dir.join("det.onnx");
        let rec_path = config.model_dir.join(format!("rec_{}.onnx", script.name()));
        let dict_path = config.model_dir.join(format!("dict_{}.txt", script.name()));

        // All three files must exist before any session is built.
        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelNotFound(path.clone()));
            }
        }

        let dictionary = Dictionary::load(&dict_path)?;
        if dictionary.is_empty() {
            return Err(OcrError::EngineError(format!(
                "dictionary {} is empty",
                dict_path.display()
            )));
        }
        progress!(config.verbose, "Loaded {} dictionary with {} entries", script.name(), dictionary.len());

        progress!(config.verbose, "Loading detection model from {}", det_path.display());
        let detector = OnnxModel::load(&det_path, INTRA_THREADS)?;
        progress!(config.verbose, "Loading recognition model from {}", rec_path.display());
        let recognizer = OnnxModel::load(&rec_path, INTRA_THREADS)?;

        Ok(Self {
            models: Arc::new(Models {
                detector,
                recognizer,
                dictionary,
            }),
            script,
            languages: config.languages.clone(),
        })
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    fn recognize_blocking(models: &Models, image: &RgbImage) -> Result<OcrOutput, OcrError> {
        let started = Instant::now();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidInput("image has no pixels".to_string()));
        }

        let (tensor, geometry) = preprocess::detection_input(image);
        let shape = tensor.shape();
        let input_size = (shape[2], shape[3]);
        let map = models.detector.run(&tensor)?;
        let boxes = detection::boxes_from_map(&map, input_size, &geometry, (width, height));
        debug!("Detected {} candidate regions", boxes.len());

        let mut regions = Vec::with_capacity(boxes.len());
        for text_box in boxes {
            let x = text_box.x.floor() as u32;
            let y = text_box.y.floor() as u32;
            let w = (text_box.width.ceil() as u32).min(width.saturating_sub(x)).max(1);
            let h = (text_box.height.ceil() as u32).min(height.saturating_sub(y)).max(1);

            let crop = imageops::crop_imm(image, x, y, w, h).to_image();
            let output = models.recognizer.run(&preprocess::recognition_input(&crop))?;
            let decoded = recognition::ctc_decode(&output, &models.dictionary)?;
            if decoded.text.is_empty() {
                continue;
            }

            regions.push(TextRegion {
                text: decoded.text,
                bounding_box: text_box.quad(),
                confidence: f64::from(decoded.confidence),
            });
        }

        debug!(
            "Recognized {} regions in {}ms",
            regions.len(),
            started.elapsed().as_millis()
        );
        Ok(OcrOutput::new(regions))
    }
}

#[async_trait]
impl OcrEngine for PaddleOcrEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let input = input.clone();
        let models = Arc::clone(&self.models);
        tokio::task::spawn_blocking(move || {
            let image = load_rgb(&input)?;
            Self::recognize_blocking(&models, &image)
        })
        .await
        .map_err(|e| OcrError::EngineError(e.to_string()))?
    }
}
