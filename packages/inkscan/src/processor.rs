//! One-shot recognition of a single image file for the `ocr-processor` binary.
//!
//! Exactly one [`ProcessorReport`] is produced per invocation. Progress and
//! timing go through `tracing`, which the binary points at stderr.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use inkscan_ocr::{EngineConfig, OcrEngine, OcrError, OcrInput, TextRegion};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::ProcessorArgs;
use crate::legacy_json;

/// One detection as printed by the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub text: String,
    pub confidence: f64,
    /// Corner points as whole pixels, clockwise from top-left.
    pub bbox: [[i64; 2]; 4],
}

impl From<&TextRegion> for DetectionRecord {
    fn from(region: &TextRegion) -> Self {
        // Truncate toward zero so the JSON carries plain integers.
        let bbox = region.bounding_box.points.map(|p| [p.x as i64, p.y as i64]);
        Self {
            text: region.text.clone(),
            confidence: region.confidence,
            bbox,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<DetectionRecord>,
    pub count: usize,
}

impl ProcessorReport {
    pub fn success(results: Vec<DetectionRecord>) -> Self {
        Self {
            success: true,
            error: None,
            count: results.len(),
            results,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            results: Vec::new(),
            count: 0,
        }
    }

    /// Wraps an error that escaped the normal pipeline, such as bad arguments.
    pub fn unexpected(error: impl std::fmt::Display) -> Self {
        Self::failure(format!("Unexpected error: {error}"))
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }

    /// Single-line JSON document for stdout.
    pub fn to_json(&self) -> String {
        legacy_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success": false, "error": "failed to serialize report: {}", "results": [], "count": 0}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}

/// Builds the engine handle for one invocation.
pub trait EngineFactory {
    fn build(&self, config: &EngineConfig) -> Result<Arc<dyn OcrEngine>, OcrError>;
}

impl<F> EngineFactory for F
where
    F: Fn(&EngineConfig) -> Result<Arc<dyn OcrEngine>, OcrError>,
{
    fn build(&self, config: &EngineConfig) -> Result<Arc<dyn OcrEngine>, OcrError> {
        self(config)
    }
}

/// The engine configuration the processor uses: CPU, quiet.
pub fn engine_config(args: &ProcessorArgs) -> EngineConfig {
    EngineConfig::new(args.languages.iter().cloned())
        .with_gpu(false)
        .with_verbose(false)
        .with_model_dir(&args.model_dir)
}

/// Runs the whole pipeline and folds every failure into the report.
///
/// A missing image is reported without building an engine.
pub async fn process(args: &ProcessorArgs, factory: &dyn EngineFactory) -> ProcessorReport {
    if !args.image_path.exists() {
        return ProcessorReport::failure(format!(
            "Image file not found: {}",
            args.image_path.display()
        ));
    }

    match recognize_file(&args.image_path, &engine_config(args), factory).await {
        Ok(records) => ProcessorReport::success(records),
        Err(e) => ProcessorReport::failure(e.to_string()),
    }
}

async fn recognize_file(
    path: &Path,
    config: &EngineConfig,
    factory: &dyn EngineFactory,
) -> Result<Vec<DetectionRecord>> {
    let started = Instant::now();
    let engine = factory.build(config)?;
    info!(
        "Reader initialized for {:?} in {:.2}s",
        config.languages,
        started.elapsed().as_secs_f64()
    );

    let started = Instant::now();
    let output = engine
        .recognize(&OcrInput::FilePath(path.to_path_buf()))
        .await?;
    info!("OCR completed in {:.2}s", started.elapsed().as_secs_f64());
    info!("Found {} text regions", output.len());

    Ok(output.regions.iter().map(DetectionRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkscan_ocr::{Point, Quad};

    #[test]
    fn test_not_found_json_layout() {
        let report = ProcessorReport::failure("Image file not found: X");
        assert_eq!(
            report.to_json(),
            r#"{"success": false, "error": "Image file not found: X", "results": [], "count": 0}"#
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_success_json_layout() {
        let region = TextRegion {
            text: "Hi".to_string(),
            bounding_box: Quad::from_rect(1.0, 2.0, 3.0, 4.0),
            confidence: 0.5,
        };
        let report = ProcessorReport::success(vec![DetectionRecord::from(&region)]);
        assert_eq!(
            report.to_json(),
            r#"{"success": true, "results": [{"text": "Hi", "confidence": 0.5, "bbox": [[1, 2], [4, 2], [4, 6], [1, 6]]}], "count": 1}"#
        );
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_bbox_coerced_to_integers() {
        let region = TextRegion {
            text: "x".to_string(),
            bounding_box: Quad {
                points: [
                    Point::new(10.9, 20.2),
                    Point::new(110.5, 20.7),
                    Point::new(110.99, 50.01),
                    Point::new(-0.5, 50.5),
                ],
            },
            confidence: 0.9,
        };
        let record = DetectionRecord::from(&region);
        assert_eq!(record.bbox, [[10, 20], [110, 20], [110, 50], [0, 50]]);

        let json: serde_json::Value = serde_json::from_str(&ProcessorReport::success(vec![record]).to_json()).unwrap();
        for point in json["results"][0]["bbox"].as_array().unwrap() {
            for coord in point.as_array().unwrap() {
                assert!(coord.is_i64(), "coordinate {coord} is not an integer");
            }
        }
    }

    #[test]
    fn test_unexpected_prefix() {
        let report = ProcessorReport::unexpected("bad flag");
        assert_eq!(report.error.as_deref(), Some("Unexpected error: bad flag"));
        assert_eq!(report.count, 0);
    }

    #[test]
    fn test_engine_config_is_quiet_cpu() {
        let args = ProcessorArgs {
            image_path: "a.png".into(),
            languages: vec!["en".into(), "fr".into()],
            model_dir: "/m".into(),
        };
        let config = engine_config(&args);
        assert_eq!(config.languages, vec!["en", "fr"]);
        assert!(!config.gpu);
        assert!(!config.verbose);
        assert_eq!(config.model_dir, std::path::PathBuf::from("/m"));
    }
}
