//! Aggregation of engine detections into the page-level OCR summary.

use inkscan_ocr::TextRegion;
use serde::{Deserialize, Serialize, Serializer};

/// Detections at or below this confidence are left out of the summary.
pub const CONFIDENCE_THRESHOLD: f64 = 0.1;

/// The `result` object of a process-image response.
///
/// `confidence` is only present on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrSummary {
    pub text: String,
    pub pages: Vec<String>,
    pub page_count: usize,
    pub images_processed: usize,
    pub total_images: usize,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_confidence"
    )]
    pub confidence: Option<f64>,
}

/// A summary with nothing above the threshold reports confidence as the integer `0`.
fn serialize_confidence<S: Serializer>(confidence: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match confidence {
        Some(value) if *value == 0.0 => serializer.serialize_u64(0),
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_none(),
    }
}

impl OcrSummary {
    /// The fixed shape returned alongside every failure.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            pages: Vec::new(),
            page_count: 0,
            images_processed: 0,
            total_images: 0,
            confidence: None,
        }
    }

    /// Summarizes the detections of a single image.
    pub fn from_regions(regions: &[TextRegion]) -> Self {
        let included: Vec<&TextRegion> = regions
            .iter()
            .filter(|region| region.confidence > CONFIDENCE_THRESHOLD)
            .collect();

        let text = included
            .iter()
            .map(|region| region.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        let confidence = if included.is_empty() {
            0.0
        } else {
            included.iter().map(|region| region.confidence).sum::<f64>() / included.len() as f64
        };

        let pages = if text.is_empty() { Vec::new() } else { vec![text.clone()] };

        Self {
            text,
            page_count: pages.len(),
            pages,
            images_processed: 1,
            total_images: 1,
            confidence: Some(confidence),
        }
    }
}
