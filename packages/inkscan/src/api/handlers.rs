//! API request handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use inkscan_ocr::OcrInput;
use tracing::{debug, info};

use super::error::ApiError;
use super::types::{HealthResponse, ProcessImageResponse};
use super::AppState;
use crate::imaging::decode_upload;
use crate::summary::OcrSummary;

/// Multipart field carrying a list of files; only the first is used.
pub const IMAGES_FIELD: &str = "images";
/// Multipart field carrying a single file.
pub const IMAGE_FIELD: &str = "image";

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.reader_initialized()))
}

/// Process-image endpoint handler.
///
/// POST /ocr/process-image
///
/// Accepts multipart form data with either:
/// - `images`: one or more files, only the first is processed
/// - `image`: a single file
///
/// The image is decoded, converted to RGB and recognized as English text.
/// Detections with confidence above 0.1 are joined into the summary.
///
/// # Errors
///
/// - 400 when neither field is present
/// - 500 when the reader is missing, or decoding/recognition fails
pub async fn process_image_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessImageResponse>, ApiError> {
    let engine = state.engine().ok_or(ApiError::ReaderNotInitialized)?;

    let Ok(multipart) = multipart else {
        return Err(ApiError::NoImage);
    };
    let data = read_image_field(multipart).await?.ok_or(ApiError::NoImage)?;
    debug!("Received {} bytes of image data", data.len());

    let decoded = tokio::task::spawn_blocking(move || decode_upload(&data))
        .await
        .map_err(|e| ApiError::Processing(e.to_string()))??;

    info!(
        "Processing image: {}x{} pixels{}",
        decoded.width(),
        decoded.height(),
        if decoded.converted { " (converted to RGB)" } else { "" }
    );

    let output = engine.recognize(&OcrInput::Pixels(decoded.pixels)).await?;
    let summary = OcrSummary::from_regions(&output.regions);

    info!(
        "OCR completed: {} characters, avg confidence: {:.2}",
        summary.text.chars().count(),
        summary.confidence.unwrap_or_default()
    );

    Ok(Json(ProcessImageResponse::success(summary)))
}

/// Picks the upload to process: first `images` file, else the `image` file.
async fn read_image_field(mut multipart: Multipart) -> Result<Option<Vec<u8>>, ApiError> {
    let mut first_of_list: Option<Vec<u8>> = None;
    let mut single: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        // Plain form fields carry no filename and are never uploads.
        if field.file_name().is_none() {
            continue;
        }
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            IMAGES_FIELD if first_of_list.is_none() => {
                first_of_list = Some(field.bytes().await?.to_vec());
            }
            IMAGE_FIELD if single.is_none() => {
                single = Some(field.bytes().await?.to_vec());
            }
            _ => {}
        }
    }

    Ok(first_of_list.or(single))
}
