use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inkscan_ocr::OcrError;
use thiserror::Error;
use tracing::{error, warn};

use super::types::ProcessImageResponse;
use crate::imaging::ImageError;

/// Failures of the process-image endpoint, all rendered in the normalized
/// failure shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image data provided")]
    NoImage,

    #[error("OCR reader not initialized")]
    ReaderNotInitialized,

    #[error("Failed to read upload: {message}")]
    Upload { status: StatusCode, message: String },

    #[error("OCR processing failed: {0}")]
    Processing(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoImage => StatusCode::BAD_REQUEST,
            ApiError::ReaderNotInitialized | ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upload { status, .. } => *status,
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        ApiError::Processing(err.to_string())
    }
}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        ApiError::Processing(err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Upload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("OCR request failed: {}", self);
        } else {
            warn!("OCR request rejected: {}", self);
        }
        (status, Json(ProcessImageResponse::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NoImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::ReaderNotInitialized.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Processing("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        let upload = ApiError::Upload {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".into(),
        };
        assert_eq!(upload.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_processing_message_embeds_cause() {
        let err: ApiError = OcrError::EngineError("model exploded".into()).into();
        assert_eq!(err.to_string(), "OCR processing failed: engine error: model exploded");
    }

    #[test]
    fn test_decode_error_is_processing() {
        let err: ApiError = ImageError::EmptyData.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("OCR processing failed: "));
    }
}
