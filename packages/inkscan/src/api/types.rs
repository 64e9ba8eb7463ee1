//! Request/response payloads of the HTTP API.

use serde::{Deserialize, Serialize};

use crate::summary::OcrSummary;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "EasyOCR Service";

pub const SUCCESS_MESSAGE: &str = "Images processed successfully via EasyOCR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub reader_initialized: bool,
}

impl HealthResponse {
    pub fn healthy(reader_initialized: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            reader_initialized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessImageResponse {
    pub success: bool,
    pub message: String,
    pub result: OcrSummary,
}

impl ProcessImageResponse {
    pub fn success(result: OcrSummary) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            result,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            result: OcrSummary::empty(),
        }
    }
}
