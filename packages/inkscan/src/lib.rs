//! # inkscan
//!
//! Handwritten and printed text recognition exposed two ways:
//!
//! - **HTTP service** (`inkscan-service`): `GET /health` and
//!   `POST /ocr/process-image` taking a multipart upload, answering with the
//!   recognized text, a single-page split and the average confidence.
//! - **CLI processor** (`ocr-processor`): recognizes one image file and
//!   prints every detection, with integer bounding boxes, as one JSON document.
//!
//! Recognition itself is delegated to an [`inkscan_ocr::OcrEngine`]; this
//! crate only marshals requests and normalizes the engine output.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use inkscan::prelude::*;
//!
//! let engine = PaddleOcrEngine::new(&EngineConfig::default())?;
//! let router = create_router(AppState::new(Arc::new(engine)));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8081").await?;
//! serve(listener, router).await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod imaging;
pub mod legacy_json;
pub mod logging;
pub mod processor;
pub mod summary;

pub use api::{create_router, create_router_with_limit, serve, ApiError, AppState, HealthResponse, ProcessImageResponse};
pub use config::{ConfigError, ServiceConfig};
pub use processor::{DetectionRecord, EngineFactory, ProcessorReport};
pub use summary::{OcrSummary, CONFIDENCE_THRESHOLD};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use inkscan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        create_router, serve, AppState, DetectionRecord, OcrSummary, ProcessImageResponse, ProcessorReport,
        ServiceConfig,
    };
    pub use inkscan_ocr::{EngineConfig, OcrEngine, OcrInput, OcrOutput, PaddleOcrEngine, TextRegion};
}
