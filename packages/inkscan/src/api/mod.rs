//! HTTP surface of the OCR service.
//!
//! The engine handle is injected through [`AppState`]; a state built with
//! [`AppState::uninitialized`] serves `/health` but fails every OCR request.

pub mod error;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use inkscan_ocr::OcrEngine;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use handlers::{health_handler, process_image_handler};
pub use types::{HealthResponse, ProcessImageResponse};

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;

#[derive(Clone, Default)]
pub struct AppState {
    engine: Option<Arc<dyn OcrEngine>>,
}

impl AppState {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    pub fn uninitialized() -> Self {
        Self { engine: None }
    }

    pub fn engine(&self) -> Option<Arc<dyn OcrEngine>> {
        self.engine.clone()
    }

    pub fn reader_initialized(&self) -> bool {
        self.engine.is_some()
    }
}

/// Builds the router with the default upload limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_MAX_UPLOAD_BYTES)
}

pub fn create_router_with_limit(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ocr/process-image", post(process_image_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serves `router` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("OCR service listening on {}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping OCR service");
}
