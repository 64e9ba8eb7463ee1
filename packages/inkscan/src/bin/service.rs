use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use inkscan::cli::ServiceArgs;
use inkscan::logging::init_tracing;
use inkscan::{create_router_with_limit, serve, AppState, ServiceConfig};
use inkscan_ocr::{EngineConfig, PaddleOcrEngine};
use tracing::{error, info};

#[tokio::main]
async fn main() {
  init_tracing("info");

  if let Err(e) = run().await {
    error!("{:#}", e);
    std::process::exit(1);
  }
}

async fn run() -> Result<()> {
  let args = ServiceArgs::parse();
  let config = ServiceConfig::from_env(args.port.as_deref())?;

  info!("Initializing OCR reader for {:?}...", config.languages);
  let engine_config = EngineConfig::new(config.languages.iter().cloned())
    .with_gpu(false)
    .with_model_dir(&config.model_dir);
  let engine = tokio::task::spawn_blocking(move || PaddleOcrEngine::new(&engine_config))
    .await?
    .context("Failed to initialize OCR reader, exiting")?;
  info!("OCR reader initialized successfully");

  let router = create_router_with_limit(AppState::new(Arc::new(engine)), config.max_upload_bytes);

  let addr = config.bind_addr();
  info!("Starting OCR service on port {}", config.port);
  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind {}", addr))?;

  serve(listener, router).await?;
  Ok(())
}
