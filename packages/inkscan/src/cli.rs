//! Command line arguments backing the `ocr-processor` and `inkscan-service` binaries.
use clap::Parser;
use std::path::PathBuf;

/// Default directory searched for OCR model files.
pub const DEFAULT_MODEL_DIR: &str = "models";

#[derive(Parser, Debug)]
#[command(
  name = "ocr-processor",
  about = "Run OCR on a single image and print the detections as JSON",
  version
)]
pub struct ProcessorArgs {
  /// Path to the image file
  pub image_path: PathBuf,

  /// Languages to use for OCR
  #[arg(long, num_args = 1.., default_values_t = vec![String::from("en")])]
  pub languages: Vec<String>,

  /// Directory holding the OCR model files
  #[arg(long, env = "INKSCAN_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
  pub model_dir: PathBuf,
}

#[derive(Parser, Debug)]
#[command(
  name = "inkscan-service",
  about = "HTTP service exposing OCR over multipart uploads",
  version
)]
pub struct ServiceArgs {
  /// Port to listen on; the PORT environment variable takes precedence
  pub port: Option<String>,
}
