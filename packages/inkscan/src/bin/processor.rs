use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use inkscan::cli::ProcessorArgs;
use inkscan::logging::init_tracing;
use inkscan::processor::{self, ProcessorReport};
use inkscan_ocr::{EngineConfig, OcrEngine, OcrError, PaddleOcrEngine};

fn build_engine(config: &EngineConfig) -> Result<Arc<dyn OcrEngine>, OcrError> {
  Ok(Arc::new(PaddleOcrEngine::new(config)?))
}

#[tokio::main]
async fn main() {
  init_tracing("info");

  let report = match ProcessorArgs::try_parse() {
    Ok(args) => processor::process(&args, &build_engine).await,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
      eprint!("{}", e);
      std::process::exit(0);
    }
    Err(e) => ProcessorReport::unexpected(e.to_string().trim()),
  };

  println!("{}", report.to_json());
  std::process::exit(report.exit_code());
}
