//! Integration tests for the processor pipeline with in-process engines.

mod common;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use inkscan::cli::ProcessorArgs;
use inkscan::processor::process;
use inkscan_ocr::{EngineConfig, OcrEngine, OcrError, Point, Quad, TextRegion};

use common::{region, rgb_png, FailingEngine, ScriptedEngine};

fn args_for(path: PathBuf) -> ProcessorArgs {
    ProcessorArgs {
        image_path: path,
        languages: vec!["en".to_string()],
        model_dir: PathBuf::from("models"),
    }
}

fn write_png(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("page.png");
    std::fs::write(&path, rgb_png(20, 10, [255, 255, 255])).unwrap();
    path
}

#[tokio::test]
async fn test_missing_file_skips_engine() {
    let built = AtomicUsize::new(0);
    let factory = |_: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> {
        built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(ScriptedEngine::new(vec![])))
    };

    let report = process(&args_for(PathBuf::from("/no/such/scan.png")), &factory).await;

    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("Image file not found: /no/such/scan.png"));
    assert!(report.results.is_empty());
    assert_eq!(report.count, 0);
    assert_eq!(built.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_records_in_engine_order() {
    let dir = tempfile::tempdir().unwrap();
    let regions = vec![region("second", 0.05), region("first", 0.99)];
    let factory = move |_: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> {
        Ok(Arc::new(ScriptedEngine::new(regions.clone())))
    };

    let report = process(&args_for(write_png(&dir)), &factory).await;

    assert!(report.success);
    assert_eq!(report.count, 2);
    // No confidence filtering on this path.
    let texts: Vec<&str> = report.results.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["second", "first"]);
    assert_eq!(report.results[0].confidence, 0.05);
}

#[tokio::test]
async fn test_float_coordinates_become_integers() {
    let dir = tempfile::tempdir().unwrap();
    let skewed = TextRegion {
        text: "slanted".to_string(),
        bounding_box: Quad {
            points: [
                Point::new(3.7, 1.2),
                Point::new(18.4, 2.9),
                Point::new(17.6, 9.99),
                Point::new(2.1, 8.5),
            ],
        },
        confidence: 0.42,
    };
    let factory = move |_: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> {
        Ok(Arc::new(ScriptedEngine::new(vec![skewed.clone()])))
    };

    let report = process(&args_for(write_png(&dir)), &factory).await;

    assert_eq!(report.results[0].bbox, [[3, 1], [18, 2], [17, 9], [2, 8]]);
    assert!(report.to_json().contains(r#""bbox": [[3, 1], [18, 2], [17, 9], [2, 8]]"#));
}

#[tokio::test]
async fn test_languages_reach_factory() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = args_for(write_png(&dir));
    args.languages = vec!["en".to_string(), "de".to_string()];
    args.model_dir = PathBuf::from("/opt/ocr");

    let factory = |config: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> {
        assert_eq!(config.languages, vec!["en", "de"]);
        assert_eq!(config.model_dir, PathBuf::from("/opt/ocr"));
        assert!(!config.gpu);
        assert!(!config.verbose);
        Ok(Arc::new(ScriptedEngine::new(vec![])))
    };

    let report = process(&args, &factory).await;
    assert!(report.success);
    assert_eq!(report.count, 0);
}

#[tokio::test]
async fn test_engine_construction_failure() {
    let dir = tempfile::tempdir().unwrap();
    let factory = |_: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> {
        Err(OcrError::UnsupportedLanguage("tlh".to_string()))
    };

    let report = process(&args_for(write_png(&dir)), &factory).await;

    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("unsupported language: tlh"));
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn test_recognition_failure() {
    let dir = tempfile::tempdir().unwrap();
    let factory = |_: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> { Ok(Arc::new(FailingEngine)) };

    let report = process(&args_for(write_png(&dir)), &factory).await;

    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("engine error: inference crashed"));
    assert!(report.results.is_empty());
}

#[tokio::test]
async fn test_undecodable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.png");
    std::fs::write(&path, b"garbage").unwrap();
    let factory = |_: &EngineConfig| -> Result<Arc<dyn OcrEngine>, OcrError> {
        Ok(Arc::new(ScriptedEngine::new(vec![])))
    };

    let report = process(&args_for(path), &factory).await;

    assert!(!report.success);
    assert!(report.error.unwrap().starts_with("failed to decode image"));
}
