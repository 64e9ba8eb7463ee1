use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array4, ArrayD};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;

use crate::engine::OcrError;

fn engine_err(context: &str, err: impl std::fmt::Display) -> OcrError {
    OcrError::EngineError(format!("{context}: {err}"))
}

/// A CPU ONNX Runtime session with a single input and output.
pub struct OnnxModel {
    session: Mutex<Session>,
    input_name: String,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxModel {
    pub fn load(path: &Path, threads: usize) -> Result<Self, OcrError> {
        if !path.exists() {
            return Err(OcrError::ModelNotFound(path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| engine_err("failed to create session builder", e))?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .map_err(|e| engine_err("failed to set CPU execution provider", e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| engine_err("failed to set optimization level", e))?
            .with_intra_threads(threads)
            .map_err(|e| engine_err("failed to set intra threads", e))?
            .commit_from_file(path)
            .map_err(|e| engine_err(&format!("failed to load {}", path.display()), e))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "x".to_string());

        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }

    /// Runs the model and copies the first output out of the session.
    pub fn run(&self, input: &Array4<f32>) -> Result<ArrayD<f32>, OcrError> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| OcrError::EngineError("session lock poisoned".to_string()))?;

        let value = Value::from_array(input.to_owned())
            .map_err(|e| engine_err("failed to create input tensor", e))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => value])
            .map_err(|e| engine_err("inference failed", e))?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| engine_err("failed to extract output tensor", e))?;

        Ok(output.to_owned())
    }
}
