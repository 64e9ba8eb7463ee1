//! CTC decoding of the recognition model output.

use std::fs;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};

use crate::engine::OcrError;

/// Character table; index 0 is the CTC blank.
#[derive(Debug, Clone)]
pub struct Dictionary {
    chars: Vec<char>,
}

impl Dictionary {
    pub fn load(path: &Path) -> Result<Self, OcrError> {
        if !path.exists() {
            return Err(OcrError::ModelNotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| OcrError::EngineError(format!("failed to read {}: {e}", path.display())))?;
        Ok(Self::parse(&contents))
    }

    /// One character per line. A trailing space class is appended, matching
    /// PaddleOCR's `use_space_char`.
    pub fn parse(contents: &str) -> Self {
        let mut chars = vec!['\0'];
        chars.extend(contents.lines().filter_map(|line| line.chars().next()));
        chars.push(' ');
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when the table holds nothing besides the blank and space classes.
    pub fn is_empty(&self) -> bool {
        self.chars.len() <= 2
    }

    fn get(&self, index: usize) -> Option<char> {
        if index == 0 {
            return None;
        }
        self.chars.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub text: String,
    pub confidence: f32,
}

/// Greedy CTC decode of a `[1, T, C]` or `[T, C]` probability tensor.
///
/// Confidence is the mean max-probability of emitted characters. Models that
/// emit logits instead of probabilities are squashed through a sigmoid.
pub fn ctc_decode(output: &ArrayD<f32>, dictionary: &Dictionary) -> Result<Decoded, OcrError> {
    let shape = output.shape();
    let (steps, classes, batched) = match shape.len() {
        3 => (shape[1], shape[2], true),
        2 => (shape[0], shape[1], false),
        _ => {
            return Err(OcrError::EngineError(format!(
                "unexpected recognition output shape: {shape:?}"
            )))
        }
    };

    let mut text = String::new();
    let mut total = 0.0f32;
    let mut emitted = 0usize;
    let mut previous: Option<usize> = None;

    for t in 0..steps {
        let mut best = f32::NEG_INFINITY;
        let mut best_index = 0usize;
        for c in 0..classes {
            let p = if batched {
                output[IxDyn(&[0, t, c])]
            } else {
                output[IxDyn(&[t, c])]
            };
            if p > best {
                best = p;
                best_index = c;
            }
        }

        if previous != Some(best_index) {
            if let Some(ch) = dictionary.get(best_index) {
                text.push(ch);
                total += best;
                emitted += 1;
            }
        }
        previous = Some(best_index);
    }

    let mean = if emitted == 0 { 0.0 } else { total / emitted as f32 };
    let confidence = if (0.0..=1.0).contains(&mean) {
        mean
    } else {
        1.0 / (1.0 + (-mean).exp())
    };

    Ok(Decoded {
        text: text.trim().to_string(),
        confidence,
    })
}
