pub mod config;
pub mod engine;
pub mod region;

#[cfg(feature = "paddle")]
pub mod paddle;

pub use config::EngineConfig;
pub use engine::{load_rgb, OcrEngine, OcrError, OcrInput, OcrOutput};
pub use region::{Point, Quad, TextRegion};

#[cfg(feature = "paddle")]
pub use paddle::PaddleOcrEngine;
