//! Shared fixtures: in-process engines and image/multipart builders.
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use inkscan_ocr::{load_rgb, OcrEngine, OcrError, OcrInput, OcrOutput, Quad, TextRegion};

pub const BOUNDARY: &str = "----inkscan-boundary";

pub fn region(text: &str, confidence: f64) -> TextRegion {
    TextRegion {
        text: text.to_string(),
        bounding_box: Quad::from_rect(0.0, 0.0, 10.0, 10.0),
        confidence,
    }
}

/// Returns the same regions for every image and records what it was given.
pub struct ScriptedEngine {
    regions: Vec<TextRegion>,
    pub calls: AtomicUsize,
    pub seen_sizes: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedEngine {
    pub fn new(regions: Vec<TextRegion>) -> Self {
        Self {
            regions,
            calls: AtomicUsize::new(0),
            seen_sizes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl OcrEngine for ScriptedEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let pixels = load_rgb(input)?;
        self.seen_sizes.lock().unwrap().push(pixels.dimensions());
        Ok(OcrOutput::new(self.regions.clone()))
    }
}

/// Describes the pixels it receives, so tests can compare what reached the engine.
pub struct PixelEchoEngine;

#[async_trait]
impl OcrEngine for PixelEchoEngine {
    async fn recognize(&self, input: &OcrInput) -> Result<OcrOutput, OcrError> {
        let pixels = load_rgb(input)?;
        let (w, h) = pixels.dimensions();
        let [r, g, b] = pixels.get_pixel(0, 0).0;
        Ok(OcrOutput::new(vec![region(&format!("{w}x{h} rgb({r},{g},{b})"), 0.9)]))
    }
}

/// Always fails recognition.
pub struct FailingEngine;

#[async_trait]
impl OcrEngine for FailingEngine {
    async fn recognize(&self, _input: &OcrInput) -> Result<OcrOutput, OcrError> {
        Err(OcrError::EngineError("inference crashed".to_string()))
    }
}

pub fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn rgb_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb(rgb))),
        ImageFormat::Png,
    )
}

/// Builds a multipart/form-data body from `(field, filename, bytes)` file parts.
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let parts: Vec<(&str, Option<&str>, &[u8])> =
        parts.iter().map(|(field, filename, data)| (*field, Some(*filename), *data)).collect();
    form_data_body(&parts)
}

/// Like [`multipart_body`], but a part without a filename is sent as a plain form field.
pub fn form_data_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, data) in parts {
        let disposition = match filename {
            Some(filename) => format!("form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream"),
            None => format!("form-data; name=\"{field}\""),
        };
        body.extend_from_slice(format!("--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
