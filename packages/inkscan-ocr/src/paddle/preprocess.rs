//! Tensor preparation for the detection and recognition models.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ndarray::Array4;

/// Square side the detection model runs at.
pub const DET_INPUT_SIZE: u32 = 640;

/// Height of recognition model input.
pub const REC_INPUT_HEIGHT: u32 = 48;

pub const REC_MIN_WIDTH: u32 = 4;
pub const REC_MAX_WIDTH: u32 = 320;

/// ImageNet normalization for the detection model.
pub const DET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const DET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Recognition models take pixels scaled to [-1, 1].
pub const REC_MEAN: [f32; 3] = [0.5; 3];
pub const REC_STD: [f32; 3] = [0.5; 3];

const PAD: Rgb<u8> = Rgb([128, 128, 128]);

/// Geometry of a letterboxed resize, used to map detections back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl Letterbox {
    pub fn new(width: u32, height: u32, target: u32) -> Self {
        if width == 0 || height == 0 {
            return Self {
                scale: 1.0,
                offset_x: 0,
                offset_y: 0,
            };
        }

        let scale = (target as f32 / width as f32).min(target as f32 / height as f32);
        let (new_w, new_h) = scaled_dims(width, height, scale);

        Self {
            scale,
            offset_x: target.saturating_sub(new_w) / 2,
            offset_y: target.saturating_sub(new_h) / 2,
        }
    }

    /// Maps a model-space coordinate back into the source image.
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.offset_x as f32) / self.scale,
            (y - self.offset_y as f32) / self.scale,
        )
    }
}

fn scaled_dims(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let new_w = ((width as f32 * scale).round() as u32).max(1);
    let new_h = ((height as f32 * scale).round() as u32).max(1);
    (new_w, new_h)
}

/// Resizes keeping aspect ratio and pads to a `target` square.
pub fn letterbox(image: &RgbImage, target: u32) -> (RgbImage, Letterbox) {
    let (width, height) = image.dimensions();
    let geometry = Letterbox::new(width, height, target);
    let mut canvas = RgbImage::from_pixel(target, target, PAD);

    if width == 0 || height == 0 {
        return (canvas, geometry);
    }

    let (new_w, new_h) = scaled_dims(width, height, geometry.scale);
    let resized = imageops::resize(image, new_w, new_h, FilterType::Lanczos3);
    imageops::replace(
        &mut canvas,
        &resized,
        geometry.offset_x as i64,
        geometry.offset_y as i64,
    );

    (canvas, geometry)
}

fn to_tensor(image: &RgbImage, mean: [f32; 3], std: [f32; 3]) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let mut tensor = Array4::zeros((1, 3, height as usize, width as usize));

    for (x, y, pixel) in image.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = (pixel[c] as f32 / 255.0 - mean[c]) / std[c];
        }
    }

    tensor
}

/// `[1, 3, 640, 640]` tensor plus the geometry needed to undo the letterbox.
pub fn detection_input(image: &RgbImage) -> (Array4<f32>, Letterbox) {
    let (canvas, geometry) = letterbox(image, DET_INPUT_SIZE);
    (to_tensor(&canvas, DET_MEAN, DET_STD), geometry)
}

/// `[1, 3, 48, W]` tensor for one cropped text line.
pub fn recognition_input(crop: &RgbImage) -> Array4<f32> {
    let (width, height) = crop.dimensions();
    let scale = REC_INPUT_HEIGHT as f32 / height.max(1) as f32;
    let new_width = ((width as f32 * scale).round() as u32).clamp(REC_MIN_WIDTH, REC_MAX_WIDTH);

    let resized = imageops::resize(crop, new_width, REC_INPUT_HEIGHT, FilterType::Lanczos3);
    to_tensor(&resized, REC_MEAN, REC_STD)
}
