//! Text region detection from the DB probability map.

use ndarray::{ArrayD, IxDyn};

use crate::region::Quad;

use super::preprocess::Letterbox;

/// Pixel probability above which a map cell counts as text.
pub const BOX_THRESHOLD: f32 = 0.3;

/// Components with this many cells or fewer are dropped as noise.
pub const MIN_COMPONENT_CELLS: usize = 10;

/// Growth applied to each shrunk text kernel, as `area * ratio / perimeter`.
pub const UNCLIP_RATIO: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Mean probability over the component.
    pub score: f32,
}

impl TextBox {
    pub fn quad(&self) -> Quad {
        Quad::from_rect(self.x, self.y, self.width, self.height)
    }
}

struct ProbabilityMap<'a> {
    data: &'a ArrayD<f32>,
    height: usize,
    width: usize,
}

impl ProbabilityMap<'_> {
    fn at(&self, x: usize, y: usize) -> f32 {
        if self.data.ndim() == 4 {
            self.data[IxDyn(&[0, 0, y, x])]
        } else {
            self.data[IxDyn(&[0, y, x])]
        }
    }
}

/// Extracts text boxes from a `[1, 1, H, W]` or `[1, H, W]` map.
///
/// Boxes come back in source-image coordinates, clipped to the image and
/// ordered top-to-bottom, then left-to-right.
pub fn boxes_from_map(
    map: &ArrayD<f32>,
    input_size: (usize, usize),
    geometry: &Letterbox,
    source_size: (u32, u32),
) -> Vec<TextBox> {
    let shape = map.shape();
    let (height, width) = match shape.len() {
        4 => (shape[2], shape[3]),
        3 => (shape[1], shape[2]),
        _ => return Vec::new(),
    };
    if height == 0 || width == 0 {
        return Vec::new();
    }

    let map = ProbabilityMap {
        data: map,
        height,
        width,
    };
    let scale_y = input_size.0 as f32 / height as f32;
    let scale_x = input_size.1 as f32 / width as f32;
    let (src_w, src_h) = (source_size.0 as f32, source_size.1 as f32);

    let mut visited = vec![false; width * height];
    let mut boxes = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited[y * width + x] || map.at(x, y) < BOX_THRESHOLD {
                continue;
            }

            let component = flood_fill(&map, &mut visited, x, y);
            if component.cells <= MIN_COMPONENT_CELLS {
                continue;
            }

            let (x0, y0, x1, y1) = unclip(
                component.min_x as f32 * scale_x,
                component.min_y as f32 * scale_y,
                (component.max_x + 1) as f32 * scale_x,
                (component.max_y + 1) as f32 * scale_y,
                UNCLIP_RATIO,
            );
            let (x0, y0) = geometry.to_source(x0, y0);
            let (x1, y1) = geometry.to_source(x1, y1);
            let (x0, y0) = (x0.clamp(0.0, src_w), y0.clamp(0.0, src_h));
            let (x1, y1) = (x1.clamp(0.0, src_w), y1.clamp(0.0, src_h));
            if x1 <= x0 || y1 <= y0 {
                continue;
            }

            boxes.push(TextBox {
                x: x0,
                y: y0,
                width: x1 - x0,
                height: y1 - y0,
                score: component.score_sum / component.cells as f32,
            });
        }
    }

    boxes.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    boxes
}

/// Expands the rectangle `(x0, y0)..(x1, y1)` outward on every side.
///
/// The detector predicts text kernels shrunk by this same offset, so the
/// expanded box covers the full glyphs.
pub fn unclip(x0: f32, y0: f32, x1: f32, y1: f32, ratio: f32) -> (f32, f32, f32, f32) {
    let (width, height) = (x1 - x0, y1 - y0);
    let perimeter = 2.0 * (width + height);
    if perimeter <= 0.0 {
        return (x0, y0, x1, y1);
    }
    let distance = width * height * ratio / perimeter;
    (x0 - distance, y0 - distance, x1 + distance, y1 + distance)
}

struct Component {
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
    cells: usize,
    score_sum: f32,
}

fn flood_fill(map: &ProbabilityMap<'_>, visited: &mut [bool], start_x: usize, start_y: usize) -> Component {
    let mut component = Component {
        min_x: start_x,
        max_x: start_x,
        min_y: start_y,
        max_y: start_y,
        cells: 0,
        score_sum: 0.0,
    };
    let mut stack = vec![(start_x, start_y)];

    while let Some((x, y)) = stack.pop() {
        let idx = y * map.width + x;
        if visited[idx] {
            continue;
        }
        let prob = map.at(x, y);
        if prob < BOX_THRESHOLD {
            continue;
        }

        visited[idx] = true;
        component.cells += 1;
        component.score_sum += prob;
        component.min_x = component.min_x.min(x);
        component.max_x = component.max_x.max(x);
        component.min_y = component.min_y.min(y);
        component.max_y = component.max_y.max(y);

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < map.width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < map.height {
            stack.push((x, y + 1));
        }
    }

    component
}
