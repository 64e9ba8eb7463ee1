/// A point in image pixel space, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral around a text region, clockwise from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub points: [Point; 4],
}

impl Quad {
    /// Builds the quad of an axis-aligned rectangle.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            points: [
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ],
        }
    }

    /// Smallest axis-aligned rectangle containing the quad, as `(x, y, width, height)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// One recognized text region.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    pub text: String,
    pub bounding_box: Quad,
    /// Recognition confidence in `[0, 1]`.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_from_rect_is_clockwise() {
        let quad = Quad::from_rect(10.0, 20.0, 100.0, 30.0);
        assert_eq!(quad.points[0], Point::new(10.0, 20.0));
        assert_eq!(quad.points[1], Point::new(110.0, 20.0));
        assert_eq!(quad.points[2], Point::new(110.0, 50.0));
        assert_eq!(quad.points[3], Point::new(10.0, 50.0));
    }

    #[test]
    fn test_bounds_of_rotated_quad() {
        let quad = Quad {
            points: [
                Point::new(5.0, 0.0),
                Point::new(10.0, 5.0),
                Point::new(5.0, 10.0),
                Point::new(0.0, 5.0),
            ],
        };
        assert_eq!(quad.bounds(), (0.0, 0.0, 10.0, 10.0));
    }
}
