use crate::geometry::{rotate_point, Point};

/// Directed segment from `(x1, y1)` to `(x2, y2)`.
///
/// The stored endpoints are unrotated; a shape rotation turns them about the
/// segment midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ArrowShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn set_start(&mut self, p: Point) {
        self.x1 = p.x;
        self.y1 = p.y;
    }

    pub fn set_end(&mut self, p: Point) {
        self.x2 = p.x;
        self.y2 = p.y;
    }

    pub fn midpoint(&self) -> Point {
        self.start().midpoint(&self.end())
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    /// Endpoints as drawn, after rotating by `rot` degrees about the midpoint.
    pub fn effective_endpoints(&self, rot: f64) -> (Point, Point) {
        let mid = self.midpoint();
        (
            rotate_point(self.start(), mid, rot),
            rotate_point(self.end(), mid, rot),
        )
    }

    /// Writes the rotated endpoints back so the arrow draws identically with
    /// no rotation.
    pub fn bake(&mut self, rot: f64) {
        let (start, end) = self.effective_endpoints(rot);
        self.set_start(start);
        self.set_end(end);
    }
}
