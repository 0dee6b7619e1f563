use super::round::positive_or;
use crate::geometry::Point;

pub const DEFAULT_TRIANGLE_SIDE: f64 = 30.0;
pub const DEFAULT_CROSS_ARM: f64 = 10.0;

/// Equilateral triangle centered on its anchor, pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleShape {
    pub x: f64,
    pub y: f64,
    pub a: Option<f64>,
}

impl TriangleShape {
    pub fn new(x: f64, y: f64, a: f64) -> Self {
        Self { x, y, a: Some(a) }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn side(&self) -> f64 {
        positive_or(self.a, DEFAULT_TRIANGLE_SIDE)
    }

    pub fn height(&self) -> f64 {
        self.side() * 3f64.sqrt() / 2.0
    }

    /// Apex, bottom-left and bottom-right vertices.
    pub fn vertices(&self) -> [Point; 3] {
        let half_side = self.side() / 2.0;
        let half_height = self.height() / 2.0;
        [
            Point::new(self.x, self.y - half_height),
            Point::new(self.x - half_side, self.y + half_height),
            Point::new(self.x + half_side, self.y + half_height),
        ]
    }
}

/// X-shaped marker; `s` is the half-length of each arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossShape {
    pub x: f64,
    pub y: f64,
    pub s: Option<f64>,
}

impl CrossShape {
    pub fn new(x: f64, y: f64, s: f64) -> Self {
        Self { x, y, s: Some(s) }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn arm(&self) -> f64 {
        positive_or(self.s, DEFAULT_CROSS_ARM)
    }
}
