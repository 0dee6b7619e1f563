use super::ShapeType;
use crate::geometry::Point;

/// A shape described by a center and a radius: cones, players, balls,
/// discs, circles, rings and posts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundShape {
    pub x: f64,
    pub y: f64,
    pub r: Option<f64>,
}

impl RoundShape {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r: Some(r) }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Stored radius, or `default` when absent or not positive.
    pub fn radius_or(&self, default: f64) -> f64 {
        positive_or(self.r, default)
    }
}

pub(crate) fn default_radius(shape_type: ShapeType) -> f64 {
    match shape_type {
        ShapeType::Cone => 12.0,
        ShapeType::Player => 14.0,
        ShapeType::Ball => 8.0,
        ShapeType::Disc => 14.0,
        ShapeType::Circle | ShapeType::Ring => 18.0,
        ShapeType::Post => 20.0,
        _ => 12.0,
    }
}

pub(crate) fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}
