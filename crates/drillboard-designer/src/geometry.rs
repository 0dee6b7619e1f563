//! Geometry helpers shared by the scene model, hit-testing and the
//! interaction controller.
//!
//! Scene coordinates are y-down (screen convention): positive rotation turns
//! clockwise on screen, matching SVG `rotate(...)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Clamps `v` into `[min, max]`. NaN collapses to `min`.
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v.is_nan() || v < min {
        min
    } else if v > max {
        max.max(min)
    } else {
        v
    }
}

/// Rounds `value` to the nearest multiple of `grid` when snapping is enabled.
///
/// Grid sizes below 1 are treated as 1.
pub fn snap(value: f64, grid: f64, enabled: bool) -> f64 {
    if !enabled {
        return value;
    }
    let grid = if grid.is_finite() { grid.max(1.0) } else { 1.0 };
    (value / grid).round() * grid
}

/// Rounds an angle to the nearest multiple of `step` degrees.
pub fn snap_angle(degrees: f64, step: f64) -> f64 {
    if !(step.is_finite() && step > 0.0) {
        return degrees;
    }
    (degrees / step).round() * step
}

/// Wraps an angle into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Direction from `center` to `point`, in degrees.
pub fn angle_at(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

/// Rotates `point` about `center` by `degrees` (clockwise on a y-down surface).
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return point;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance_to(&a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + ab.x * t, a.y + ab.y * t);
    p.distance_to(&closest)
}
