use super::round::positive_or;
use super::ShapeType;
use crate::geometry::Point;

pub const DEFAULT_LADDER_STEPS: u32 = 4;

/// Upper bound on ladder rungs, from stored items and panel input alike.
pub const MAX_LADDER_STEPS: u32 = 64;

/// Rectangular equipment centered on its anchor: rects, goals, hurdles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub x: f64,
    pub y: f64,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl BoxShape {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: Some(w),
            h: Some(h),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size_or(&self, (default_w, default_h): (f64, f64)) -> (f64, f64) {
        (positive_or(self.w, default_w), positive_or(self.h, default_h))
    }
}

/// Agility ladder: a box split into `steps` rungs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderShape {
    pub x: f64,
    pub y: f64,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub steps: Option<u32>,
}

impl LadderShape {
    pub fn new(x: f64, y: f64, w: f64, h: f64, steps: u32) -> Self {
        Self {
            x,
            y,
            w: Some(w),
            h: Some(h),
            steps: Some(steps),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size_or(&self, (default_w, default_h): (f64, f64)) -> (f64, f64) {
        (positive_or(self.w, default_w), positive_or(self.h, default_h))
    }

    pub fn steps_or_default(&self) -> u32 {
        self.steps
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_LADDER_STEPS)
            .min(MAX_LADDER_STEPS)
    }
}

pub(crate) fn default_box(shape_type: ShapeType) -> (f64, f64) {
    match shape_type {
        ShapeType::Goal => (120.0, 40.0),
        ShapeType::Hurdle => (60.0, 16.0),
        ShapeType::Ladder => (120.0, 40.0),
        _ => (80.0, 50.0),
    }
}
