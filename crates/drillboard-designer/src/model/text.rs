use super::round::positive_or;
use crate::geometry::Point;

pub const DEFAULT_TEXT: &str = "Text";
pub const DEFAULT_TEXT_SIZE: f64 = 14.0;

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Text label centered on its anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub text: Option<String>,
    pub size: Option<f64>,
}

impl TextShape {
    pub fn new(x: f64, y: f64, text: impl Into<String>, size: f64) -> Self {
        Self {
            x,
            y,
            text: Some(text.into()),
            size: Some(size),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Text to draw; empty or missing content falls back to the placeholder.
    pub fn content(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_TEXT,
        }
    }

    pub fn font_size(&self) -> f64 {
        positive_or(self.size, DEFAULT_TEXT_SIZE)
    }

    /// Estimated `(width, height)` of the rendered label.
    pub fn box_size(&self) -> (f64, f64) {
        let size = self.font_size();
        let chars = self.content().chars().count().max(1) as f64;
        (GLYPH_WIDTH_RATIO * size * chars, size)
    }
}
