//! Viewport and coordinate transformation for the editing surface.
//!
//! Handles conversion between surface pixel coordinates (screen space) and
//! scene coordinates. Both spaces are y-down; the mapping is a uniform zoom
//! followed by a pan offset.

use std::fmt;

use crate::geometry::{clamp, Point};

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    surface_width: f64,
    surface_height: f64,
}

impl Viewport {
    /// Creates an identity viewport (1 pixel = 1 scene unit) for a surface.
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            surface_width,
            surface_height,
        }
    }

    pub fn surface_width(&self) -> f64 {
        self.surface_width
    }

    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Sets the surface dimensions (typically called when the host resizes).
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width;
        self.surface_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, ignored outside 0.1..50.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts a surface position to scene coordinates without clamping.
    ///
    /// ```text
    /// scene_x = (pixel_x - pan_x) / zoom
    /// scene_y = (pixel_y - pan_y) / zoom
    /// ```
    pub fn to_scene_unclamped(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    /// Converts a surface position to scene coordinates, clamped to
    /// `[0, scene_width] x [0, scene_height]`.
    pub fn to_scene(&self, screen: Point, scene_width: f64, scene_height: f64) -> Point {
        let p = self.to_scene_unclamped(screen);
        Point::new(clamp(p.x, 0.0, scene_width), clamp(p.y, 0.0, scene_height))
    }

    /// Converts scene coordinates back to a surface position.
    pub fn to_screen(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.zoom + self.pan_x,
            scene.y * self.zoom + self.pan_y,
        )
    }

    /// Fits a `scene_width x scene_height` scene into the surface with a
    /// uniform scale, centered on both axes.
    pub fn fit(
        &mut self,
        surface_width: f64,
        surface_height: f64,
        scene_width: f64,
        scene_height: f64,
    ) {
        self.set_surface_size(surface_width, surface_height);
        if scene_width <= 0.0 || scene_height <= 0.0 || surface_width <= 0.0 || surface_height <= 0.0
        {
            return;
        }

        let zoom = (surface_width / scene_width)
            .min(surface_height / scene_height)
            .clamp(MIN_ZOOM, MAX_ZOOM);

        self.zoom = zoom;
        self.pan_x = (surface_width - scene_width * zoom) / 2.0;
        self.pan_y = (surface_height - scene_height * zoom) / 2.0;
    }

    /// Resets to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            drillboard_core::constants::DEFAULT_SCENE_WIDTH,
            drillboard_core::constants::DEFAULT_SCENE_HEIGHT,
        )
    }
}
