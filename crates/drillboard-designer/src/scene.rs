//! The diagram document being edited.

use drillboard_core::constants::{DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH};

use crate::geometry::{clamp, Point};
use crate::model::{Shape, ShapeId, ShapeType};

/// Canvas size, metadata and the ordered shape list. Later items draw over
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub name: String,
    pub description: String,
    items: Vec<Shape>,
}

impl Scene {
    /// Empty scene. Non-positive sizes fall back to the defaults.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: positive_or(width, DEFAULT_SCENE_WIDTH),
            height: positive_or(height, DEFAULT_SCENE_HEIGHT),
            name: String::new(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Shape] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `shape` on top of the z-order. Id uniqueness is the caller's
    /// job; see [`Scene::generate_id`].
    pub fn add(&mut self, shape: Shape) {
        self.items.push(shape);
    }

    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.items.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.items.iter_mut().find(|s| &s.id == id)
    }

    pub fn position(&self, id: &ShapeId) -> Option<usize> {
        self.items.iter().position(|s| &s.id == id)
    }

    pub fn contains_id(&self, id: &ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Fresh id for a new shape, re-drawn until it is unused in this scene.
    pub fn generate_id(&self, shape_type: ShapeType) -> ShapeId {
        loop {
            let id = ShapeId::generate(shape_type);
            if !self.contains_id(&id) {
                return id;
            }
        }
    }

    /// Clamps `p` into `[0, width] x [0, height]`.
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(clamp(p.x, 0.0, self.width), clamp(p.y, 0.0, self.height))
    }

    pub fn contains_point(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_SCENE_WIDTH, DEFAULT_SCENE_HEIGHT)
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}
