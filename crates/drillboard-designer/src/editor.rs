//! Diagram editor state and input handling.
//!
//! [`Editor`] owns one scene together with its history, selection, tool,
//! viewport and settings. Hosts feed it [`EditorEvent`]s through
//! [`Editor::dispatch`] and react to the returned [`EditorEffect`]s; all
//! other mutations go through the scene-level actions below.

use drillboard_core::constants::DEFAULT_ARROW_LENGTH;
use drillboard_core::data::CatalogEntry;
use drillboard_settings::EditorSettings;
use tracing::debug;

use crate::geometry::{angle_at, clamp, rotate_point, snap, snap_angle, wrap_degrees, Point};
use crate::hit_test::{hit_handle, hit_shape, Handle};
use crate::history::History;
use crate::interaction::{
    ArrowEnd, EditorEffect, EditorEvent, Gesture, Key, Modifiers, PendingCommit, PointerButton,
    Tool,
};
use crate::model::{Shape, ShapeId, ShapeKind, ShapeType};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Interactive editor for a single diagram.
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Scene,
    history: History,
    selection: Option<ShapeId>,
    tool: Tool,
    gesture: Gesture,
    pending: Option<PendingCommit>,
    viewport: Viewport,
    settings: EditorSettings,
    /// Catalog entry the scene is saved back into.
    pub(crate) edit_target: Option<CatalogEntry>,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let scene = Scene::new(settings.canvas.width, settings.canvas.height);
        Self {
            viewport: Viewport::new(scene.width, scene.height),
            history: History::new(settings.history.capacity),
            scene,
            selection: None,
            tool: Tool::Select,
            gesture: Gesture::Idle,
            pending: None,
            settings,
            edit_target: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Option<&ShapeId> {
        self.selection.as_ref()
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.as_ref().and_then(|id| self.scene.get(id))
    }

    /// Selects `id`, or clears the selection with `None`. Unknown ids clear
    /// it as well. Returns whether the selection changed.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        let next = id.filter(|id| self.scene.contains_id(id));
        if next == self.selection {
            return false;
        }
        self.selection = next;
        true
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool. Any creation tool clears the selection.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.tool = tool;
        match tool {
            Tool::Select => false,
            Tool::Create(_) => self.selection.take().is_some(),
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Applies one input event and reports what the host should refresh.
    pub fn dispatch(&mut self, event: EditorEvent) -> Vec<EditorEffect> {
        let selection_before = self.selection.clone();
        let mut effects = Vec::new();

        let redraw = match event {
            EditorEvent::PointerDown {
                position, button, ..
            } => self.pointer_down(position, button),
            EditorEvent::PointerMove { position } => self.pointer_move(position),
            EditorEvent::PointerUp { .. } => self.pointer_up(),
            EditorEvent::DoubleClick { position } => {
                if let Some(effect) = self.double_click(position) {
                    effects.push(effect);
                }
                false
            }
            EditorEvent::KeyDown {
                key,
                modifiers,
                typing_in_field,
            } => !typing_in_field && self.key_down(&key, modifiers),
            EditorEvent::Wheel {
                delta_y, modifiers, ..
            } => self.wheel(delta_y, modifiers),
        };

        let selection_changed = self.selection != selection_before;
        if redraw || selection_changed {
            effects.insert(0, EditorEffect::Redraw);
        }
        if selection_changed {
            effects.push(EditorEffect::SelectionChanged(self.selection.clone()));
        }
        effects
    }

    fn to_scene(&self, screen: Point) -> Point {
        self.viewport
            .to_scene(screen, self.scene.width, self.scene.height)
    }

    /// Snaps then clamps a scene point into the canvas.
    fn place(&self, p: Point) -> Point {
        let grid = &self.settings.grid;
        self.scene.clamp_point(Point::new(
            snap(p.x, grid.size, grid.snap_enabled),
            snap(p.y, grid.size, grid.snap_enabled),
        ))
    }

    fn begin_gesture(&mut self, gesture: Gesture) {
        debug!("Gesture start: {:?}", gesture);
        self.pending = Some(PendingCommit::Snapshot(self.scene.clone()));
        self.gesture = gesture;
    }

    fn pointer_down(&mut self, screen: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        if !self.gesture.is_idle() {
            self.finish_gesture();
        }
        let p = self.to_scene(screen);

        if let Some(shape) = self.selected_shape() {
            if let Some(handle) = hit_handle(shape, p) {
                let shape = shape.clone();
                let gesture = handle_gesture(shape, handle, p);
                self.begin_gesture(gesture);
                return true;
            }
        }

        if let Some(id) = hit_shape(&self.scene, p) {
            let anchor = self.scene.get(&id).map(Shape::anchor).unwrap_or(p);
            self.selection = Some(id.clone());
            self.begin_gesture(Gesture::Dragging {
                id,
                offset: p - anchor,
            });
            return true;
        }

        if let Tool::Create(shape_type) = self.tool {
            self.create_shape(shape_type, p);
            return true;
        }

        self.selection.take().is_some()
    }

    fn create_shape(&mut self, shape_type: ShapeType, p: Point) {
        let at = self.place(p);
        self.history.push(&self.scene);
        let id = self.scene.generate_id(shape_type);
        self.scene.add(Shape::create(shape_type, id.clone(), at));
        self.selection = Some(id.clone());
        debug!("Created {} {} at {}", shape_type, id, at);

        if shape_type == ShapeType::Arrow {
            self.pending = Some(PendingCommit::AlreadyPushed);
            self.gesture = Gesture::DrawingArrow { id, fixed_end: at };
        }
    }

    fn pointer_move(&mut self, screen: Point) -> bool {
        if self.gesture.is_idle() {
            return false;
        }
        let p = self.to_scene(screen);
        let grid = self.settings.grid.clone();
        let (width, height) = (self.scene.width, self.scene.height);
        let target = self.place(p);

        match self.gesture.clone() {
            Gesture::Idle => false,
            Gesture::Dragging { id, offset } => {
                let Some(shape) = self.scene.get_mut(&id) else {
                    return false;
                };
                let wanted = Point::new(
                    snap(p.x - offset.x, grid.size, grid.snap_enabled),
                    snap(p.y - offset.y, grid.size, grid.snap_enabled),
                );
                match shape.arrow_endpoints() {
                    Some((start, end)) => {
                        let anchor = shape.anchor();
                        let dx = clamp(
                            wanted.x - anchor.x,
                            -start.x.min(end.x),
                            width - start.x.max(end.x),
                        );
                        let dy = clamp(
                            wanted.y - anchor.y,
                            -start.y.min(end.y),
                            height - start.y.max(end.y),
                        );
                        shape.translate(dx, dy);
                    }
                    None => shape.set_anchor(Point::new(
                        clamp(wanted.x, 0.0, width),
                        clamp(wanted.y, 0.0, height),
                    )),
                }
                true
            }
            Gesture::Resizing {
                id, origin, center, ..
            } => {
                let local = rotate_point(p, center, -origin.rot) - center;
                let mut resized = *origin;
                resized.resize_to(local, grid.size, grid.snap_enabled);
                match self.scene.get_mut(&id) {
                    Some(shape) => {
                        *shape = resized;
                        true
                    }
                    None => false,
                }
            }
            Gesture::Rotating {
                id,
                center,
                start_angle,
                start_rot,
            } => {
                let Some(shape) = self.scene.get_mut(&id) else {
                    return false;
                };
                let mut rot = start_rot + angle_at(center, p) - start_angle;
                if grid.snap_rotation {
                    rot = snap_angle(rot, grid.rotation_step);
                }
                shape.rot = wrap_degrees(rot);
                true
            }
            Gesture::DrawingArrow { id, fixed_end } => {
                let Some(shape) = self.scene.get_mut(&id) else {
                    return false;
                };
                if let ShapeKind::Arrow(arrow) = &mut shape.kind {
                    arrow.set_start(fixed_end);
                    arrow.set_end(target);
                }
                true
            }
            Gesture::MovingEndpoint { id, end } => {
                let Some(shape) = self.scene.get_mut(&id) else {
                    return false;
                };
                shape.bake_arrow_rotation();
                if let ShapeKind::Arrow(arrow) = &mut shape.kind {
                    match end {
                        ArrowEnd::Start => arrow.set_start(target),
                        ArrowEnd::End => arrow.set_end(target),
                    }
                }
                true
            }
        }
    }

    fn pointer_up(&mut self) -> bool {
        if self.gesture.is_idle() {
            return false;
        }
        if let Gesture::DrawingArrow { id, .. } = &self.gesture {
            let width = self.scene.width;
            if let Some(ShapeKind::Arrow(arrow)) = self.scene.get_mut(id).map(|s| &mut s.kind) {
                if arrow.length() < 1.0 {
                    let start = arrow.start();
                    let x2 = if start.x + DEFAULT_ARROW_LENGTH <= width {
                        start.x + DEFAULT_ARROW_LENGTH
                    } else {
                        start.x - DEFAULT_ARROW_LENGTH
                    };
                    arrow.set_end(Point::new(x2, start.y));
                }
            }
        }
        self.finish_gesture();
        true
    }

    /// Ends the active gesture, recording its snapshot if the scene changed.
    fn finish_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        if let Some(PendingCommit::Snapshot(before)) = self.pending.take() {
            if before != self.scene {
                self.history.push_snapshot(before);
                debug!("Gesture committed: {:?}", gesture);
                return;
            }
        }
        debug!("Gesture end: {:?}", gesture);
    }

    /// Abandons the active gesture and restores the scene as it was at
    /// press time. Returns false when no gesture is active.
    pub fn cancel_gesture(&mut self) -> bool {
        if self.gesture.is_idle() {
            return false;
        }
        let gesture = std::mem::take(&mut self.gesture);
        match self.pending.take() {
            Some(PendingCommit::Snapshot(before)) => self.scene = before,
            Some(PendingCommit::AlreadyPushed) => {
                self.history.revert(&mut self.scene);
            }
            None => {}
        }
        self.prune_selection();
        debug!("Gesture cancelled: {:?}", gesture);
        true
    }

    fn double_click(&mut self, screen: Point) -> Option<EditorEffect> {
        let p = self.to_scene(screen);
        let id = hit_shape(&self.scene, p)?;
        let text = self.scene.get(&id)?.text()?.to_string();
        self.selection = Some(id.clone());
        Some(EditorEffect::EditText { id, text })
    }

    fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        if *key == Key::Escape {
            return self.cancel_gesture() || self.selection.take().is_some();
        }
        if !self.gesture.is_idle() {
            return false;
        }

        let step = self.settings.grid.rotation_step;
        match key {
            Key::Delete | Key::Backspace => self.delete_selected(),
            Key::Char('z') if modifiers.command() => {
                if modifiers.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            Key::Char('y') if modifiers.command() => self.redo(),
            Key::Char('q') if !modifiers.command() => self.rotate_selected(-step),
            Key::Char('e') if !modifiers.command() => self.rotate_selected(step),
            _ => false,
        }
    }

    fn wheel(&mut self, delta_y: f64, modifiers: Modifiers) -> bool {
        if !modifiers.alt || delta_y == 0.0 || !self.gesture.is_idle() {
            return false;
        }
        let step = self.settings.grid.rotation_step;
        self.rotate_selected(step.copysign(delta_y))
    }

    /// Applies `edit` to a copy of the selected shape and commits it with a
    /// history entry when the copy differs. Returns whether anything changed.
    pub(crate) fn edit_selected(&mut self, edit: impl FnOnce(&mut Shape) -> bool) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(id) = self.selection.clone() else {
            return false;
        };
        let Some(current) = self.scene.get(&id) else {
            return false;
        };
        let mut edited = current.clone();
        if !edit(&mut edited) || edited == *current {
            return false;
        }
        self.history.push(&self.scene);
        if let Some(shape) = self.scene.get_mut(&id) {
            *shape = edited;
        }
        true
    }

    /// Rotates the selection by `delta` degrees.
    pub fn rotate_selected(&mut self, delta: f64) -> bool {
        self.edit_selected(|shape| {
            shape.rot = wrap_degrees(shape.rot + delta);
            true
        })
    }

    /// Replaces the content of text shape `id`. Empty input is ignored.
    pub fn commit_text(&mut self, id: &ShapeId, text: &str) -> bool {
        if text.trim().is_empty() || !self.scene.contains_id(id) {
            return false;
        }
        self.selection = Some(id.clone());
        self.edit_selected(|shape| shape.set_text(text))
    }

    /// Removes the selected shape, committing any gesture in progress first.
    pub fn delete_selected(&mut self) -> bool {
        if !self.gesture.is_idle() {
            self.finish_gesture();
        }
        let Some(id) = self.selection.take() else {
            return false;
        };
        if !self.scene.contains_id(&id) {
            return false;
        }
        self.history.push(&self.scene);
        self.scene.remove(&id);
        debug!("Deleted {}", id);
        true
    }

    /// Removes every shape. An empty scene is left alone.
    pub fn clear_scene(&mut self) -> bool {
        if self.scene.is_empty() {
            return false;
        }
        if !self.gesture.is_idle() {
            self.finish_gesture();
        }
        self.history.push(&self.scene);
        self.scene.clear();
        self.selection = None;
        true
    }

    pub fn undo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            self.finish_gesture();
        }
        if !self.history.undo(&mut self.scene) {
            return false;
        }
        self.prune_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            self.finish_gesture();
        }
        if !self.history.redo(&mut self.scene) {
            return false;
        }
        self.prune_selection();
        true
    }

    pub fn set_snap(&mut self, enabled: bool) {
        self.settings.grid.snap_enabled = enabled;
    }

    /// Sets the grid spacing; values below 1 become 1.
    pub fn set_grid_size(&mut self, size: f64) {
        self.settings.grid.size = if size.is_finite() { size.max(1.0) } else { 1.0 };
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.scene.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.scene.description = description.into();
    }

    /// Swaps in a freshly loaded scene, dropping history, selection and any
    /// gesture in progress.
    pub(crate) fn replace_scene(&mut self, scene: Scene) {
        self.gesture = Gesture::Idle;
        self.pending = None;
        self.selection = None;
        self.history.clear();
        self.scene = scene;
    }

    fn prune_selection(&mut self) {
        if let Some(id) = &self.selection {
            if !self.scene.contains_id(id) {
                self.selection = None;
            }
        }
    }
}

/// Gesture started by pressing `handle` of `shape` at `p`.
fn handle_gesture(shape: Shape, handle: Handle, p: Point) -> Gesture {
    let id = shape.id.clone();
    let center = shape.rotation_center();
    match handle {
        Handle::Resize(_) => Gesture::Resizing {
            id,
            handle,
            origin: Box::new(shape),
            center,
        },
        Handle::Rotate => Gesture::Rotating {
            id,
            center,
            start_angle: angle_at(center, p),
            start_rot: shape.rot,
        },
        Handle::ArrowStart => Gesture::MovingEndpoint {
            id,
            end: ArrowEnd::Start,
        },
        Handle::ArrowEnd => Gesture::MovingEndpoint {
            id,
            end: ArrowEnd::End,
        },
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
