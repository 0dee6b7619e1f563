//! Platform-neutral input for the editor.
//!
//! A host adapter turns its pointer, wheel and keyboard events into
//! [`EditorEvent`]s (surface pixel positions, key names, modifier flags) and
//! feeds them to [`crate::editor::Editor::dispatch`], which answers with
//! [`EditorEffect`]s for the host to act on.

use crate::geometry::Point;
use crate::hit_test::Handle;
use crate::model::{Shape, ShapeId, ShapeType};
use crate::scene::Scene;

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Select,
    /// Clicking empty space creates a shape of this type.
    Create(ShapeType),
}

impl Tool {
    /// Parses a toolbar name: `select` or any shape type name.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("select") {
            return Some(Tool::Select);
        }
        ShapeType::from_name(name).map(Tool::Create)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Cmd on macOS
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl or Cmd, the platform shortcut modifier.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    /// A printable key, lowercased.
    Char(char),
    Other(String),
}

impl Key {
    /// Maps a DOM-style key name (`"Delete"`, `"Escape"`, `"z"`, ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    PointerDown {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
    },
    DoubleClick {
        position: Point,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        /// A text input or textarea has focus; shortcuts are suppressed.
        typing_in_field: bool,
    },
    Wheel {
        position: Point,
        delta_y: f64,
        modifiers: Modifiers,
    },
}

impl EditorEvent {
    /// Primary-button press with no modifiers.
    pub fn press(x: f64, y: f64) -> Self {
        EditorEvent::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        EditorEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    pub fn release(x: f64, y: f64) -> Self {
        EditorEvent::PointerUp {
            position: Point::new(x, y),
        }
    }

    /// Key press outside any text field.
    pub fn key(name: &str, modifiers: Modifiers) -> Self {
        EditorEvent::KeyDown {
            key: Key::from_name(name),
            modifiers,
            typing_in_field: false,
        }
    }
}

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEffect {
    /// Scene, selection or overlay changed; redraw the surface.
    Redraw,
    /// Selection changed; refresh the property panel.
    SelectionChanged(Option<ShapeId>),
    /// Open an inline editor for a text shape; answer with
    /// [`crate::editor::Editor::commit_text`].
    EditText { id: ShapeId, text: String },
}

/// Which end of an arrow is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEnd {
    Start,
    End,
}

/// The pointer gesture in progress. Shape creation happens within a single
/// pointer-down, so it has no resting state of its own; arrow creation
/// continues as [`Gesture::DrawingArrow`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        id: ShapeId,
        /// Pointer minus anchor at press time.
        offset: Point,
    },
    Resizing {
        id: ShapeId,
        handle: Handle,
        /// Geometry at press time.
        origin: Box<Shape>,
        center: Point,
    },
    Rotating {
        id: ShapeId,
        center: Point,
        start_angle: f64,
        start_rot: f64,
    },
    DrawingArrow {
        id: ShapeId,
        fixed_end: Point,
    },
    MovingEndpoint {
        id: ShapeId,
        end: ArrowEnd,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn shape_id(&self) -> Option<&ShapeId> {
        match self {
            Gesture::Idle => None,
            Gesture::Dragging { id, .. }
            | Gesture::Resizing { id, .. }
            | Gesture::Rotating { id, .. }
            | Gesture::DrawingArrow { id, .. }
            | Gesture::MovingEndpoint { id, .. } => Some(id),
        }
    }
}

/// How the gesture in progress reaches the history on release.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingCommit {
    /// Scene as it was at press time; pushed on release if anything changed.
    Snapshot(Scene),
    /// History was pushed when the gesture began (shape creation).
    AlreadyPushed,
}
