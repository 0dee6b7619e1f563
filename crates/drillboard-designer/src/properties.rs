//! Property panel binding.
//!
//! [`PropertyPanel`] is the read side: a flat view of the selected shape
//! with values ready for form inputs. [`Editor::commit_field`] is the write
//! side: it parses the raw input text and applies it as one undoable edit.

use serde::Serialize;

use crate::editor::Editor;
use crate::geometry::{wrap_degrees, Point};
use crate::model::{
    is_valid_color, Shape, ShapeId, ShapeKind, FALLBACK_COLOR, MAX_LADDER_STEPS,
};

/// Editable fields of the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelField {
    X,
    Y,
    Rotation,
    Size,
    Color,
    Text,
    Steps,
}

impl PanelField {
    /// Parses a form input name (`x`, `rot`, `size`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "x" => Some(PanelField::X),
            "y" => Some(PanelField::Y),
            "rot" | "rotation" => Some(PanelField::Rotation),
            "size" => Some(PanelField::Size),
            "color" => Some(PanelField::Color),
            "text" => Some(PanelField::Text),
            "steps" => Some(PanelField::Steps),
            _ => None,
        }
    }
}

/// Values shown for the selected shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyPanel {
    pub id: ShapeId,
    /// Read-only type label.
    pub type_label: &'static str,
    /// Anchor position; the start endpoint for arrows.
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    /// Name of the geometry field behind `size` (`r`, `w`, `a`, `s` or
    /// `size`); `None` when the shape has no size.
    pub size_field: Option<&'static str>,
    pub size: Option<f64>,
    /// Always a `#rrggbb` value usable by a color input.
    pub color: String,
    pub text: Option<String>,
    pub steps: Option<u32>,
}

impl PropertyPanel {
    pub fn from_shape(shape: &Shape) -> Self {
        let anchor = shape.anchor();
        let steps = match &shape.kind {
            ShapeKind::Ladder(ladder) => Some(ladder.steps_or_default()),
            _ => None,
        };
        Self {
            id: shape.id.clone(),
            type_label: shape.shape_type().label(),
            x: anchor.x,
            y: anchor.y,
            rotation: shape.rot,
            size_field: size_field(&shape.kind),
            size: shape.primary_size(),
            color: normalize_color(shape.color.as_deref().unwrap_or(FALLBACK_COLOR)),
            text: shape.text().map(str::to_string),
            steps,
        }
    }
}

fn size_field(kind: &ShapeKind) -> Option<&'static str> {
    match kind {
        ShapeKind::Cone(_)
        | ShapeKind::Player(_)
        | ShapeKind::Ball(_)
        | ShapeKind::Disc(_)
        | ShapeKind::Circle(_)
        | ShapeKind::Ring(_)
        | ShapeKind::Post(_) => Some("r"),
        ShapeKind::Rect(_) | ShapeKind::Goal(_) | ShapeKind::Hurdle(_) | ShapeKind::Ladder(_) => {
            Some("w")
        }
        ShapeKind::Triangle(_) => Some("a"),
        ShapeKind::Cross(_) => Some("s"),
        ShapeKind::Text(_) => Some("size"),
        ShapeKind::Arrow(_) => None,
    }
}

/// Reads the leading number of `input`, ignoring surrounding text
/// (`"12px"` is 12). Anything without a numeric prefix reads as 0.
pub fn parse_number(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let candidate_len = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..candidate_len];

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Expands `#rgb` to `#rrggbb` and lowercases. Invalid colors become
/// [`FALLBACK_COLOR`].
pub fn normalize_color(color: &str) -> String {
    let color = color.trim();
    if !is_valid_color(color) {
        return FALLBACK_COLOR.to_string();
    }
    let hex = color[1..].to_ascii_lowercase();
    if hex.len() == 3 {
        let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
        format!("#{expanded}")
    } else {
        format!("#{hex}")
    }
}

impl Editor {
    /// Panel contents for the current selection.
    pub fn panel(&self) -> Option<PropertyPanel> {
        self.selected_shape().map(PropertyPanel::from_shape)
    }

    /// Applies raw panel input to the selected shape as one undoable edit.
    /// Returns false when nothing is selected, the field does not apply to
    /// the shape, or the value is unchanged.
    pub fn commit_field(&mut self, field: PanelField, input: &str) -> bool {
        match field {
            PanelField::X | PanelField::Y => {
                let value = parse_number(input);
                self.edit_selected(|shape| {
                    let anchor = shape.anchor();
                    let target = match field {
                        PanelField::X => Point::new(value, anchor.y),
                        _ => Point::new(anchor.x, value),
                    };
                    shape.set_anchor(target);
                    true
                })
            }
            PanelField::Rotation => {
                let value = wrap_degrees(parse_number(input));
                self.edit_selected(|shape| {
                    shape.rot = value;
                    true
                })
            }
            PanelField::Size => {
                let value = parse_number(input);
                self.edit_selected(|shape| shape.set_primary_size(value))
            }
            PanelField::Color => {
                let color = input.trim();
                if color.is_empty() {
                    return false;
                }
                self.edit_selected(|shape| {
                    shape.color = Some(color.to_string());
                    true
                })
            }
            PanelField::Text => {
                if input.trim().is_empty() {
                    return false;
                }
                self.edit_selected(|shape| shape.set_text(input))
            }
            PanelField::Steps => {
                let steps = parse_number(input)
                    .round()
                    .clamp(1.0, f64::from(MAX_LADDER_STEPS)) as u32;
                self.edit_selected(|shape| match &mut shape.kind {
                    ShapeKind::Ladder(ladder) => {
                        ladder.steps = Some(steps);
                        true
                    }
                    _ => false,
                })
            }
        }
    }
}
