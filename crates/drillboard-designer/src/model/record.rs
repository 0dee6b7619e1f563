//! Flat wire form of a shape, as stored in a diagram's `items` array.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{
    ArrowShape, BoxShape, CrossShape, LadderShape, RoundShape, Shape, ShapeId, ShapeKind,
    ShapeType, TextShape, TriangleShape, MAX_LADDER_STEPS,
};
use crate::geometry::Point;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Unknown shape type '{0}'")]
    UnknownType(String),
}

/// One stored item: a `type` tag, the optional geometry fields of every
/// shape family, and whatever else the item carried.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub shape_type: String,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub x: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub y: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub x1: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub y1: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub x2: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub y2: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub r: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub w: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub h: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub a: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub s: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub steps: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rot: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShapeRecord {
    pub fn recognized_type(&self) -> Option<ShapeType> {
        ShapeType::from_name(&self.shape_type)
    }
}

/// Ids written by older hosts may be numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers may arrive as numeric strings; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A non-string tag reads as empty and is rejected as an unknown type.
fn lenient_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = ShapeError;

    /// Missing coordinates default to 0; missing ids are generated.
    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        let shape_type = record
            .recognized_type()
            .ok_or_else(|| ShapeError::UnknownType(record.shape_type.clone()))?;

        let x = record.x.unwrap_or(0.0);
        let y = record.y.unwrap_or(0.0);
        let round = RoundShape { x, y, r: record.r };
        let boxed = BoxShape {
            x,
            y,
            w: record.w,
            h: record.h,
        };

        let kind = match shape_type {
            ShapeType::Cone => ShapeKind::Cone(round),
            ShapeType::Player => ShapeKind::Player(round),
            ShapeType::Ball => ShapeKind::Ball(round),
            ShapeType::Disc => ShapeKind::Disc(round),
            ShapeType::Circle => ShapeKind::Circle(round),
            ShapeType::Ring => ShapeKind::Ring(round),
            ShapeType::Post => ShapeKind::Post(round),
            ShapeType::Rect => ShapeKind::Rect(boxed),
            ShapeType::Goal => ShapeKind::Goal(boxed),
            ShapeType::Hurdle => ShapeKind::Hurdle(boxed),
            ShapeType::Ladder => ShapeKind::Ladder(LadderShape {
                x,
                y,
                w: record.w,
                h: record.h,
                steps: record
                    .steps
                    .map(|s| s.round().clamp(1.0, f64::from(MAX_LADDER_STEPS)) as u32),
            }),
            ShapeType::Triangle => ShapeKind::Triangle(TriangleShape { x, y, a: record.a }),
            ShapeType::Cross => ShapeKind::Cross(CrossShape { x, y, s: record.s }),
            ShapeType::Arrow => {
                let start = Point::new(record.x1.unwrap_or(x), record.y1.unwrap_or(y));
                let end = Point::new(
                    record.x2.unwrap_or(start.x),
                    record.y2.unwrap_or(start.y),
                );
                ShapeKind::Arrow(ArrowShape::new(start, end))
            }
            ShapeType::Text => ShapeKind::Text(TextShape {
                x,
                y,
                text: record.text.clone(),
                size: record.size,
            }),
        };

        let id = match record.id {
            Some(id) => ShapeId::new(id),
            None => ShapeId::generate(shape_type),
        };

        Ok(Shape {
            id,
            rot: record.rot.filter(|r| r.is_finite()).unwrap_or(0.0),
            color: record.color,
            kind,
            extra: record.extra,
        })
    }
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        let mut record = ShapeRecord {
            shape_type: shape.shape_type().as_str().to_string(),
            id: Some(shape.id.to_string()),
            rot: (shape.rot != 0.0).then_some(shape.rot),
            color: shape.color.clone(),
            extra: shape.extra.clone(),
            ..Default::default()
        };

        match &shape.kind {
            ShapeKind::Cone(s)
            | ShapeKind::Player(s)
            | ShapeKind::Ball(s)
            | ShapeKind::Disc(s)
            | ShapeKind::Circle(s)
            | ShapeKind::Ring(s)
            | ShapeKind::Post(s) => {
                record.x = Some(s.x);
                record.y = Some(s.y);
                record.r = s.r;
            }
            ShapeKind::Rect(s) | ShapeKind::Goal(s) | ShapeKind::Hurdle(s) => {
                record.x = Some(s.x);
                record.y = Some(s.y);
                record.w = s.w;
                record.h = s.h;
            }
            ShapeKind::Ladder(s) => {
                record.x = Some(s.x);
                record.y = Some(s.y);
                record.w = s.w;
                record.h = s.h;
                record.steps = s.steps.map(f64::from);
            }
            ShapeKind::Triangle(s) => {
                record.x = Some(s.x);
                record.y = Some(s.y);
                record.a = s.a;
            }
            ShapeKind::Cross(s) => {
                record.x = Some(s.x);
                record.y = Some(s.y);
                record.s = s.s;
            }
            ShapeKind::Arrow(s) => {
                record.x1 = Some(s.x1);
                record.y1 = Some(s.y1);
                record.x2 = Some(s.x2);
                record.y2 = Some(s.y2);
            }
            ShapeKind::Text(s) => {
                record.x = Some(s.x);
                record.y = Some(s.y);
                record.text = s.text.clone();
                record.size = s.size;
            }
        }

        record
    }
}

impl From<Shape> for ShapeRecord {
    fn from(shape: Shape) -> Self {
        ShapeRecord::from(&shape)
    }
}
