//! Shape renderer
//!
//! Turns a [`Shape`] into a small set of drawing primitives plus the
//! bounding box used for selection overlays. Rendering is pure: absent size
//! fields use the type default and invalid colors fall back to the type
//! color, so any shape can be drawn.
//!
//! Primitives are expressed in unrotated scene coordinates; the shape's
//! rotation is carried separately as a [`Rotation`] about its pivot, the way
//! an SVG `rotate(deg cx cy)` transform applies it.

use smallvec::{smallvec, SmallVec};

use drillboard_core::constants::{ARROW_ENDPOINT_HIT_RADIUS, HANDLE_RADIUS};

use crate::geometry::Point;
use crate::hit_test::{local_handles, Handle};
use crate::model::{Shape, ShapeId, ShapeKind};
use crate::scene::Scene;

const OUTLINE_DARK: &str = "#1f2937";
const SELECTION_COLOR: &str = "#0ea5e9";
const HANDLE_FILL: &str = "#ffffff";
const ARROW_STROKE_WIDTH: f64 = 3.0;
/// Radius of the ring drawn around a selected arrow's midpoint.
pub const ARROW_HALO_RADIUS: f64 = 12.0;

/// Fill and stroke of a primitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub dashed: bool,
}

impl Style {
    pub fn fill(color: &str) -> Self {
        Self {
            fill: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn stroke(color: &str, width: f64) -> Self {
        Self {
            stroke: Some(color.to_string()),
            stroke_width: width,
            ..Default::default()
        }
    }

    pub fn outlined(fill: &str, stroke: &str, width: f64) -> Self {
        Self {
            fill: Some(fill.to_string()),
            stroke: Some(stroke.to_string()),
            stroke_width: width,
            ..Default::default()
        }
    }

    /// Invisible but clickable area.
    pub fn hit_area() -> Self {
        Self::fill("transparent")
    }

    fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Path {
        d: String,
        style: Style,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        style: Style,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Style,
        arrow_head: bool,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        style: Style,
    },
}

/// Rotation of a whole drawable about a pivot, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub center: Point,
}

/// Selection geometry of a drawn shape, before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingBox {
    /// Box centered on the shape anchor.
    Rect {
        center: Point,
        width: f64,
        height: f64,
    },
    /// Arrows have no box: two endpoint handles and a ring at the midpoint.
    Arrow {
        start: Point,
        end: Point,
        halo_center: Point,
        halo_radius: f64,
    },
}

/// Whether primitives carry the shape id for the interactive layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tagging {
    Interactive,
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub id: Option<ShapeId>,
    pub rotation: Option<Rotation>,
    pub primitives: SmallVec<[Primitive; 4]>,
    pub bounds: BoundingBox,
}

/// Formats a coordinate for path data: three decimals, no trailing zeros.
pub(crate) fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0 + 0.0;
    format!("{}", rounded)
}

fn rotation_of(shape: &Shape) -> Option<Rotation> {
    (shape.rot != 0.0).then(|| Rotation {
        degrees: shape.rot,
        center: shape.rotation_center(),
    })
}

fn bounds_of(shape: &Shape) -> BoundingBox {
    match &shape.kind {
        ShapeKind::Arrow(arrow) => BoundingBox::Arrow {
            start: arrow.start(),
            end: arrow.end(),
            halo_center: arrow.midpoint(),
            halo_radius: ARROW_HALO_RADIUS,
        },
        _ => {
            let (width, height) = shape.box_size().unwrap_or((0.0, 0.0));
            BoundingBox::Rect {
                center: shape.anchor(),
                width,
                height,
            }
        }
    }
}

/// Draws one shape.
pub fn render_shape(shape: &Shape, tagging: Tagging) -> Drawable {
    let color = shape.resolved_color();
    // Resolved radius / side / arm / font size, defaults applied
    let size = shape.primary_size().unwrap_or_default();
    let (bw, bh) = shape.box_size().unwrap_or_default();
    let primitives: SmallVec<[Primitive; 4]> = match &shape.kind {
        ShapeKind::Cone(s) => {
            let r = size;
            let (cx, cy) = (s.x, s.y);
            let body = format!(
                "M {} {} L {} {} Q {} {} {} {} Z",
                num(cx),
                num(cy - r),
                num(cx - 0.8 * r),
                num(cy + 0.6 * r),
                num(cx),
                num(cy + 0.8 * r),
                num(cx + 0.8 * r),
                num(cy + 0.6 * r),
            );
            smallvec![
                Primitive::Ellipse {
                    cx,
                    cy: cy + 0.6 * r,
                    rx: r,
                    ry: 0.3 * r,
                    style: Style::outlined(color, "#222222", 0.5),
                },
                Primitive::Path {
                    d: body,
                    style: Style::outlined(color, "#222222", 0.5),
                },
            ]
        }
        ShapeKind::Player(s) => {
            let r = size;
            let (cx, cy) = (s.x, s.y);
            let torso = format!(
                "M {} {} Q {} {} {} {} Q {} {} {} {} Z",
                num(cx - 0.8 * r),
                num(cy + 0.9 * r),
                num(cx - 0.8 * r),
                num(cy - 0.1 * r),
                num(cx),
                num(cy - 0.1 * r),
                num(cx + 0.8 * r),
                num(cy - 0.1 * r),
                num(cx + 0.8 * r),
                num(cy + 0.9 * r),
            );
            smallvec![
                Primitive::Path {
                    d: torso,
                    style: Style::outlined(color, OUTLINE_DARK, 0.8),
                },
                Primitive::Circle {
                    cx,
                    cy: cy - 0.45 * r,
                    r: 0.45 * r,
                    style: Style::outlined("#fde68a", OUTLINE_DARK, 0.8),
                },
            ]
        }
        ShapeKind::Ball(s) => {
            let r = size;
            smallvec![
                Primitive::Circle {
                    cx: s.x,
                    cy: s.y,
                    r,
                    style: Style::outlined(color, "#111827", 1.5),
                },
                Primitive::Circle {
                    cx: s.x,
                    cy: s.y,
                    r: 0.35 * r,
                    style: Style::fill("#111827"),
                },
            ]
        }
        ShapeKind::Disc(s) => {
            let r = size;
            smallvec![Primitive::Ellipse {
                cx: s.x,
                cy: s.y,
                rx: r,
                ry: 0.35 * r,
                style: Style::outlined(color, "#7c2d12", 0.8),
            }]
        }
        ShapeKind::Circle(s) => {
            let r = size;
            smallvec![Primitive::Circle {
                cx: s.x,
                cy: s.y,
                r,
                style: Style::outlined(color, color, 2.0).with_fill_opacity(0.25),
            }]
        }
        ShapeKind::Ring(s) => smallvec![Primitive::Circle {
            cx: s.x,
            cy: s.y,
            r: size,
            style: Style::stroke(color, 3.0),
        }],
        ShapeKind::Post(s) => {
            let r = size;
            smallvec![Primitive::Rect {
                x: s.x - 0.15 * r,
                y: s.y - r,
                width: 0.3 * r,
                height: 2.0 * r,
                style: Style::fill(color),
            }]
        }
        ShapeKind::Rect(s) => {
            let (w, h) = (bw, bh);
            smallvec![Primitive::Rect {
                x: s.x - w / 2.0,
                y: s.y - h / 2.0,
                width: w,
                height: h,
                style: Style::stroke(color, 2.0),
            }]
        }
        ShapeKind::Goal(s) => {
            let (w, h) = (bw, bh);
            let (left, top) = (s.x - w / 2.0, s.y - h / 2.0);
            let mut net = String::new();
            for i in 1..6 {
                let x = left + w * f64::from(i) / 6.0;
                net.push_str(&format!("M {} {} L {} {} ", num(x), num(top), num(x), num(top + h)));
            }
            net.push_str(&format!(
                "M {} {} L {} {}",
                num(left),
                num(s.y),
                num(left + w),
                num(s.y)
            ));
            smallvec![
                Primitive::Rect {
                    x: left,
                    y: top,
                    width: w,
                    height: h,
                    style: Style::outlined(color, "#111827", 3.0),
                },
                Primitive::Path {
                    d: net,
                    style: Style::stroke("#9ca3af", 1.0),
                },
            ]
        }
        ShapeKind::Hurdle(s) => {
            let (w, h) = (bw, bh);
            let (left, top) = (s.x - w / 2.0, s.y - h / 2.0);
            let legs = format!(
                "M {} {} L {} {} M {} {} L {} {}",
                num(left + 2.0),
                num(top),
                num(left + 2.0),
                num(top + h),
                num(left + w - 2.0),
                num(top),
                num(left + w - 2.0),
                num(top + h),
            );
            smallvec![
                Primitive::Path {
                    d: legs,
                    style: Style::stroke(color, 3.0),
                },
                Primitive::Rect {
                    x: left,
                    y: top,
                    width: w,
                    height: 0.35 * h,
                    style: Style::outlined(color, "#854d0e", 0.8),
                },
            ]
        }
        ShapeKind::Ladder(s) => {
            let (w, h) = (bw, bh);
            let steps = s.steps_or_default();
            let (left, top) = (s.x - w / 2.0, s.y - h / 2.0);
            let mut rungs = String::new();
            for i in 1..steps {
                let x = left + w / f64::from(steps) * f64::from(i);
                if !rungs.is_empty() {
                    rungs.push(' ');
                }
                rungs.push_str(&format!("M {} {} L {} {}", num(x), num(top), num(x), num(top + h)));
            }
            let mut primitives: SmallVec<[Primitive; 4]> = smallvec![Primitive::Rect {
                x: left,
                y: top,
                width: w,
                height: h,
                style: Style::stroke(color, 2.0),
            }];
            if !rungs.is_empty() {
                primitives.push(Primitive::Path {
                    d: rungs,
                    style: Style::stroke(color, 2.0),
                });
            }
            primitives
        }
        ShapeKind::Triangle(s) => {
            let [apex, left, right] = s.vertices();
            let d = format!(
                "M {} {} L {} {} L {} {} Z",
                num(apex.x),
                num(apex.y),
                num(left.x),
                num(left.y),
                num(right.x),
                num(right.y),
            );
            smallvec![Primitive::Path {
                d,
                style: Style::outlined(color, "#581c87", 1.0),
            }]
        }
        ShapeKind::Cross(s) => {
            let arm = s.arm();
            let d = format!(
                "M {} {} L {} {} M {} {} L {} {}",
                num(s.x - arm),
                num(s.y - arm),
                num(s.x + arm),
                num(s.y + arm),
                num(s.x + arm),
                num(s.y - arm),
                num(s.x - arm),
                num(s.y + arm),
            );
            smallvec![Primitive::Path {
                d,
                style: Style::stroke(color, 3.0),
            }]
        }
        ShapeKind::Arrow(a) => {
            let mut primitives: SmallVec<[Primitive; 4]> = smallvec![Primitive::Line {
                x1: a.x1,
                y1: a.y1,
                x2: a.x2,
                y2: a.y2,
                style: Style::stroke(color, ARROW_STROKE_WIDTH),
                arrow_head: true,
            }];
            if tagging == Tagging::Interactive {
                for end in [a.start(), a.end()] {
                    primitives.push(Primitive::Circle {
                        cx: end.x,
                        cy: end.y,
                        r: ARROW_ENDPOINT_HIT_RADIUS,
                        style: Style::hit_area(),
                    });
                }
            }
            primitives
        }
        ShapeKind::Text(t) => smallvec![Primitive::Text {
            x: t.x,
            y: t.y,
            content: t.content().to_string(),
            size: t.font_size(),
            style: Style::fill(color),
        }],
    };

    tracing::trace!(
        "rendered {} {} ({} primitives)",
        shape.shape_type(),
        shape.id,
        primitives.len()
    );

    Drawable {
        id: (tagging == Tagging::Interactive).then(|| shape.id.clone()),
        rotation: rotation_of(shape),
        primitives,
        bounds: bounds_of(shape),
    }
}

/// Draws every shape in item order (painter's algorithm).
pub fn render_scene(scene: &Scene, tagging: Tagging) -> Vec<Drawable> {
    scene
        .items()
        .iter()
        .map(|shape| render_shape(shape, tagging))
        .collect()
}

/// Selection decoration for `shape`: dashed box, corner handles and a
/// rotation grip, or for arrows the endpoint handles and a midpoint ring.
pub fn selection_overlay(shape: &Shape) -> Drawable {
    let bounds = bounds_of(shape);
    let center = shape.rotation_center();
    let mut primitives: SmallVec<[Primitive; 4]> = SmallVec::new();

    match bounds {
        BoundingBox::Rect { width, height, .. } => {
            primitives.push(Primitive::Rect {
                x: center.x - width / 2.0,
                y: center.y - height / 2.0,
                width,
                height,
                style: Style::stroke(SELECTION_COLOR, 1.0).dashed(),
            });
        }
        BoundingBox::Arrow {
            halo_center,
            halo_radius,
            ..
        } => {
            primitives.push(Primitive::Circle {
                cx: halo_center.x,
                cy: halo_center.y,
                r: halo_radius,
                style: Style::stroke(SELECTION_COLOR, 1.0).dashed(),
            });
        }
    }

    for (handle, local) in local_handles(shape) {
        let at = center + local;
        if handle == Handle::Rotate {
            primitives.push(Primitive::Line {
                x1: center.x,
                y1: at.y + HANDLE_RADIUS,
                x2: at.x,
                y2: at.y,
                style: Style::stroke(SELECTION_COLOR, 1.0),
                arrow_head: false,
            });
        }
        primitives.push(Primitive::Circle {
            cx: at.x,
            cy: at.y,
            r: HANDLE_RADIUS * 0.6,
            style: Style::outlined(HANDLE_FILL, SELECTION_COLOR, 1.5),
        });
    }

    Drawable {
        id: None,
        rotation: rotation_of(shape),
        primitives,
        bounds,
    }
}
