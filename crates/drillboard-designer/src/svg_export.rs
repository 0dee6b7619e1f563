//! SVG output for diagrams.
//!
//! - [`export_scene`]: static, self-contained thumbnail of a scene
//! - [`export_document`]: same, straight from a stored document, skipping
//!   items this version cannot draw
//! - [`render_interactive`]: the editing surface, with `data-id` tags and
//!   the selection overlay

use std::collections::BTreeSet;

use drillboard_settings::EditorSettings;

use crate::bridge::SceneDocument;
use crate::editor::Editor;
use crate::model::{Shape, ShapeId};
use crate::renderer::{
    num, render_scene, render_shape, selection_overlay, Drawable, Primitive, Style, Tagging,
};
use crate::scene::Scene;

const PITCH_GREEN: &str = "#16a34a";
const ARROW_HEAD_ID: &str = "arrowHead";
const DEFAULT_ARROW_COLOR: &str = "#111827";
const GRID_ID: &str = "grid";

/// What to paint behind the shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub background: bool,
    pub show_grid: bool,
    pub grid_size: f64,
}

impl ExportOptions {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            background: settings.export.background,
            show_grid: settings.export.show_grid,
            grid_size: settings.grid.size,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

/// Renders `scene` as a standalone SVG document.
pub fn export_scene(scene: &Scene, options: &ExportOptions) -> String {
    let drawables = render_scene(scene, Tagging::Static);
    write_svg(scene.width, scene.height, &drawables, None, options)
}

/// Renders a stored document without going through an editor. Items with an
/// unknown `type` are skipped.
pub fn export_document(document: &SceneDocument, options: &ExportOptions) -> String {
    let drawables: Vec<Drawable> = document
        .items
        .iter()
        .filter_map(|record| match Shape::try_from(record.clone()) {
            Ok(shape) => Some(render_shape(&shape, Tagging::Static)),
            Err(e) => {
                tracing::debug!("Skipping item in export: {}", e);
                None
            }
        })
        .collect();
    let (width, height) = document.canvas();
    write_svg(width, height, &drawables, None, options)
}

/// Renders the editing surface: tagged shapes, the grid and the selection.
pub fn render_interactive(editor: &Editor) -> String {
    let scene = editor.scene();
    let drawables = render_scene(scene, Tagging::Interactive);
    let overlay = editor.selected_shape().map(selection_overlay);
    let options = ExportOptions {
        background: true,
        show_grid: true,
        grid_size: editor.settings().grid.size,
    };
    write_svg(
        scene.width,
        scene.height,
        &drawables,
        overlay.as_ref().map(|o| (o, editor.selection())),
        &options,
    )
}

fn write_svg(
    width: f64,
    height: f64,
    drawables: &[Drawable],
    overlay: Option<(&Drawable, Option<&ShapeId>)>,
    options: &ExportOptions,
) -> String {
    let (w, h) = (num(width), num(height));
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n"
    ));

    svg.push_str("<defs>\n");
    for color in arrow_colors(drawables) {
        svg.push_str(&format!(
            "<marker id=\"{}\" viewBox=\"0 0 10 10\" refX=\"8\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>\n",
            arrow_head_id(color),
            escape_xml(color)
        ));
    }
    if options.show_grid {
        let g = num(options.grid_size.max(1.0));
        svg.push_str(&format!(
            "<pattern id=\"{GRID_ID}\" width=\"{g}\" height=\"{g}\" patternUnits=\"userSpaceOnUse\"><path d=\"M {g} 0 L 0 0 0 {g}\" fill=\"none\" stroke=\"#ffffff\" stroke-opacity=\"0.2\" stroke-width=\"1\"/></pattern>\n"
        ));
    }
    svg.push_str("</defs>\n");

    if options.background {
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{PITCH_GREEN}\"/>\n"
        ));
    }
    if options.show_grid {
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"url(#{GRID_ID})\"/>\n"
        ));
    }

    let selected = overlay.and_then(|(_, id)| id);
    for drawable in drawables {
        let class = match (&drawable.id, selected) {
            (Some(id), Some(selected)) if id == selected => Some("selected"),
            _ => None,
        };
        write_group(&mut svg, drawable, class);
    }
    if let Some((overlay, _)) = overlay {
        write_group(&mut svg, overlay, Some("selection-overlay"));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Distinct stroke colors of arrow lines, one head marker each.
fn arrow_colors(drawables: &[Drawable]) -> BTreeSet<&str> {
    drawables
        .iter()
        .flat_map(|drawable| drawable.primitives.iter())
        .filter_map(|primitive| match primitive {
            Primitive::Line {
                style,
                arrow_head: true,
                ..
            } => Some(style.stroke.as_deref().unwrap_or(DEFAULT_ARROW_COLOR)),
            _ => None,
        })
        .collect()
}

fn arrow_head_id(color: &str) -> String {
    let suffix: String = color.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("{ARROW_HEAD_ID}-{suffix}")
}

fn write_group(svg: &mut String, drawable: &Drawable, class: Option<&str>) {
    svg.push_str("<g");
    if let Some(id) = &drawable.id {
        svg.push_str(&format!(" data-id=\"{}\"", escape_xml(id.as_str())));
    }
    if let Some(class) = class {
        svg.push_str(&format!(" class=\"{}\"", class));
    }
    if let Some(rotation) = &drawable.rotation {
        svg.push_str(&format!(
            " transform=\"rotate({} {} {})\"",
            num(rotation.degrees),
            num(rotation.center.x),
            num(rotation.center.y)
        ));
    }
    svg.push_str(">\n");
    for primitive in &drawable.primitives {
        write_primitive(svg, primitive);
    }
    svg.push_str("</g>\n");
}

fn style_attrs(style: &Style) -> String {
    let mut attrs = format!(" fill=\"{}\"", escape_xml(style.fill.as_deref().unwrap_or("none")));
    if let Some(opacity) = style.fill_opacity {
        attrs.push_str(&format!(" fill-opacity=\"{}\"", num(opacity)));
    }
    if let Some(stroke) = &style.stroke {
        attrs.push_str(&format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_xml(stroke),
            num(style.stroke_width)
        ));
    }
    if style.dashed {
        attrs.push_str(" stroke-dasharray=\"4 3\"");
    }
    attrs
}

fn write_primitive(svg: &mut String, primitive: &Primitive) {
    let element = match primitive {
        Primitive::Path { d, style } => format!("<path d=\"{}\"{}/>", d, style_attrs(style)),
        Primitive::Circle { cx, cy, r, style } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            num(*cx),
            num(*cy),
            num(*r),
            style_attrs(style)
        ),
        Primitive::Ellipse {
            cx,
            cy,
            rx,
            ry,
            style,
        } => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}/>",
            num(*cx),
            num(*cy),
            num(*rx),
            num(*ry),
            style_attrs(style)
        ),
        Primitive::Rect {
            x,
            y,
            width,
            height,
            style,
        } => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>",
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            style_attrs(style)
        ),
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            style,
            arrow_head,
        } => {
            let marker = if *arrow_head {
                let color = style.stroke.as_deref().unwrap_or(DEFAULT_ARROW_COLOR);
                format!(" marker-end=\"url(#{})\"", arrow_head_id(color))
            } else {
                String::new()
            };
            format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{} stroke-linecap=\"round\"{}/>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                style_attrs(style),
                marker
            )
        }
        Primitive::Text {
            x,
            y,
            content,
            size,
            style,
        } => format!(
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\"{}>{}</text>",
            num(*x),
            num(*y),
            num(*size),
            style_attrs(style),
            escape_xml(content)
        ),
    };
    svg.push_str(&element);
    svg.push('\n');
}

/// Escapes text content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
