use drillboard_designer::{
    export_document, export_scene, load_document, render_interactive, Editor, ExportOptions,
    SceneDocument, ShapeId,
};
use serde_json::json;

fn sample() -> serde_json::Value {
    json!({
        "width": 800,
        "height": 400,
        "items": [
            {"type": "cone", "id": "c1", "x": 100, "y": 100},
            {"type": "arrow", "id": "a1", "x1": 100, "y1": 100, "x2": 300, "y2": 200},
            {"type": "text", "id": "t1", "x": 400, "y": 50, "text": "1 < 2 & go"}
        ]
    })
}

#[test]
fn test_static_export() {
    let scene = load_document(&sample());
    let svg = export_scene(&scene, &ExportOptions::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("viewBox=\"0 0 800 400\""));
    assert!(svg.contains("#16a34a"));
    assert!(svg.contains("marker-end=\"url(#arrowHead-111827)\""));
    assert!(svg.contains("1 &lt; 2 &amp; go"));
    assert!(!svg.contains("data-id"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_export_options() {
    let scene = load_document(&sample());
    let options = ExportOptions {
        background: false,
        show_grid: true,
        grid_size: 25.0,
    };
    let svg = export_scene(&scene, &options);
    assert!(!svg.contains("#16a34a"));
    assert!(svg.contains("url(#grid)"));
}

#[test]
fn test_export_document_skips_unknown_types() {
    let document = SceneDocument::from_value(&json!({
        "items": [{"type": "hologram", "x": 5, "y": 5}, {"type": "ball", "x": 50, "y": 50}]
    }));
    let svg = export_document(&document, &ExportOptions::default());
    assert_eq!(svg.matches("<g").count(), 1);
    assert!(svg.contains("viewBox=\"0 0 1000 600\""));
}

#[test]
fn test_interactive_surface_tags_selection() {
    let mut editor = Editor::default();
    editor.load_value(&sample());
    assert!(editor.select(Some(ShapeId::from("c1"))));

    let svg = render_interactive(&editor);
    assert!(svg.contains("data-id=\"c1\""));
    assert!(svg.contains("data-id=\"a1\""));
    assert!(svg.contains("class=\"selected\""));
    assert!(svg.contains("class=\"selection-overlay\""));
    assert!(svg.contains("url(#grid)"));
}

#[test]
fn test_arrow_heads_follow_line_color() {
    let scene = load_document(&json!({
        "items": [
            {"type": "arrow", "id": "a1", "x1": 0, "y1": 0, "x2": 100, "y2": 0, "color": "#dc2626"},
            {"type": "arrow", "id": "a2", "x1": 0, "y1": 50, "x2": 100, "y2": 50, "color": "#dc2626"},
            {"type": "arrow", "id": "a3", "x1": 0, "y1": 90, "x2": 100, "y2": 90}
        ]
    }));
    let svg = export_scene(&scene, &ExportOptions::default());

    assert_eq!(svg.matches("<marker ").count(), 2);
    assert!(svg.contains("marker-end=\"url(#arrowHead-111827)\""));
    assert!(svg.contains("fill=\"#111827\"/></marker>"));
    let red = svg
        .lines()
        .find(|line| line.starts_with("<line") && line.contains("url(#arrowHead-dc2626)"));
    assert!(red.is_some(), "{}", svg);
}

#[test]
fn test_ladder_rungs_are_bounded() {
    let document = SceneDocument::from_value(&json!({
        "items": [{"type": "ladder", "id": "l1", "x": 500, "y": 300, "steps": 2000000}]
    }));
    let svg = export_document(&document, &ExportOptions::default());
    assert_eq!(svg.matches(" L ").count(), 63);
}
