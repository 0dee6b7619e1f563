use drillboard_designer::model::MAX_LADDER_STEPS;
use drillboard_designer::{Editor, PanelField, Point, ShapeId};
use serde_json::json;

fn editor_with(items: serde_json::Value, selected: &str) -> Editor {
    let mut editor = Editor::default();
    editor.load_value(&json!({ "items": items }));
    assert!(editor.select(Some(ShapeId::from(selected))));
    editor
}

#[test]
fn test_panel_reflects_selection() {
    let editor = editor_with(
        json!([{"type": "cone", "id": "c", "x": 100, "y": 120, "rot": 45, "color": "#F00"}]),
        "c",
    );
    let panel = editor.panel().unwrap();
    assert_eq!(panel.type_label, "Cone");
    assert_eq!((panel.x, panel.y), (100.0, 120.0));
    assert_eq!(panel.rotation, 45.0);
    assert_eq!(panel.size_field, Some("r"));
    assert_eq!(panel.size, Some(12.0));
    assert_eq!(panel.color, "#ff0000");
    assert_eq!(panel.text, None);

    assert!(Editor::default().panel().is_none());
}

#[test]
fn test_commit_position() {
    let mut editor = editor_with(json!([{"type": "cone", "id": "c", "x": 100, "y": 100}]), "c");

    assert!(editor.commit_field(PanelField::X, "250"));
    assert_eq!(editor.selected_shape().unwrap().anchor(), Point::new(250.0, 100.0));
    assert_eq!(editor.history().undo_depth(), 1);

    // Same value, lenient parse: nothing to record
    assert!(!editor.commit_field(PanelField::X, "250px"));
    assert_eq!(editor.history().undo_depth(), 1);

    assert!(editor.commit_field(PanelField::Y, "oops"));
    assert_eq!(editor.selected_shape().unwrap().anchor(), Point::new(250.0, 0.0));
}

#[test]
fn test_arrow_position_moves_whole_arrow() {
    let mut editor = editor_with(
        json!([{"type": "arrow", "id": "a", "x1": 10, "y1": 20, "x2": 110, "y2": 20}]),
        "a",
    );
    let panel = editor.panel().unwrap();
    assert_eq!((panel.x, panel.y), (10.0, 20.0));
    assert_eq!(panel.size, None);

    assert!(editor.commit_field(PanelField::X, "50"));
    let (start, end) = editor.selected_shape().unwrap().arrow_endpoints().unwrap();
    assert_eq!(start, Point::new(50.0, 20.0));
    assert_eq!(end, Point::new(150.0, 20.0));

    assert!(!editor.commit_field(PanelField::Size, "40"));
}

#[test]
fn test_size_respects_minimum() {
    let mut editor = editor_with(json!([{"type": "rect", "id": "r", "x": 100, "y": 100}]), "r");
    assert!(editor.commit_field(PanelField::Size, "3"));
    assert_eq!(editor.panel().unwrap().size, Some(10.0));

    assert!(editor.commit_field(PanelField::Size, "140"));
    assert_eq!(editor.selected_shape().unwrap().box_size(), Some((140.0, 50.0)));
}

#[test]
fn test_rotation_wraps() {
    let mut editor = editor_with(json!([{"type": "goal", "id": "g", "x": 500, "y": 50}]), "g");
    assert!(editor.commit_field(PanelField::Rotation, "-90"));
    assert_eq!(editor.panel().unwrap().rotation, 270.0);
    assert!(editor.commit_field(PanelField::Rotation, "720"));
    assert_eq!(editor.panel().unwrap().rotation, 0.0);
}

#[test]
fn test_color_text_and_steps() {
    let mut editor = editor_with(
        json!([
            {"type": "ladder", "id": "l", "x": 200, "y": 200},
            {"type": "text", "id": "t", "x": 400, "y": 200, "text": "Start"}
        ]),
        "l",
    );

    assert!(editor.commit_field(PanelField::Color, "#0a0"));
    assert_eq!(editor.selected_shape().unwrap().color.as_deref(), Some("#0a0"));
    assert_eq!(editor.panel().unwrap().color, "#00aa00");

    assert!(editor.commit_field(PanelField::Steps, "0"));
    assert_eq!(editor.panel().unwrap().steps, Some(1));
    assert!(!editor.commit_field(PanelField::Text, "ignored"));

    assert!(editor.select(Some(ShapeId::from("t"))));
    assert!(!editor.commit_field(PanelField::Steps, "6"));
    assert!(editor.commit_field(PanelField::Text, "Finish"));
    assert_eq!(editor.panel().unwrap().text.as_deref(), Some("Finish"));
    assert!(!editor.commit_field(PanelField::Text, ""));
}

#[test]
fn test_commit_without_selection() {
    let mut editor = Editor::default();
    assert!(!editor.commit_field(PanelField::X, "5"));
    assert!(!editor.history().can_undo());
}

#[test]
fn test_invalid_stored_color_shows_fallback() {
    let editor = editor_with(json!([{"type": "ball", "id": "b", "color": "blue"}]), "b");
    assert_eq!(editor.panel().unwrap().color, "#111827");
}

#[test]
fn test_steps_input_is_capped() {
    let mut editor = editor_with(json!([{"type": "ladder", "id": "l", "x": 500, "y": 300}]), "l");

    assert!(editor.commit_field(PanelField::Steps, "1e9"));
    assert_eq!(editor.panel().unwrap().steps, Some(MAX_LADDER_STEPS));
    assert!(!editor.commit_field(PanelField::Steps, "500"));
    assert_eq!(editor.history().undo_depth(), 1);
}
