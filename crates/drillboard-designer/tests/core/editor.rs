use drillboard_designer::{
    Editor, EditorEffect, EditorEvent, Gesture, Modifiers, Point, ShapeId, ShapeType, Tool,
};
use serde_json::json;

fn create(editor: &mut Editor, shape_type: ShapeType, x: f64, y: f64) -> ShapeId {
    editor.set_tool(Tool::Create(shape_type));
    editor.dispatch(EditorEvent::press(x, y));
    editor.dispatch(EditorEvent::release(x, y));
    editor.set_tool(Tool::Select);
    editor.selection().cloned().expect("new shape is selected")
}

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    editor.dispatch(EditorEvent::press(from.0, from.1));
    editor.dispatch(EditorEvent::move_to(to.0, to.1));
    editor.dispatch(EditorEvent::release(to.0, to.1));
}

fn anchor(editor: &Editor, id: &ShapeId) -> Point {
    editor.scene().get(id).unwrap().anchor()
}

fn assert_near(actual: Point, expected: Point) {
    assert!(
        actual.distance_to(&expected) < 1e-9,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_cone_drag_snaps_to_grid() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Cone, 100.0, 100.0);

    drag(&mut editor, (100.0, 100.0), (150.0, 120.0));

    assert_eq!(anchor(&editor, &id), Point::new(150.0, 125.0));
    assert_eq!(editor.history().undo_depth(), 2);
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_drag_there_and_back_without_snap() {
    let mut editor = Editor::default();
    editor.set_snap(false);
    let id = create(&mut editor, ShapeType::Player, 300.0, 300.0);

    drag(&mut editor, (300.0, 300.0), (337.0, 312.0));
    assert_eq!(anchor(&editor, &id), Point::new(337.0, 312.0));
    drag(&mut editor, (337.0, 312.0), (300.0, 300.0));
    assert_eq!(anchor(&editor, &id), Point::new(300.0, 300.0));
}

#[test]
fn test_drag_is_clamped_to_canvas() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Cone, 100.0, 100.0);
    drag(&mut editor, (100.0, 100.0), (-50.0, 700.0));
    assert_eq!(anchor(&editor, &id), Point::new(0.0, 600.0));
}

#[test]
fn test_arrow_drag_keeps_length_inside_canvas() {
    let mut editor = Editor::default();
    editor.load_value(&json!({
        "items": [{"type": "arrow", "id": "a", "x1": 900, "y1": 100, "x2": 980, "y2": 100}]
    }));

    drag(&mut editor, (940.0, 100.0), (1000.0, 100.0));

    let (start, end) = editor
        .scene()
        .get(&ShapeId::from("a"))
        .unwrap()
        .arrow_endpoints()
        .unwrap();
    assert_eq!(start, Point::new(920.0, 100.0));
    assert_eq!(end, Point::new(1000.0, 100.0));
}

#[test]
fn test_rotated_arrow_endpoint_drag_bakes_rotation() {
    let mut editor = Editor::default();
    editor.load_value(&json!({
        "items": [{"type": "arrow", "id": "a", "x1": 0, "y1": 0, "x2": 100, "y2": 0, "rot": 90}]
    }));
    let id = ShapeId::from("a");

    let (start, end) = editor.scene().get(&id).unwrap().arrow_endpoints().unwrap();
    assert_near(start, Point::new(50.0, -50.0));
    assert_near(end, Point::new(50.0, 50.0));

    assert!(editor.select(Some(id.clone())));
    editor.dispatch(EditorEvent::press(50.0, 50.0));
    assert!(matches!(editor.gesture(), Gesture::MovingEndpoint { .. }));
    editor.dispatch(EditorEvent::move_to(50.0, 75.0));
    editor.dispatch(EditorEvent::release(50.0, 75.0));

    let arrow = editor.scene().get(&id).unwrap();
    assert_eq!(arrow.rot, 0.0);
    let (start, end) = arrow.arrow_endpoints().unwrap();
    assert_near(start, Point::new(50.0, -50.0));
    assert_eq!(end, Point::new(50.0, 75.0));
    assert_eq!(editor.history().undo_depth(), 1);
}

#[test]
fn test_draw_arrow_by_dragging() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Create(ShapeType::Arrow));
    drag(&mut editor, (100.0, 100.0), (225.0, 150.0));

    let id = editor.selection().cloned().unwrap();
    let (start, end) = editor.scene().get(&id).unwrap().arrow_endpoints().unwrap();
    assert_eq!(start, Point::new(100.0, 100.0));
    assert_eq!(end, Point::new(225.0, 150.0));
    assert_eq!(editor.history().undo_depth(), 1);
}

#[test]
fn test_escape_cancels_arrow_creation() {
    let mut editor = Editor::default();
    editor.set_tool(Tool::Create(ShapeType::Arrow));
    editor.dispatch(EditorEvent::press(100.0, 100.0));
    editor.dispatch(EditorEvent::move_to(200.0, 100.0));
    editor.dispatch(EditorEvent::key("Escape", Modifiers::NONE));

    assert!(editor.scene().is_empty());
    assert_eq!(editor.selection(), None);
    assert!(!editor.history().can_undo());
    assert!(!editor.history().can_redo());
}

#[test]
fn test_resize_clamps_to_minimum() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Rect, 500.0, 300.0);

    // Bottom-right corner of the default 80x50 rectangle
    drag(&mut editor, (540.0, 325.0), (500.0, 300.0));
    assert_eq!(editor.scene().get(&id).unwrap().box_size(), Some((10.0, 10.0)));

    drag(&mut editor, (505.0, 305.0), (560.0, 340.0));
    assert_eq!(editor.scene().get(&id).unwrap().box_size(), Some((125.0, 75.0)));
    assert_eq!(anchor(&editor, &id), Point::new(500.0, 300.0));
}

#[test]
fn test_rotation_handle() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Rect, 500.0, 300.0);

    // Grip sits 24 above the top edge
    drag(&mut editor, (500.0, 251.0), (560.0, 300.0));

    let rect = editor.scene().get(&id).unwrap();
    assert!((rect.rot - 90.0).abs() < 1e-9);
    assert_eq!(rect.anchor(), Point::new(500.0, 300.0));
}

#[test]
fn test_rotation_keys_and_wheel() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Goal, 500.0, 300.0);
    let rot = |editor: &Editor| editor.scene().get(&id).unwrap().rot;

    editor.dispatch(EditorEvent::key("e", Modifiers::NONE));
    assert_eq!(rot(&editor), 5.0);
    editor.dispatch(EditorEvent::key("q", Modifiers::NONE));
    editor.dispatch(EditorEvent::key("q", Modifiers::NONE));
    assert_eq!(rot(&editor), 355.0);

    let effects = editor.dispatch(EditorEvent::Wheel {
        position: Point::new(500.0, 300.0),
        delta_y: 3.0,
        modifiers: Modifiers {
            alt: true,
            ..Modifiers::NONE
        },
    });
    assert_eq!(effects, vec![EditorEffect::Redraw]);
    assert_eq!(rot(&editor), 0.0);

    // Wheel without Alt does nothing
    editor.dispatch(EditorEvent::Wheel {
        position: Point::new(500.0, 300.0),
        delta_y: 3.0,
        modifiers: Modifiers::NONE,
    });
    assert_eq!(rot(&editor), 0.0);
    assert_eq!(editor.history().undo_depth(), 5);
}

#[test]
fn test_full_turns_leave_rotation_unchanged() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Hurdle, 400.0, 400.0);
    editor.rotate_selected(30.0);
    let depth = editor.history().undo_depth();

    for k in 1..=3 {
        editor.rotate_selected(360.0 * k as f64);
        let rot = editor.scene().get(&id).unwrap().rot;
        assert!((rot - 30.0).abs() < 1e-9, "rot {rot}");
    }
    assert!(editor.history().undo_depth() <= depth + 3);
}

#[test]
fn test_delete_selected() {
    let mut editor = Editor::default();
    let first = create(&mut editor, ShapeType::Cone, 100.0, 100.0);
    let second = create(&mut editor, ShapeType::Ball, 300.0, 300.0);

    let effects = editor.dispatch(EditorEvent::key("Delete", Modifiers::NONE));
    assert_eq!(
        effects,
        vec![EditorEffect::Redraw, EditorEffect::SelectionChanged(None)]
    );
    assert!(!editor.scene().contains_id(&second));
    assert!(editor.scene().contains_id(&first));
    assert_eq!(editor.selection(), None);

    // Nothing selected: no-op
    let depth = editor.history().undo_depth();
    assert!(editor.dispatch(EditorEvent::key("Backspace", Modifiers::NONE)).is_empty());
    assert_eq!(editor.history().undo_depth(), depth);

    assert!(editor.undo());
    assert!(editor.scene().contains_id(&second));
}

#[test]
fn test_click_on_empty_space_deselects() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Cone, 100.0, 100.0);
    assert_eq!(editor.selection(), Some(&id));

    let effects = editor.dispatch(EditorEvent::press(800.0, 500.0));
    assert_eq!(
        effects,
        vec![EditorEffect::Redraw, EditorEffect::SelectionChanged(None)]
    );
    editor.dispatch(EditorEvent::release(800.0, 500.0));
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn test_creation_tool_clears_selection() {
    let mut editor = Editor::default();
    create(&mut editor, ShapeType::Cone, 100.0, 100.0);
    assert!(editor.set_tool(Tool::Create(ShapeType::Player)));
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.tool(), Tool::Create(ShapeType::Player));
}

#[test]
fn test_double_click_edits_text() {
    let mut editor = Editor::default();
    let id = create(&mut editor, ShapeType::Text, 300.0, 300.0);

    let effects = editor.dispatch(EditorEvent::DoubleClick {
        position: Point::new(300.0, 300.0),
    });
    assert_eq!(
        effects,
        vec![EditorEffect::EditText {
            id: id.clone(),
            text: "Text".to_string()
        }]
    );

    assert!(editor.commit_text(&id, "Rondo 4v1"));
    assert_eq!(editor.scene().get(&id).unwrap().text(), Some("Rondo 4v1"));
    assert!(!editor.commit_text(&id, "   "));
    assert!(!editor.commit_text(&ShapeId::from("missing"), "x"));
}

#[test]
fn test_clear_scene_is_undoable() {
    let mut editor = Editor::default();
    create(&mut editor, ShapeType::Cone, 100.0, 100.0);
    create(&mut editor, ShapeType::Cone, 200.0, 100.0);

    assert!(editor.clear_scene());
    assert!(editor.scene().is_empty());
    assert!(!editor.clear_scene());

    assert!(editor.undo());
    assert_eq!(editor.scene().len(), 2);
}

#[test]
fn test_grid_size_floor() {
    let mut editor = Editor::default();
    editor.set_grid_size(0.2);
    assert_eq!(editor.settings().grid.size, 1.0);
    editor.set_grid_size(10.0);
    assert_eq!(editor.settings().grid.size, 10.0);
}
