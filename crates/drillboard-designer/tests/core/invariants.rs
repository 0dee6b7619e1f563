use drillboard_designer::geometry::{snap, wrap_degrees};
use drillboard_designer::viewport::Viewport;
use drillboard_designer::{
    Editor, EditorEvent, Modifiers, PanelField, Point, Scene, Shape, ShapeId, ShapeType, Tool,
};
use proptest::prelude::*;

fn shape_type() -> impl Strategy<Value = ShapeType> {
    (0..ShapeType::ALL.len()).prop_map(|i| ShapeType::ALL[i])
}

#[derive(Debug, Clone)]
enum Edit {
    Create(ShapeType, Point),
    Drag(Point, Point),
    CancelledDrag(Point, Point),
    RotateKey(bool),
    Delete,
    PanelX(f64),
    PanelSize(f64),
}

/// Points on a coarse lattice so presses land on existing shapes, their
/// handles or arrow endpoints reasonably often.
fn lattice_point() -> impl Strategy<Value = Point> {
    (1..10i32, 1..6i32, -2..3i32, -2..3i32).prop_map(|(i, j, di, dj)| {
        Point::new(
            f64::from(i * 100 + di * 12),
            f64::from(j * 100 + dj * 12),
        )
    })
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (shape_type(), lattice_point()).prop_map(|(t, p)| Edit::Create(t, p)),
        (lattice_point(), lattice_point()).prop_map(|(a, b)| Edit::Drag(a, b)),
        (lattice_point(), lattice_point()).prop_map(|(a, b)| Edit::CancelledDrag(a, b)),
        any::<bool>().prop_map(Edit::RotateKey),
        Just(Edit::Delete),
        (0.0f64..1000.0).prop_map(Edit::PanelX),
        (-50.0f64..200.0).prop_map(Edit::PanelSize),
    ]
}

fn apply(editor: &mut Editor, edit: &Edit) {
    match edit {
        Edit::Create(shape_type, p) => {
            editor.set_tool(Tool::Create(*shape_type));
            editor.dispatch(EditorEvent::press(p.x, p.y));
            editor.dispatch(EditorEvent::move_to(p.x + 40.0, p.y));
            editor.dispatch(EditorEvent::release(p.x + 40.0, p.y));
            editor.set_tool(Tool::Select);
        }
        Edit::Drag(from, to) => {
            editor.dispatch(EditorEvent::press(from.x, from.y));
            editor.dispatch(EditorEvent::move_to(to.x, to.y));
            editor.dispatch(EditorEvent::release(to.x, to.y));
        }
        Edit::CancelledDrag(from, to) => {
            editor.dispatch(EditorEvent::press(from.x, from.y));
            editor.dispatch(EditorEvent::move_to(to.x, to.y));
            editor.dispatch(EditorEvent::key("Escape", Modifiers::NONE));
        }
        Edit::RotateKey(clockwise) => {
            let key = if *clockwise { "e" } else { "q" };
            editor.dispatch(EditorEvent::key(key, Modifiers::NONE));
        }
        Edit::Delete => {
            editor.dispatch(EditorEvent::key("Delete", Modifiers::NONE));
        }
        Edit::PanelX(x) => {
            editor.commit_field(PanelField::X, &x.to_string());
        }
        Edit::PanelSize(size) => {
            editor.commit_field(PanelField::Size, &size.to_string());
        }
    }
}

/// Distance between two angles on the circle.
fn angular_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

proptest! {
    #[test]
    fn snap_is_idempotent(value in -10_000.0f64..10_000.0, grid in 1.0f64..100.0) {
        let once = snap(value, grid, true);
        prop_assert_eq!(snap(once, grid, true), once);
        prop_assert_eq!(snap(value, grid, false), value);
    }

    #[test]
    fn viewport_round_trips(
        zoom in 0.2f64..40.0,
        pan_x in -500.0f64..500.0,
        pan_y in -500.0f64..500.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
    ) {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(zoom);
        vp.set_pan(pan_x, pan_y);
        let p = Point::new(x, y);
        let back = vp.to_screen(vp.to_scene_unclamped(p));
        prop_assert!(back.distance_to(&p) < 1e-6);
    }

    #[test]
    fn wrapped_rotation_is_in_range(degrees in -1e6f64..1e6) {
        let wrapped = wrap_degrees(degrees);
        prop_assert!((0.0..360.0).contains(&wrapped));
    }

    #[test]
    fn full_turns_keep_rotation(start in 0.0f64..360.0, turns in -5i32..5) {
        let mut editor = Editor::default();
        editor.load_value(&serde_json::json!({
            "items": [{"type": "goal", "id": "g", "x": 500, "y": 300, "rot": start}]
        }));
        let id = ShapeId::from("g");
        prop_assert!(editor.select(Some(id.clone())));
        let before = editor.scene().get(&id).unwrap().rot;

        editor.rotate_selected(360.0 * f64::from(turns));
        let after = editor.scene().get(&id).unwrap().rot;
        prop_assert!(angular_gap(before, after) < 1e-6);
    }

    #[test]
    fn undo_redo_round_trips(
        steps in prop::collection::vec((shape_type(), 0.0f64..1000.0, 0.0f64..600.0), 1..8)
    ) {
        let mut editor = Editor::default();
        let initial = editor.scene().clone();
        let mut created = 0;
        for (shape_type, x, y) in steps {
            editor.set_tool(Tool::Create(shape_type));
            let before = editor.scene().len();
            editor.dispatch(EditorEvent::press(x, y));
            editor.dispatch(EditorEvent::release(x, y));
            if editor.scene().len() > before {
                created += 1;
            }
        }
        let last = editor.scene().clone();

        for _ in 0..created {
            prop_assert!(editor.undo());
        }
        prop_assert_eq!(editor.scene(), &initial);
        prop_assert!(!editor.undo());

        for _ in 0..created {
            prop_assert!(editor.redo());
        }
        prop_assert_eq!(editor.scene(), &last);
    }

    #[test]
    fn mixed_edits_undo_through_every_state(
        edits in prop::collection::vec(edit(), 1..24)
    ) {
        let mut editor = Editor::default();
        let mut states: Vec<Scene> = vec![editor.scene().clone()];

        for edit in &edits {
            let depth = editor.history().undo_depth();
            apply(&mut editor, edit);
            prop_assert!(editor.gesture().is_idle());

            let changed = editor.scene() != states.last().unwrap();
            if changed {
                prop_assert_eq!(editor.history().undo_depth(), depth + 1, "{:?}", edit);
                states.push(editor.scene().clone());
            } else {
                prop_assert_eq!(editor.history().undo_depth(), depth, "{:?}", edit);
            }
        }

        for expected in states.iter().rev().skip(1) {
            prop_assert!(editor.undo());
            prop_assert_eq!(editor.scene(), expected);
        }
        prop_assert!(!editor.undo());

        for expected in states.iter().skip(1) {
            prop_assert!(editor.redo());
            prop_assert_eq!(editor.scene(), expected);
        }
        prop_assert!(!editor.redo());
    }

    #[test]
    fn resize_never_goes_below_minimum(
        shape_type in shape_type(),
        lx in -300.0f64..300.0,
        ly in -300.0f64..300.0,
        snap_enabled in any::<bool>(),
    ) {
        let mut shape = Shape::create(shape_type, ShapeId::from("s"), Point::new(500.0, 300.0));
        shape.resize_to(Point::new(lx, ly), 25.0, snap_enabled);
        if let (Some(size), Some(min)) = (shape.primary_size(), shape.min_primary_size()) {
            prop_assert!(size >= min);
        }
    }
}
