use drillboard_core::{BridgeError, Catalog, CatalogEntry, CatalogKind};
use drillboard_designer::{
    load_document, CatalogFileStore, DiagramStore, Editor, EditorEvent, Point, SceneDocument,
    ShapeId, ShapeType, Tool,
};
use serde_json::json;
use tempfile::TempDir;

struct FailingStore;

impl DiagramStore for FailingStore {
    type Error = std::io::Error;

    fn store(&mut self, _entry: &CatalogEntry) -> Result<(), Self::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
    }
}

#[derive(Default)]
struct MemoryStore {
    saved: Vec<CatalogEntry>,
}

impl DiagramStore for MemoryStore {
    type Error = String;

    fn store(&mut self, entry: &CatalogEntry) -> Result<(), Self::Error> {
        self.saved.push(entry.clone());
        Ok(())
    }
}

fn entry_with_diagram(id: &str) -> CatalogEntry {
    let mut entry = CatalogEntry::new(id);
    entry.name = "Rondo".to_string();
    entry.diagram = Some(json!({
        "width": 800,
        "height": 400,
        "name": "old name",
        "description": "from the diagram",
        "items": [{"type": "cone", "id": "c1", "x": 100, "y": 100}]
    }));
    entry
}

#[test]
fn test_missing_canvas_size_uses_defaults() {
    let scene = load_document(&json!({ "items": [] }));
    assert_eq!((scene.width, scene.height), (1000.0, 600.0));
    assert!(scene.name.is_empty());
    assert!(scene.is_empty());
}

#[test]
fn test_malformed_document_degrades() {
    let scene = load_document(&json!({
        "width": "abc",
        "height": -3,
        "name": 5,
        "items": [
            1,
            "cone",
            {"type": "hologram", "x": 1, "y": 1},
            {"type": "cone", "id": "c0", "x": "oops", "r": {"big": true}},
            {"type": "plot", "id": "c1", "x": 100, "y": 100, "r": "12"},
            {"type": "player", "id": "p1", "x": 200, "y": 200, "rot": "45"}
        ]
    }));
    assert_eq!((scene.width, scene.height), (1000.0, 600.0));
    assert_eq!(scene.name, "");
    assert_eq!(scene.len(), 3);

    let broken = scene.get(&ShapeId::from("c0")).unwrap();
    assert_eq!(broken.shape_type(), ShapeType::Cone);
    assert_eq!(broken.anchor(), Point::new(0.0, 0.0));
    assert_eq!(broken.primary_size(), Some(12.0));

    let cone = scene.get(&ShapeId::from("c1")).unwrap();
    assert_eq!(cone.anchor(), Point::new(100.0, 100.0));
    assert_eq!(cone.primary_size(), Some(12.0));

    let player = scene.get(&ShapeId::from("p1")).unwrap();
    assert_eq!(player.rot, 45.0);

    assert!(load_document(&json!(null)).is_empty());
    assert!(load_document(&json!({"items": {"type": "cone"}})).is_empty());
}

#[test]
fn test_document_keeps_unknown_fields() {
    let mut editor = Editor::default();
    editor.load_value(&json!({
        "items": [{"type": "joueur", "id": "p1", "x": 1, "y": 2, "team": "red"}]
    }));
    let saved = serde_json::to_value(editor.save()).unwrap();
    assert_eq!(saved["items"][0]["team"], "red");
    assert_eq!(saved["items"][0]["type"], "player");
    assert_eq!(saved["width"], 1000.0);
}

#[test]
fn test_unknown_items_stay_in_document() {
    let document = SceneDocument::from_value(&json!({
        "items": [{"type": "hologram"}, {"type": "ball", "id": "b"}]
    }));
    assert_eq!(document.items.len(), 2);
    assert_eq!(document.into_scene().len(), 1);
}

#[test]
fn test_load_entry_prefers_entry_metadata() {
    let mut editor = Editor::default();
    editor.dispatch(EditorEvent::press(10.0, 10.0));
    editor.load_entry(&entry_with_diagram("J1"));

    let scene = editor.scene();
    assert_eq!(scene.name, "Rondo");
    assert_eq!(scene.description, "from the diagram");
    assert_eq!((scene.width, scene.height), (800.0, 400.0));
    assert_eq!(scene.len(), 1);
    assert!(!editor.history().can_undo());
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.edit_target().map(|e| e.id.as_str()), Some("J1"));
}

#[test]
fn test_entry_without_diagram_opens_empty() {
    let mut editor = Editor::default();
    editor.load_entry(&CatalogEntry::new("E7"));
    assert!(editor.scene().is_empty());
    assert_eq!(editor.scene().width, 1000.0);
}

#[test]
fn test_save_without_target_is_rejected() {
    let editor = Editor::default();
    let mut entry = CatalogEntry::new("J1");
    assert!(matches!(
        editor.save_into(&mut entry),
        Err(BridgeError::NoEditTarget)
    ));
    assert!(entry.diagram.is_none());

    let mut editor = Editor::default();
    assert!(matches!(
        editor.save_to(&mut MemoryStore::default()),
        Err(BridgeError::NoEditTarget)
    ));
}

#[test]
fn test_save_into_other_entry_is_rejected() {
    let mut editor = Editor::default();
    editor.load_entry(&entry_with_diagram("J1"));
    let mut other = CatalogEntry::new("J2");
    match editor.save_into(&mut other) {
        Err(BridgeError::TargetMismatch { expected, actual }) => {
            assert_eq!(expected, "J1");
            assert_eq!(actual, "J2");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_save_mirrors_metadata() {
    let mut editor = Editor::default();
    let mut entry = entry_with_diagram("J1");
    editor.load_entry(&entry);
    editor.set_name("Rondo 5v2");

    editor.save_into(&mut entry).unwrap();
    assert_eq!(entry.name, "Rondo 5v2");
    let diagram = entry.diagram.as_ref().unwrap();
    assert_eq!(diagram["name"], "Rondo 5v2");
    assert_eq!(diagram["width"], 800.0);
    assert_eq!(diagram["items"].as_array().unwrap().len(), 1);
}

#[test]
fn test_save_can_clear_metadata() {
    let mut editor = Editor::default();
    let mut entry = entry_with_diagram("J1");
    entry.description = "Two touches".to_string();
    editor.load_entry(&entry);
    editor.set_name("");
    editor.set_description("");

    editor.save_into(&mut entry).unwrap();
    assert_eq!(entry.name, "");
    assert_eq!(entry.description, "");
    assert_eq!(entry.diagram.as_ref().unwrap()["name"], "");
}

#[test]
fn test_store_failure_is_surfaced() {
    let mut editor = Editor::default();
    editor.load_entry(&entry_with_diagram("J1"));
    let err = editor.save_to(&mut FailingStore).unwrap_err();
    assert!(matches!(err, BridgeError::Store { .. }));
    assert_eq!(err.to_string(), "Save failed: disk full");
}

#[test]
fn test_save_to_updates_edit_target() {
    let mut editor = Editor::default();
    editor.load_entry(&entry_with_diagram("J1"));
    editor.set_tool(Tool::Create(ShapeType::Ball));
    editor.dispatch(EditorEvent::press(300.0, 200.0));

    let mut store = MemoryStore::default();
    let saved = editor.save_to(&mut store).unwrap();
    assert_eq!(store.saved.len(), 1);
    assert_eq!(saved.diagram.as_ref().unwrap()["items"].as_array().unwrap().len(), 2);
    assert_eq!(editor.edit_target(), Some(&saved));
}

#[test]
fn test_catalog_file_store_moves_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");

    let mut catalog = Catalog::new();
    catalog.upsert(CatalogKind::Games, entry_with_diagram("J1"));
    catalog.save_to_file(&path).unwrap();

    let mut editor = Editor::default();
    let entry = Catalog::load_from_file(&path)
        .unwrap()
        .find(CatalogKind::Games, "J1")
        .cloned()
        .unwrap();
    editor.load_entry(&entry);
    editor.set_tool(Tool::Create(ShapeType::Disc));
    editor.dispatch(EditorEvent::press(500.0, 200.0));

    let mut store = CatalogFileStore::new(&path, CatalogKind::Drills);
    editor.save_to(&mut store).unwrap();

    let reloaded = Catalog::load_from_file(&path).unwrap();
    assert!(reloaded.games.is_empty());
    let stored = reloaded.find(CatalogKind::Drills, "J1").unwrap();
    assert_eq!(stored.name, "Rondo");
    let items = stored.diagram.as_ref().unwrap()["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["type"], "disc");
}
