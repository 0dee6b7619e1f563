use drillboard_designer::viewport::Viewport;
use drillboard_designer::Point;

#[test]
fn test_identity_viewport() {
    let vp = Viewport::new(1000.0, 600.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(
        vp.to_scene(Point::new(10.0, 20.0), 1000.0, 600.0),
        Point::new(10.0, 20.0)
    );
}

#[test]
fn test_to_scene_clamps_to_canvas() {
    let vp = Viewport::new(1000.0, 600.0);
    assert_eq!(
        vp.to_scene(Point::new(-5.0, 700.0), 1000.0, 600.0),
        Point::new(0.0, 600.0)
    );
}

#[test]
fn test_zoom_and_pan_round_trip() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.0);
    vp.set_pan(30.0, -10.0);

    let screen = Point::new(130.0, 90.0);
    let scene = vp.to_scene_unclamped(screen);
    assert_eq!(scene, Point::new(50.0, 50.0));

    let back = vp.to_screen(scene);
    assert!((back.x - screen.x).abs() < 1e-10);
    assert!((back.y - screen.y).abs() < 1e-10);
}

#[test]
fn test_zoom_out_of_range_is_ignored() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(100.0);
    assert_eq!(vp.zoom(), 1.0);
    vp.set_zoom(0.01);
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_fit_centers_scene() {
    let mut vp = Viewport::new(0.0, 0.0);
    vp.fit(600.0, 300.0, 1000.0, 600.0);
    assert!((vp.zoom() - 0.5).abs() < 1e-10);
    assert!((vp.pan_x() - 50.0).abs() < 1e-10);
    assert!(vp.pan_y().abs() < 1e-10);

    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!((vp.pan_x(), vp.pan_y()), (0.0, 0.0));
}
