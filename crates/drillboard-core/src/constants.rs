//! Shared constants for the diagram editor.

/// Canvas width used when a stored scene does not specify one.
pub const DEFAULT_SCENE_WIDTH: f64 = 1000.0;

/// Canvas height used when a stored scene does not specify one.
pub const DEFAULT_SCENE_HEIGHT: f64 = 600.0;

/// Default snapping grid, in scene units.
pub const DEFAULT_GRID_SIZE: f64 = 25.0;

/// Number of snapshots kept on the undo stack.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Rotation applied per Q/E key press or wheel notch, in degrees.
pub const DEFAULT_ROTATION_STEP: f64 = 5.0;

/// Half-width of the clickable corridor along an arrow.
pub const ARROW_HIT_HALF_WIDTH: f64 = 6.0;

/// Radius of the invisible grab circle at each arrow endpoint.
pub const ARROW_ENDPOINT_HIT_RADIUS: f64 = 10.0;

/// Distance within which a press on a selected arrow grabs an endpoint.
pub const ARROW_ENDPOINT_GRAB_RADIUS: f64 = 14.0;

/// Radius of resize and rotation handles.
pub const HANDLE_RADIUS: f64 = 8.0;

/// Distance between the top of the selection box and the rotation grip.
pub const ROTATION_GRIP_OFFSET: f64 = 24.0;

/// Extra margin around a shape's box accepted as a hit.
pub const HIT_TOLERANCE: f64 = 2.0;

/// Length given to an arrow created by a click without drag.
pub const DEFAULT_ARROW_LENGTH: f64 = 100.0;

/// Minimum width/height for rectangular shapes.
pub const MIN_EXTENT: f64 = 10.0;

/// Minimum radius for round shapes and cross arms.
pub const MIN_RADIUS: f64 = 4.0;

/// Minimum font size for text shapes.
pub const MIN_TEXT_SIZE: f64 = 6.0;
