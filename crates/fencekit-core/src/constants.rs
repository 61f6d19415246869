//! Layout and interaction constants.

/// Length of one fence panel in feet.
pub const PANEL_LENGTH_FT: f64 = 8.0;

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom increment for zoom in / zoom out.
pub const ZOOM_STEP: f64 = 0.25;

/// Two clicks closer together than this are treated as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 400;

/// Hit radius around a point, in screen pixels.
pub const POINT_HIT_RADIUS: f64 = 10.0;

/// Hit radius around a gate center, in screen pixels.
pub const GATE_HIT_RADIUS: f64 = 15.0;

/// Grid cell size in feet.
pub const GRID_CELL_FT: f64 = 5.0;

/// Default logical canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default logical canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Rotation applied by the rotate key, in degrees.
pub const GATE_ROTATION_STEP: f64 = 45.0;
