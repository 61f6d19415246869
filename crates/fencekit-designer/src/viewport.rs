//! Viewport and coordinate transformation for the layout canvas.
//!
//! Handles conversion between pointer coordinates (screen space) and model
//! coordinates. Zoom is applied about the canvas center, pan is applied in
//! model units:
//!
//! ```text
//! model  = (screen - center) / zoom + center - pan
//! screen = (model + pan - center) * zoom + center
//! ```

use std::fmt;

use fencekit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};

use crate::geometry::CanvasPoint;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport at 100% zoom with no pan.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Returns true if the screen position lies inside the canvas rect.
    pub fn contains_screen(&self, screen: CanvasPoint) -> bool {
        screen.x >= 0.0
            && screen.y >= 0.0
            && screen.x <= self.canvas_width
            && screen.y <= self.canvas_height
    }

    fn center(&self) -> CanvasPoint {
        CanvasPoint::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, snapped to the zoom step and clamped to the
    /// allowed range.
    ///
    /// Out-of-range requests are clamped, not rejected. Non-finite values
    /// are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            let snapped = (zoom / ZOOM_STEP).round() * ZOOM_STEP;
            self.zoom = snapped.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset in model units.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount in model units.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Resets zoom to 1.0 and pan to the origin.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Converts a screen (pointer) position to model coordinates.
    pub fn screen_to_model(&self, screen: CanvasPoint) -> CanvasPoint {
        let c = self.center();
        CanvasPoint::new(
            (screen.x - c.x) / self.zoom + c.x - self.pan_x,
            (screen.y - c.y) / self.zoom + c.y - self.pan_y,
        )
    }

    /// Converts model coordinates to a screen position.
    pub fn model_to_screen(&self, model: CanvasPoint) -> CanvasPoint {
        let c = self.center();
        CanvasPoint::new(
            (model.x + self.pan_x - c.x) * self.zoom + c.x,
            (model.y + self.pan_y - c.y) * self.zoom + c.y,
        )
    }

    /// Converts a screen-space movement into a model-space movement.
    pub fn screen_delta_to_model(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.zoom, dy / self.zoom)
    }

    /// Converts a screen-space radius (e.g. a hit radius) to model units.
    pub fn screen_len_to_model(&self, len: f64) -> f64 {
        len / self.zoom
    }

    /// The model-space rectangle currently visible, as `(min, max)`.
    pub fn visible_model_bounds(&self) -> (CanvasPoint, CanvasPoint) {
        let a = self.screen_to_model(CanvasPoint::new(0.0, 0.0));
        let b = self.screen_to_model(CanvasPoint::new(self.canvas_width, self.canvas_height));
        (
            CanvasPoint::new(a.x.min(b.x), a.y.min(b.y)),
            CanvasPoint::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
