//! Interactive fence layout tool.
//!
//! `FenceTool` owns the measurement store and the viewport, and turns
//! pointer and keyboard events into model operations. All positions in
//! events are screen coordinates; they pass through the viewport before
//! any hit-test or mutation.

mod operations;
mod types;

pub use types::{Key, ToolEvent, ToolState};

use fencekit_core::FenceConfig;

use crate::geometry::CanvasPoint;
use crate::host_bridge::SubscriptionId;
use crate::model::Measurement;
use crate::renderer::{render_scene, RenderInput, Scene};
use crate::store::MeasurementStore;
use crate::viewport::Viewport;

/// Interaction state machine for drawing fence runs and placing gates.
#[derive(Debug)]
pub struct FenceTool {
    store: MeasurementStore,
    viewport: Viewport,
    state: ToolState,
    gate_placement: bool,
    /// Time of the last click that drew a point, for double-click detection
    last_click_ms: Option<u64>,
    /// Last pointer position in model space
    pointer: Option<CanvasPoint>,
    /// Last pointer position in screen space while dragging
    drag_last: Option<CanvasPoint>,
    /// Set on pointer-up after a drag so the trailing click is ignored
    swallow_click: bool,
    show_grid: bool,
}

impl Default for FenceTool {
    fn default() -> Self {
        Self::new(FenceConfig::default())
    }
}

impl FenceTool {
    pub fn new(config: FenceConfig) -> Self {
        Self::with_viewport(config, Viewport::default())
    }

    pub fn with_viewport(config: FenceConfig, viewport: Viewport) -> Self {
        Self {
            store: MeasurementStore::new(config),
            viewport,
            state: ToolState::Idle,
            gate_placement: false,
            last_click_ms: None,
            pointer: None,
            drag_last: None,
            swallow_click: false,
            show_grid: true,
        }
    }

    /// Current interaction state. Outside a drag the drawing mode follows
    /// the store, so changes made through `store_mut` are reflected here.
    pub fn state(&self) -> ToolState {
        if self.state.is_dragging() {
            self.state
        } else {
            self.resting_state()
        }
    }

    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    /// Direct access to model operations (delete, rename, gate edits).
    pub fn store_mut(&mut self) -> &mut MeasurementStore {
        &mut self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &FenceConfig {
        self.store.config()
    }

    pub fn update_config<F: FnOnce(&mut FenceConfig)>(&mut self, update: F) {
        self.store.update_config(update);
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Measurement]) + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn is_gate_placement(&self) -> bool {
        self.gate_placement
    }

    /// Arms or disarms gate placement.
    pub fn toggle_gate_placement(&mut self) -> bool {
        self.gate_placement = !self.gate_placement;
        tracing::debug!("Gate placement {}", if self.gate_placement { "on" } else { "off" });
        self.gate_placement
    }

    /// Last pointer position in model space.
    pub fn pointer(&self) -> Option<CanvasPoint> {
        self.pointer
    }

    // Viewport controls

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Empties points, gates and measurements and returns to idle.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.state = ToolState::Idle;
        self.gate_placement = false;
        self.last_click_ms = None;
        self.swallow_click = false;
    }

    /// Builds the renderer input for the current frame.
    pub fn render_input(&self) -> RenderInput<'_> {
        RenderInput {
            active_points: self.store.active_points(),
            measurements: self.store.measurements(),
            editing_preview: self.store.editing_preview(),
            gates: self.store.gates(),
            pointer: self.pointer,
            drawing: self.store.is_drawing() && !self.state.is_dragging(),
            show_grid: self.show_grid,
            viewport: &self.viewport,
            config: self.store.config(),
        }
    }

    /// Renders the current frame to a display list.
    pub fn scene(&self) -> Scene {
        render_scene(&self.render_input())
    }
}
