//! Event dispatch for the fence tool.

use fencekit_core::constants::{
    DOUBLE_CLICK_MS, GATE_HIT_RADIUS, GATE_ROTATION_STEP, POINT_HIT_RADIUS,
};

use super::{FenceTool, Key, ToolEvent, ToolState};
use crate::geometry::CanvasPoint;

impl FenceTool {
    /// Re-derives the drawing mode from the store. Model operations made
    /// through `store_mut` can start or empty the active polyline.
    fn sync_with_store(&mut self) {
        if self.state.is_dragging() {
            return;
        }
        let resting = self.resting_state();
        if resting != self.state {
            tracing::debug!("Tool state {:?} resynced to {:?}", self.state, resting);
            self.state = resting;
            self.last_click_ms = None;
        }
    }

    /// Dispatches one input event.
    pub fn handle_event(&mut self, event: ToolEvent) {
        match event {
            ToolEvent::PointerDown { position, time_ms } => self.pointer_down(position, time_ms),
            ToolEvent::PointerMove { position } => self.pointer_move(position),
            ToolEvent::PointerUp { position } => self.pointer_up(position),
            ToolEvent::Click { position, time_ms } => self.click(position, time_ms),
            ToolEvent::DoubleClick { position } => self.double_click(position),
            ToolEvent::OutsidePointerDown => self.abort_gesture(),
            ToolEvent::Key(key) => self.key(key),
        }
    }

    fn gate_radius(&self) -> f64 {
        self.viewport.screen_len_to_model(GATE_HIT_RADIUS)
    }

    fn point_radius(&self) -> f64 {
        self.viewport.screen_len_to_model(POINT_HIT_RADIUS)
    }

    /// Arms a drag if the pointer lands on a gate, an active point, or a
    /// vertex of a finalized measurement (which starts re-editing it).
    /// A press outside the canvas rect aborts the current gesture.
    pub fn pointer_down(&mut self, screen: CanvasPoint, _time_ms: u64) {
        if self.state.is_dragging() {
            return;
        }
        if !self.viewport.contains_screen(screen) {
            self.abort_gesture();
            return;
        }
        self.sync_with_store();
        let model = self.viewport.screen_to_model(screen);
        self.pointer = Some(model);

        if let Some(id) = self.store.gate_at(model, self.gate_radius()) {
            self.state = ToolState::DraggingGate { id, moved: false };
            self.drag_last = Some(screen);
            return;
        }

        if let Some(id) = self.store.point_at(model, self.point_radius()) {
            self.state = ToolState::DraggingPoint { id, moved: false };
            self.drag_last = Some(screen);
            return;
        }

        if self.store.is_drawing() || self.gate_placement {
            return;
        }

        if let Some((measurement_id, point_id)) = self.store.endpoint_at(model, self.point_radius()) {
            if self.store.begin_edit(measurement_id).is_ok() {
                self.state = ToolState::DraggingPoint {
                    id: point_id,
                    moved: false,
                };
                self.drag_last = Some(screen);
                self.last_click_ms = None;
            }
        }
    }

    /// Tracks the pointer and moves the dragged entity.
    pub fn pointer_move(&mut self, screen: CanvasPoint) {
        self.pointer = Some(self.viewport.screen_to_model(screen));

        let Some(last) = self.drag_last else {
            return;
        };
        let (dx, dy) = self
            .viewport
            .screen_delta_to_model(screen.x - last.x, screen.y - last.y);

        match self.state {
            ToolState::DraggingPoint { id, .. } => {
                if self.store.drag_point(id, dx, dy).is_ok() {
                    self.state = ToolState::DraggingPoint { id, moved: true };
                }
            }
            ToolState::DraggingGate { id, .. } => {
                if self.store.move_gate(id, dx, dy).is_ok() {
                    self.state = ToolState::DraggingGate { id, moved: true };
                }
            }
            ToolState::Idle | ToolState::Drawing => {}
        }
        self.drag_last = Some(screen);
    }

    /// Ends a drag. A live-edited measurement is published here rather than
    /// on every move.
    pub fn pointer_up(&mut self, screen: CanvasPoint) {
        self.pointer = Some(self.viewport.screen_to_model(screen));

        match self.state {
            ToolState::DraggingPoint { moved, .. } => {
                if moved {
                    self.store.commit_live_edit();
                }
                // A press on a point never adds a point.
                self.swallow_click = true;
            }
            ToolState::DraggingGate { moved, .. } => {
                if moved {
                    self.store.commit_live_edit();
                }
                // An unmoved press on a gate falls through to the click,
                // which toggles selection.
                self.swallow_click = moved;
            }
            ToolState::Idle | ToolState::Drawing => return,
        }

        self.drag_last = None;
        self.state = self.resting_state();
    }

    pub(super) fn resting_state(&self) -> ToolState {
        if self.store.is_drawing() {
            ToolState::Drawing
        } else {
            ToolState::Idle
        }
    }

    /// Places gates, toggles gate selection, starts and extends polylines,
    /// and finalizes on a click that lands within the double-click window.
    pub fn click(&mut self, screen: CanvasPoint, time_ms: u64) {
        if self.swallow_click {
            self.swallow_click = false;
            return;
        }
        if self.state.is_dragging() {
            return;
        }
        self.sync_with_store();
        let model = self.viewport.screen_to_model(screen);
        self.pointer = Some(model);

        if let Some(id) = self.store.gate_at(model, self.gate_radius()) {
            let _ = self.store.toggle_gate_selection(id);
            return;
        }
        if self.store.point_at(model, self.point_radius()).is_some() {
            return;
        }

        if self.gate_placement {
            self.store.add_gate(model);
            self.gate_placement = false;
            return;
        }

        match self.state {
            ToolState::Idle => {
                self.store.start_draw(model);
                self.state = ToolState::Drawing;
                self.last_click_ms = Some(time_ms);
            }
            ToolState::Drawing => {
                let is_double = self
                    .last_click_ms
                    .is_some_and(|last| time_ms.saturating_sub(last) < DOUBLE_CLICK_MS);
                if is_double {
                    self.store.finalize();
                    self.state = ToolState::Idle;
                    self.last_click_ms = None;
                } else {
                    match self.store.append_point(model) {
                        Ok(_) => self.last_click_ms = Some(time_ms),
                        Err(e) => tracing::warn!("Click ignored: {}", e),
                    }
                }
            }
            ToolState::DraggingPoint { .. } | ToolState::DraggingGate { .. } => {}
        }
    }

    /// Finalizes a polyline of two or more points.
    pub fn double_click(&mut self, _screen: CanvasPoint) {
        self.sync_with_store();
        if self.state == ToolState::Drawing && self.store.active_points().len() >= 2 {
            self.store.finalize();
            self.state = ToolState::Idle;
        }
        self.last_click_ms = None;
    }

    /// Escape or a press outside the canvas: commit or drop the polyline,
    /// leave gate placement, clear selection.
    pub fn abort_gesture(&mut self) {
        if self.store.is_drawing() {
            self.store.commit_or_discard();
        }
        self.state = ToolState::Idle;
        self.gate_placement = false;
        self.store.deselect_gates();
        self.drag_last = None;
        self.last_click_ms = None;
        self.swallow_click = false;
    }

    pub fn key(&mut self, key: Key) {
        match key {
            Key::Escape => self.abort_gesture(),
            Key::Delete | Key::Backspace => {
                if let Some(id) = self.store.selected_gate().map(|g| g.id) {
                    let _ = self.store.delete_gate(id);
                }
            }
            Key::Char('r') | Key::Char('R') => {
                if let Some(id) = self.store.selected_gate().map(|g| g.id) {
                    let _ = self.store.rotate_gate(id, GATE_ROTATION_STEP);
                }
            }
            Key::Char(_) => {}
        }
    }
}
