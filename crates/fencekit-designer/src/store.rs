//! Measurement store: owns the active polyline, the shared gate list and the
//! finalized measurements, and applies the model operations.
//!
//! Every mutation recomputes derived sections and materials before the host
//! bridge is notified, so a subscriber always sees consistent data.

use fencekit_core::{FenceConfig, FenceError, Result};

use crate::geometry::CanvasPoint;
use crate::host_bridge::{HostBridge, SubscriptionId};
use crate::model::{Gate, Measurement, Point};

/// An existing measurement pulled back into the active polyline.
#[derive(Debug, Clone)]
struct EditSession {
    original: Measurement,
    index: usize,
    preview: Measurement,
    published: bool,
}

/// Model state of the fence layout tool.
#[derive(Debug)]
pub struct MeasurementStore {
    config: FenceConfig,
    active: Vec<Point>,
    gates: Vec<Gate>,
    measurements: Vec<Measurement>,
    editing: Option<EditSession>,
    next_id: u64,
    next_label: u64,
    bridge: HostBridge,
}

impl Default for MeasurementStore {
    fn default() -> Self {
        Self::new(FenceConfig::default())
    }
}

impl MeasurementStore {
    pub fn new(config: FenceConfig) -> Self {
        Self {
            config,
            active: Vec::new(),
            gates: Vec::new(),
            measurements: Vec::new(),
            editing: None,
            next_id: 1,
            next_label: 0,
            bridge: HostBridge::new(),
        }
    }

    pub fn config(&self) -> &FenceConfig {
        &self.config
    }

    /// Applies a configuration change and refreshes the live edit preview.
    ///
    /// Finalized measurements keep the values they were finalized with.
    pub fn update_config<F: FnOnce(&mut FenceConfig)>(&mut self, update: F) {
        update(&mut self.config);
        self.refresh_preview();
    }

    fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---------------------------------------------------------------------
    // Host bridge
    // ---------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Measurement]) + 'static,
    {
        self.bridge.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bridge.unsubscribe(id)
    }

    pub fn bridge(&self) -> &HostBridge {
        &self.bridge
    }

    /// The list the host sees: finalized measurements plus the live edit
    /// preview in the slot of the measurement being edited.
    pub fn host_measurements(&self) -> Vec<Measurement> {
        let mut list = self.measurements.clone();
        if let Some(session) = &self.editing {
            let index = session.index.min(list.len());
            list.insert(index, session.preview.clone());
        }
        list
    }

    fn publish(&mut self) {
        let list = self.host_measurements();
        self.bridge.publish(&list);
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Vertices of the polyline being drawn or edited.
    pub fn active_points(&self) -> &[Point] {
        &self.active
    }

    pub fn is_drawing(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate(&self, id: u64) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    pub fn selected_gate(&self) -> Option<&Gate> {
        self.gates.iter().find(|g| g.selected)
    }

    /// Finalized measurements, excluding one that is being edited.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn measurement(&self, id: u64) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.id == id)
    }

    /// Id of the measurement being re-edited, if any.
    pub fn editing_id(&self) -> Option<u64> {
        self.editing.as_ref().map(|s| s.original.id)
    }

    /// Live recomputation of the measurement being re-edited.
    pub fn editing_preview(&self) -> Option<&Measurement> {
        self.editing.as_ref().map(|s| &s.preview)
    }

    // ---------------------------------------------------------------------
    // Polyline operations
    // ---------------------------------------------------------------------

    /// Starts a new polyline with a single point. Any unfinished polyline is
    /// discarded first.
    pub fn start_draw(&mut self, at: CanvasPoint) -> u64 {
        if self.is_drawing() {
            self.discard_active();
        }
        let id = self.generate_id();
        self.active.push(Point::new(id, at.x, at.y));
        tracing::debug!("Started fence at ({:.1}, {:.1})", at.x, at.y);
        id
    }

    /// Appends a point to the active polyline.
    pub fn append_point(&mut self, at: CanvasPoint) -> Result<u64> {
        if !self.is_drawing() {
            return Err(FenceError::NotDrawing);
        }
        let id = self.generate_id();
        self.active.push(Point::new(id, at.x, at.y));
        self.refresh_preview();
        Ok(id)
    }

    /// Turns the active polyline into a measurement and publishes the list.
    ///
    /// Overwrites the measurement being edited, if any, keeping its id and
    /// label. Returns `None` if nothing is being drawn.
    pub fn finalize(&mut self) -> Option<u64> {
        if self.active.is_empty() {
            return None;
        }
        let points = std::mem::take(&mut self.active);

        let measurement = match self.editing.take() {
            Some(session) => {
                let m = Measurement::build(
                    session.original.id,
                    session.original.label,
                    &points,
                    &self.gates,
                    &self.config,
                );
                let index = session.index.min(self.measurements.len());
                self.measurements.insert(index, m.clone());
                m
            }
            None => {
                let id = self.generate_id();
                self.next_label += 1;
                let label = format!("Fence {}", self.next_label);
                let m = Measurement::build(id, label, &points, &self.gates, &self.config);
                self.measurements.push(m.clone());
                m
            }
        };

        tracing::info!(
            "Finalized {} (id {}): {} section(s), {:.1} ft",
            measurement.label,
            measurement.id,
            measurement.section_count(),
            measurement.total_length
        );
        self.publish();
        Some(measurement.id)
    }

    /// Finalizes a polyline of two or more points, otherwise discards it.
    pub fn commit_or_discard(&mut self) -> Option<u64> {
        if self.active.len() >= 2 {
            self.finalize()
        } else {
            self.discard_active();
            None
        }
    }

    /// Drops the active polyline. An interrupted edit restores the
    /// measurement as it was before editing began.
    pub fn discard_active(&mut self) {
        self.active.clear();
        if let Some(session) = self.editing.take() {
            tracing::debug!("Edit of measurement {} cancelled", session.original.id);
            let index = session.index.min(self.measurements.len());
            self.measurements.insert(index, session.original);
            if session.published {
                self.publish();
            }
        }
    }

    /// Pulls a finalized measurement back into the active polyline.
    ///
    /// Any polyline in progress is committed (or discarded if it has fewer
    /// than two points) first.
    pub fn begin_edit(&mut self, id: u64) -> Result<()> {
        let target = self
            .measurement(id)
            .ok_or(FenceError::UnknownMeasurement(id))?;
        if target.sections.is_empty() {
            return Err(FenceError::EmptyMeasurement(id));
        }

        if self.is_drawing() {
            self.commit_or_discard();
        }

        let index = self
            .measurements
            .iter()
            .position(|m| m.id == id)
            .ok_or(FenceError::UnknownMeasurement(id))?;
        let original = self.measurements.remove(index);
        self.active = original.points();
        tracing::info!("Editing {} (id {})", original.label, original.id);
        self.editing = Some(EditSession {
            preview: original.clone(),
            original,
            index,
            published: false,
        });
        Ok(())
    }

    /// Moves an active point by a model-space delta and recomputes the live
    /// preview. Does not notify the host.
    pub fn drag_point(&mut self, id: u64, dx: f64, dy: f64) -> Result<()> {
        let point = self
            .active
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(FenceError::UnknownPoint(id))?;
        point.translate(dx, dy);
        self.refresh_preview();
        Ok(())
    }

    /// Removes a point from the active polyline.
    pub fn delete_point(&mut self, id: u64) -> Result<()> {
        let index = self
            .active
            .iter()
            .position(|p| p.id == id)
            .ok_or(FenceError::UnknownPoint(id))?;
        self.active.remove(index);

        if self.active.is_empty() {
            // Removing every vertex of an edited run removes the run.
            if self.editing.take().is_some() {
                self.publish();
            }
        } else {
            self.refresh_preview();
        }
        Ok(())
    }

    /// Publishes the live preview after a drag ends. Returns true if a
    /// measurement was being edited.
    pub fn commit_live_edit(&mut self) -> bool {
        match self.editing.as_mut() {
            Some(session) => {
                session.published = true;
                self.publish();
                true
            }
            None => false,
        }
    }

    fn refresh_preview(&mut self) {
        let Self {
            editing,
            active,
            gates,
            config,
            ..
        } = self;
        if let Some(session) = editing {
            if !active.is_empty() {
                session.preview = Measurement::build(
                    session.original.id,
                    session.original.label.clone(),
                    active,
                    gates,
                    config,
                );
            }
        }
    }

    // ---------------------------------------------------------------------
    // Measurement operations
    // ---------------------------------------------------------------------

    /// Deletes a measurement. Gates are left in place.
    pub fn delete_measurement(&mut self, id: u64) -> Result<()> {
        if let Some(index) = self.measurements.iter().position(|m| m.id == id) {
            let removed = self.measurements.remove(index);
            tracing::info!("Deleted {} (id {})", removed.label, removed.id);
        } else if self.editing_id() == Some(id) {
            self.editing = None;
            self.active.clear();
            tracing::info!("Deleted measurement {} while editing", id);
        } else {
            return Err(FenceError::UnknownMeasurement(id));
        }
        self.publish();
        Ok(())
    }

    pub fn rename_measurement(&mut self, id: u64, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        if let Some(m) = self.measurements.iter_mut().find(|m| m.id == id) {
            m.label = label;
        } else if let Some(session) = self.editing.as_mut().filter(|s| s.original.id == id) {
            session.original.label = label.clone();
            session.preview.label = label;
        } else {
            return Err(FenceError::UnknownMeasurement(id));
        }
        self.publish();
        Ok(())
    }

    /// Empties points, gates and measurements, and publishes an empty list.
    pub fn clear_all(&mut self) {
        self.active.clear();
        self.gates.clear();
        self.measurements.clear();
        self.editing = None;
        tracing::info!("Cleared all measurements and gates");
        self.publish();
    }

    // ---------------------------------------------------------------------
    // Gate operations
    // ---------------------------------------------------------------------

    /// Places a gate with the configured defaults.
    pub fn add_gate(&mut self, at: CanvasPoint) -> u64 {
        let id = self.generate_id();
        let defaults = self.config.gate_defaults();
        let gate = Gate::new(id, at, defaults.width, defaults.kind, defaults.rotation);
        tracing::info!(
            "Placed {} gate {} at ({:.1}, {:.1})",
            gate.kind,
            id,
            at.x,
            at.y
        );
        self.gates.push(gate);
        self.refresh_preview();
        id
    }

    fn gate_mut(&mut self, id: u64) -> Result<&mut Gate> {
        self.gates
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(FenceError::UnknownGate(id))
    }

    pub fn move_gate(&mut self, id: u64, dx: f64, dy: f64) -> Result<()> {
        self.gate_mut(id)?.translate(dx, dy);
        self.refresh_preview();
        Ok(())
    }

    /// Toggles a gate's selection, deselecting every other gate. Returns the
    /// new selection state of `id`.
    pub fn toggle_gate_selection(&mut self, id: u64) -> Result<bool> {
        let selected = !self.gate_mut(id)?.selected;
        for gate in self.gates.iter_mut() {
            gate.selected = gate.id == id && selected;
        }
        Ok(selected)
    }

    pub fn deselect_gates(&mut self) {
        for gate in self.gates.iter_mut() {
            gate.selected = false;
        }
    }

    pub fn rotate_gate(&mut self, id: u64, delta_degrees: f64) -> Result<f64> {
        let gate = self.gate_mut(id)?;
        let rotation = gate.rotation + delta_degrees;
        gate.set_rotation(rotation);
        Ok(gate.rotation)
    }

    pub fn set_gate_rotation(&mut self, id: u64, degrees: f64) -> Result<()> {
        self.gate_mut(id)?.set_rotation(degrees);
        Ok(())
    }

    pub fn delete_gate(&mut self, id: u64) -> Result<()> {
        let index = self
            .gates
            .iter()
            .position(|g| g.id == id)
            .ok_or(FenceError::UnknownGate(id))?;
        self.gates.remove(index);
        tracing::debug!("Deleted gate {}", id);
        self.refresh_preview();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Hit testing (model space)
    // ---------------------------------------------------------------------

    /// Nearest gate whose center is within `radius`.
    pub fn gate_at(&self, at: CanvasPoint, radius: f64) -> Option<u64> {
        nearest(self.gates.iter().map(|g| (g.id, g.position())), at, radius)
    }

    /// Nearest active point within `radius`.
    pub fn point_at(&self, at: CanvasPoint, radius: f64) -> Option<u64> {
        nearest(self.active.iter().map(|p| (p.id, p.position())), at, radius)
    }

    /// Nearest vertex of a finalized measurement within `radius`, as
    /// `(measurement id, point id)`.
    pub fn endpoint_at(&self, at: CanvasPoint, radius: f64) -> Option<(u64, u64)> {
        let mut best: Option<(f64, u64, u64)> = None;
        for m in &self.measurements {
            for p in m.points() {
                let d = p.position().distance_to(&at);
                if d <= radius && best.map_or(true, |(bd, _, _)| d < bd) {
                    best = Some((d, m.id, p.id));
                }
            }
        }
        best.map(|(_, mid, pid)| (mid, pid))
    }
}

fn nearest(
    candidates: impl Iterator<Item = (u64, CanvasPoint)>,
    at: CanvasPoint,
    radius: f64,
) -> Option<u64> {
    candidates
        .map(|(id, p)| (id, p.distance_to(&at)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
