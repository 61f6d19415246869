//! Bill of materials for a finalized fence run.

use serde::{Deserialize, Serialize};

use fencekit_core::constants::PANEL_LENGTH_FT;

use crate::model::Measurement;

/// Derived material counts for one measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialsList {
    pub posts: usize,
    pub panels: usize,
    pub gates: usize,
    /// Human-readable quantity lines
    pub hardware: Vec<String>,
    /// Fence height in feet
    pub fence_height: f64,
}

/// Number of 8-foot panels needed to cover `total_length_ft`.
pub fn panel_count(total_length_ft: f64) -> usize {
    if total_length_ft <= 0.0 {
        return 0;
    }
    (total_length_ft / PANEL_LENGTH_FT).ceil() as usize
}

/// Computes the materials list from a measurement's sections.
///
/// Only gates attached to this measurement's sections are counted, not every
/// gate on the canvas.
pub fn compute(measurement: &Measurement) -> MaterialsList {
    let posts: usize = measurement.sections.iter().map(|s| s.posts.len()).sum();
    let gates: usize = measurement.sections.iter().map(|s| s.gates.len()).sum();
    let panels = panel_count(measurement.total_length);

    let mut hardware = vec![
        format!("{} post anchors", posts),
        format!("{} panel brackets", panels),
    ];
    if gates > 0 {
        hardware.push(format!("{} gate hinges", gates * 2));
        hardware.push(format!("{} gate latches", gates * 2));
    }

    MaterialsList {
        posts,
        panels,
        gates,
        hardware,
        fence_height: measurement.fence_height,
    }
}
