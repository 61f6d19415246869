//! Tool configuration for the fence layout designer.
//!
//! The host form owns these values and hands them to the designer. Every
//! numeric setter guards against bad input (NaN, infinities, zero spacing)
//! by keeping the last valid value instead of failing, so the spacing and
//! length math downstream never divides by zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::units::normalize_degrees;

/// Gate style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// One swinging leaf
    #[default]
    Single,
    /// Two leaves meeting in the middle
    Double,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            _ => Err(format!("Unknown gate kind: {}", s)),
        }
    }
}

/// Defaults applied to newly placed gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateDefaults {
    /// Opening width in feet
    pub width: f64,
    /// Single or double leaf
    pub kind: GateKind,
    /// Rotation in degrees, `[0, 360)`
    pub rotation: f64,
}

impl Default for GateDefaults {
    fn default() -> Self {
        Self {
            width: 4.0,
            kind: GateKind::Single,
            rotation: 0.0,
        }
    }
}

/// Numeric configuration read by the designer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceConfig {
    service_unit: String,
    fence_height: f64,
    post_spacing: f64,
    scale: f64,
    gate_defaults: GateDefaults,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            service_unit: "linear ft".to_string(),
            fence_height: 6.0,
            post_spacing: 8.0,
            scale: 10.0,
            gate_defaults: GateDefaults::default(),
        }
    }
}

fn accept(key: &str, value: f64, valid: bool) -> bool {
    if !valid {
        tracing::warn!("Ignoring invalid {} value {}, keeping last valid", key, value);
    }
    valid
}

impl FenceConfig {
    /// Creates a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Display-only unit label for the host form.
    pub fn service_unit(&self) -> &str {
        &self.service_unit
    }

    pub fn set_service_unit(&mut self, unit: impl Into<String>) {
        self.service_unit = unit.into();
    }

    /// Fence height in feet.
    pub fn fence_height(&self) -> f64 {
        self.fence_height
    }

    /// Sets the fence height. Rejects non-finite and negative values.
    pub fn set_fence_height(&mut self, feet: f64) -> bool {
        let ok = accept("fence_height", feet, feet.is_finite() && feet >= 0.0);
        if ok {
            self.fence_height = feet;
        }
        ok
    }

    /// Target distance between posts in feet.
    pub fn post_spacing(&self) -> f64 {
        self.post_spacing
    }

    /// Sets the post spacing. Rejects non-finite and non-positive values.
    pub fn set_post_spacing(&mut self, feet: f64) -> bool {
        let ok = accept("post_spacing", feet, feet.is_finite() && feet > 0.0);
        if ok {
            self.post_spacing = feet;
        }
        ok
    }

    /// Pixels per foot in model space.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the scale. Rejects non-finite and non-positive values.
    pub fn set_scale(&mut self, px_per_ft: f64) -> bool {
        let ok = accept("scale", px_per_ft, px_per_ft.is_finite() && px_per_ft > 0.0);
        if ok {
            self.scale = px_per_ft;
        }
        ok
    }

    pub fn gate_defaults(&self) -> &GateDefaults {
        &self.gate_defaults
    }

    /// Sets the default gate width. Rejects non-finite and non-positive values.
    pub fn set_gate_width(&mut self, feet: f64) -> bool {
        let ok = accept("gate_width", feet, feet.is_finite() && feet > 0.0);
        if ok {
            self.gate_defaults.width = feet;
        }
        ok
    }

    pub fn set_gate_kind(&mut self, kind: GateKind) {
        self.gate_defaults.kind = kind;
    }

    /// Sets the default gate rotation, normalized into `[0, 360)`.
    pub fn set_gate_rotation(&mut self, degrees: f64) -> bool {
        let ok = accept("gate_rotation", degrees, degrees.is_finite());
        if ok {
            self.gate_defaults.rotation = normalize_degrees(degrees);
        }
        ok
    }

    /// Replaces any invalid field (for example one read from a hand-edited
    /// settings file) with its default.
    pub fn sanitized(self) -> Self {
        let mut clean = Self::default();
        clean.set_service_unit(self.service_unit);
        clean.set_fence_height(self.fence_height);
        clean.set_post_spacing(self.post_spacing);
        clean.set_scale(self.scale);
        clean.set_gate_width(self.gate_defaults.width);
        clean.set_gate_kind(self.gate_defaults.kind);
        clean.set_gate_rotation(self.gate_defaults.rotation);
        clean
    }

    /// Converts a model-space distance to feet.
    pub fn to_feet(&self, model_units: f64) -> f64 {
        model_units / self.scale
    }

    /// Converts feet to a model-space distance.
    pub fn to_model(&self, feet: f64) -> f64 {
        feet * self.scale
    }
}
