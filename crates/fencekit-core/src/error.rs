//! Error handling for FenceKit
//!
//! Pointer and keyboard handling in the designer never fails; a missed
//! hit-test is simply a no-op. The errors below are returned by the
//! programmatic, id-addressed operations and by the I/O edges (screenshot
//! export, configuration).
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Errors raised by the fence layout tool.
#[derive(Error, Debug)]
pub enum FenceError {
    /// No finalized or in-edit measurement has this id
    #[error("Unknown measurement: {0}")]
    UnknownMeasurement(u64),

    /// No gate has this id
    #[error("Unknown gate: {0}")]
    UnknownGate(u64),

    /// No point of the active polyline has this id
    #[error("Unknown point: {0}")]
    UnknownPoint(u64),

    /// The measurement has no vertices to edit
    #[error("Measurement {0} has no points to edit")]
    EmptyMeasurement(u64),

    /// The operation needs an active polyline
    #[error("No fence is being drawn")]
    NotDrawing,

    /// A configuration value was rejected
    #[error("Invalid config '{key}': {reason}")]
    InvalidConfig {
        /// The configuration key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The rasterizer could not produce a frame
    #[error("Render error: {0}")]
    Render(String),

    /// Image encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FenceKit operations.
pub type Result<T> = std::result::Result<T, FenceError>;
