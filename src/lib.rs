//! # FenceKit
//!
//! Fence layout measurement tool. A user draws fence runs on a scaled
//! property plan, drops gates onto them, and gets back post placement and a
//! bill of materials for each run.
//!
//! ## Architecture
//!
//! FenceKit is organized as a workspace with multiple crates:
//!
//! 1. **fencekit-core** - Errors, constants, tool configuration
//! 2. **fencekit-designer** - Viewport, geometry, measurement model,
//!    interaction state machine, renderer, materials, host bridge
//! 3. **fencekit-settings** - Settings persistence (TOML / JSON)
//! 4. **fencekit** - Headless demo binary

pub use fencekit_core::{format_feet, FenceConfig, FenceError, GateDefaults, GateKind, Result};
pub use fencekit_designer as designer;
pub use fencekit_designer::{
    CanvasPoint, FenceTool, Gate, Key, MaterialsList, Measurement, MeasurementStore,
    MeasurementSummary, Scene, ToolEvent, ToolState, Viewport,
};
pub use fencekit_settings::{Settings, SettingsError, ViewSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // stdout is reserved for the demo's JSON payload
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
