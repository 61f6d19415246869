//! # FenceKit Designer
//!
//! Interactive fence layout measurement tool. A user draws a polyline for a
//! fence run on a scaled property plan, places and rotates gates, and the
//! designer derives post placement and a bill of materials.
//!
//! ## Architecture
//!
//! ```text
//! ToolEvent (screen coords)
//!   └── FenceTool (interaction state machine)
//!         ├── Viewport (screen <-> model transform)
//!         └── MeasurementStore (points, gates, measurements)
//!               ├── geometry (distance, post spacing, gate containment)
//!               ├── model (sections, posts, measurements)
//!               ├── materials (bill of materials)
//!               └── HostBridge (publishes the measurement list)
//!
//! renderer (pure display list + tiny-skia rasterizer)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fencekit_designer::{CanvasPoint, FenceTool, ToolEvent};
//!
//! let mut tool = FenceTool::default();
//! tool.subscribe(|measurements| println!("{} fence run(s)", measurements.len()));
//! tool.handle_event(ToolEvent::Click { position: CanvasPoint::new(100.0, 100.0), time_ms: 0 });
//! tool.handle_event(ToolEvent::Click { position: CanvasPoint::new(180.0, 100.0), time_ms: 1000 });
//! tool.handle_event(ToolEvent::DoubleClick { position: CanvasPoint::new(180.0, 100.0) });
//! ```

pub mod geometry;
pub mod host_bridge;
pub mod materials;
pub mod model;
pub mod renderer;
pub mod store;
pub mod tool;
pub mod viewport;

pub use geometry::{CanvasPoint, PostPlacement};
pub use host_bridge::{HostBridge, MeasurementSummary, SubscriptionId};
pub use materials::MaterialsList;
pub use model::{Gate, Measurement, Point, Post, PostKind, Section};
pub use renderer::{export_png, rasterize, render_scene, DrawCommand, RenderInput, Rgba, Scene};
pub use store::MeasurementStore;
pub use tool::{FenceTool, Key, ToolEvent, ToolState};
pub use viewport::Viewport;

pub use fencekit_core::{FenceConfig, FenceError, GateDefaults, GateKind};
