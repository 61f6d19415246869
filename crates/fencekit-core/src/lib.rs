//! # FenceKit Core
//!
//! Core types shared by the FenceKit crates: the error taxonomy, layout
//! constants, the tool configuration with its last-valid-value guards, and
//! length formatting helpers.

pub mod config;
pub mod constants;
pub mod error;
pub mod units;

pub use config::{FenceConfig, GateDefaults, GateKind};
pub use error::{FenceError, Result};
pub use units::{format_feet, normalize_degrees};
