//! Shared types and utilities for the meshview workspace.
//!
//! # Invariants
//! - `Color` channels are validated at construction; out-of-range components
//!   are user-visible errors, never silently wrapped.
//! - Checked vector math returns errors for degenerate inputs instead of
//!   panicking or producing NaN.

pub mod color;
pub mod config;
pub mod math;
pub mod types;

pub use color::{Color, ColorError};
pub use config::{ConfigError, ViewerConfig};
pub use math::{MathError, checked_div, try_normalize};
pub use types::{MeshId, Transform};

pub fn crate_info() -> &'static str {
    "meshview-common v0.1.0"
}
