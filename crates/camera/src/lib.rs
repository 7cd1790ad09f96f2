//! Orientation camera: two look angles to an orthonormal basis and a view
//! transform, plus camera-local movement.
//!
//! # Invariants
//! - front/right/up are derived from yaw/pitch on demand, never stored as
//!   independent truth.
//! - Pitch is clamped strictly inside (-90, 90) degrees by every mutator, so
//!   the basis computation never hits the world-up singularity.
//! - After every recompute the basis is orthonormal: right = front x world-up
//!   normalized, up = right x front.

mod orientation;
mod projection;

pub use orientation::{Basis, OrientationCamera, PITCH_LIMIT_DEGREES};
pub use projection::Projection;

pub fn crate_info() -> &'static str {
    "meshview-camera v0.1.0"
}
