//! Developer tooling: frame profiling and scene inspection.
//!
//! # Invariants
//! - Inspection queries are read-only.
//! - Profiling state lives in instances owned by the frame loop, never in
//!   process-wide globals.

mod fps;
mod inspector;

pub use fps::FpsCounter;
pub use inspector::{ObjectInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "meshview-tools v0.1.0"
}
