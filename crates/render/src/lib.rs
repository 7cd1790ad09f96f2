//! Renderer-agnostic interface for the viewer.
//!
//! # Invariants
//! - Renderers never mutate the scene or the camera.
//! - The view configuration is derived from the orientation camera each
//!   frame; renderers hold no camera state of their own.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "meshview-render v0.1.0"
}
