//! wgpu render backend for the mesh viewer.
//!
//! Renders a grid floor and the scene's meshes with per-vertex
//! position/color/UV data. Objects are either flat-tinted or textured; a 1x1
//! white texture stands in for untextured objects so one pipeline serves both.
//!
//! # Invariants
//! - The renderer never mutates scene or camera state.
//! - GPU mesh buffers are uploaded once per object and cached by `MeshId`.
//! - The view-projection is rebuilt from the orientation camera every frame.

mod gpu;
mod shaders;
mod texture;

pub use gpu::{RenderError, WgpuRenderer};
pub use texture::{Texture, TextureError};

pub fn crate_info() -> &'static str {
    "meshview-render-wgpu v0.1.0"
}
