//! Plain-text mesh import: Wavefront-OBJ positions, optional UVs, and face
//! index lists, plus the built-in unit cube.
//!
//! # Invariants
//! - Face corner indices always resolve inside the parsed vertex arrays;
//!   out-of-range input is a parse error, not a draw-time panic.
//! - Faces keep their polygon form; triangulation is a derived view.

mod data;
mod obj;

pub use data::{Corner, Face, MeshData};
pub use obj::{MeshError, load_obj, parse_obj};

pub fn crate_info() -> &'static str {
    "meshview-mesh v0.1.0"
}
