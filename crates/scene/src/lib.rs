//! The viewer's object list: loaded meshes with a transform and a paint.
//!
//! Deliberately flat — there is no hierarchy and no parenting. Objects are
//! stored in a BTreeMap for deterministic iteration order.

mod scene;

pub use scene::{Paint, Scene, SceneError, SceneObject};

pub fn crate_info() -> &'static str {
    "meshview-scene v0.1.0"
}
