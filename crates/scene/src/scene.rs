use meshview_common::{Color, MeshId, Transform};
use meshview_mesh::MeshData;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How an object is painted: a flat tint or an image file sampled by UV.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Textured(PathBuf),
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid(Color::WHITE)
    }
}

/// One object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshData,
    pub transform: Transform,
    pub paint: Paint,
}

impl SceneObject {
    pub fn new(mesh: MeshData) -> Self {
        Self {
            name: mesh.name.clone(),
            mesh,
            transform: Transform::default(),
            paint: Paint::default(),
        }
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn painted(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }
}

/// Errors from scene operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("object {0:?} not found")]
    NotFound(MeshId),
}

/// Flat object list keyed by `MeshId`.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: BTreeMap<MeshId, SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its new id.
    pub fn add(&mut self, object: SceneObject) -> MeshId {
        let id = MeshId::new();
        tracing::debug!("scene add {} as {}", object.name, id.short());
        self.objects.insert(id, object);
        id
    }

    /// Remove an object, returning it.
    pub fn remove(&mut self, id: MeshId) -> Result<SceneObject, SceneError> {
        self.objects.remove(&id).ok_or(SceneError::NotFound(id))
    }

    pub fn get(&self, id: MeshId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: MeshId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// All objects in deterministic id order.
    pub fn objects(&self) -> &BTreeMap<MeshId, SceneObject> {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn total_vertices(&self) -> usize {
        self.objects.values().map(|o| o.mesh.vertex_count()).sum()
    }

    pub fn total_faces(&self) -> usize {
        self.objects.values().map(|o| o.mesh.face_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn add_and_get() {
        let mut scene = Scene::new();
        let id = scene.add(SceneObject::new(MeshData::unit_cube()));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).unwrap().name, "unit_cube");
    }

    #[test]
    fn remove_returns_object() {
        let mut scene = Scene::new();
        let id = scene.add(SceneObject::new(MeshData::unit_cube()));
        let object = scene.remove(id).unwrap();
        assert_eq!(object.name, "unit_cube");
        assert!(scene.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_an_error() {
        let mut scene = Scene::new();
        let id = MeshId::new();
        assert_eq!(scene.remove(id), Err(SceneError::NotFound(id)));
    }

    #[test]
    fn totals_sum_over_objects() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(MeshData::unit_cube()));
        scene.add(SceneObject::new(MeshData::unit_cube()).at(Transform::from_position(
            Vec3::new(3.0, 0.0, 0.0),
        )));
        assert_eq!(scene.total_vertices(), 16);
        assert_eq!(scene.total_faces(), 12);
    }

    #[test]
    fn paint_defaults_to_solid_white() {
        let object = SceneObject::new(MeshData::unit_cube());
        assert_eq!(object.paint, Paint::Solid(Color::WHITE));
    }
}
