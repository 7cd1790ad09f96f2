use meshview_common::MeshId;
use meshview_scene::Scene;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against the scene for debugging and the
/// inspector panel.
pub struct SceneInspector;

/// Aggregate counts across the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSummary {
    pub object_count: usize,
    pub total_vertices: usize,
    pub total_faces: usize,
}

/// Details for a single object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    pub id: MeshId,
    pub name: String,
    pub position: [f32; 3],
    pub vertex_count: usize,
    pub face_count: usize,
}

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            object_count: scene.len(),
            total_vertices: scene.total_vertices(),
            total_faces: scene.total_faces(),
        }
    }

    /// Details for one object.
    pub fn inspect(scene: &Scene, id: MeshId) -> Option<ObjectInfo> {
        scene.get(id).map(|object| {
            let p = object.transform.position;
            ObjectInfo {
                id,
                name: object.name.clone(),
                position: [p.x, p.y, p.z],
                vertex_count: object.mesh.vertex_count(),
                face_count: object.mesh.face_count(),
            }
        })
    }

    /// List all object ids in the scene.
    pub fn list(scene: &Scene) -> Vec<MeshId> {
        scene.objects().keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_mesh::MeshData;
    use meshview_scene::SceneObject;

    #[test]
    fn summary_counts_objects() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(MeshData::unit_cube()));
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.object_count, 1);
        assert_eq!(summary.total_vertices, 8);
        assert_eq!(summary.total_faces, 6);
    }

    #[test]
    fn inspect_missing_object_is_none() {
        let scene = Scene::new();
        assert_eq!(SceneInspector::inspect(&scene, MeshId::new()), None);
    }

    #[test]
    fn list_matches_scene_order() {
        let mut scene = Scene::new();
        let a = scene.add(SceneObject::new(MeshData::unit_cube()));
        let b = scene.add(SceneObject::new(MeshData::unit_cube()));
        let ids = SceneInspector::list(&scene);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&a) && ids.contains(&b));
    }
}
