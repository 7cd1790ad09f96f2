use glam::Vec3;
use meshview_camera::OrientationCamera;
use meshview_scene::Scene;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 8.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

impl RenderView {
    /// Derive the view from the orientation camera: eye = position, target =
    /// one unit along the recomputed front vector.
    pub fn from_camera(camera: &OrientationCamera, fov_degrees: f32) -> Self {
        Self {
            eye: camera.position,
            target: camera.position + camera.basis().front,
            fov_degrees,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view configuration, then produces
/// output. It never mutates either.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Debug text renderer — the headless counterpart of the wgpu backend.
///
/// Produces a human-readable string representation of the scene. Useful for
/// CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene ({} objects, {} vertices, {} faces) ===\n",
            scene.len(),
            scene.total_vertices(),
            scene.total_faces()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (id, object) in scene.objects() {
            let p = object.transform.position;
            out.push_str(&format!(
                "  [{}] {}: {} vertices, {} faces, pos=({:.2}, {:.2}, {:.2})\n",
                id.short(),
                object.name,
                object.mesh.vertex_count(),
                object.mesh.face_count(),
                p.x,
                p.y,
                p.z
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_mesh::MeshData;
    use meshview_scene::SceneObject;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());

        assert!(output.contains("0 objects"));
        assert!(output.contains("fov=60"));
    }

    #[test]
    fn debug_renderer_lists_objects() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(MeshData::unit_cube()));

        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());

        assert!(output.contains("unit_cube"));
        assert!(output.contains("8 vertices"));
    }

    #[test]
    fn view_from_camera_targets_along_front() {
        let camera = OrientationCamera::new(Vec3::ZERO, 0.0, 0.0);
        let view = RenderView::from_camera(&camera, 45.0);
        assert_eq!(view.eye, Vec3::ZERO);
        assert!((view.target - Vec3::X).length() < 1e-5);
        assert_eq!(view.fov_degrees, 45.0);
    }
}
