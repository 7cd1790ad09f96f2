use crate::OrientationCamera;
use glam::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Track a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined view-projection for the given camera.
    pub fn view_projection(&self, camera: &OrientationCamera) -> Mat4 {
        self.matrix() * camera.view_transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_aspect() {
        let mut projection = Projection::default();
        projection.resize(800, 400);
        assert_eq!(projection.aspect, 2.0);
        projection.resize(100, 0);
        assert_eq!(projection.aspect, 100.0);
    }

    #[test]
    fn view_projection_is_finite() {
        let projection = Projection::default();
        let camera = OrientationCamera::default();
        let vp = projection.view_projection(&camera);
        assert!(vp.is_finite());
    }
}
