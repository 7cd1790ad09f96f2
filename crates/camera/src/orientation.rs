use glam::{Mat4, Vec3};
use meshview_common::{MathError, try_normalize};

/// Pitch never reaches +/-90 degrees; at the poles front becomes parallel to
/// world-up and the right vector degenerates.
pub const PITCH_LIMIT_DEGREES: f32 = 89.9;

/// Camera-local orthonormal basis derived from yaw/pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub front: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Fly camera driven by yaw/pitch look angles in degrees.
///
/// Yaw is unbounded and wraps implicitly through the trigonometry. Pitch is
/// private so it can never carry an unclamped value into the basis math.
/// Convention: yaw 0, pitch 0 looks down +X with world-up (0, 1, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for OrientationCamera {
    fn default() -> Self {
        // Facing -Z, a few units back from the origin.
        Self {
            position: Vec3::new(0.0, 2.0, 8.0),
            yaw: -90.0,
            pitch: 0.0,
            speed: 10.0,
            sensitivity: 0.1,
        }
    }
}

impl OrientationCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES),
            ..Self::default()
        }
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always inside (-90, 90).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Apply a look delta (mouse motion), scaled by sensitivity.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.set_pitch(self.pitch + dy * self.sensitivity);
    }

    /// Recompute the orthonormal basis from the current angles.
    pub fn basis(&self) -> Basis {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let front = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        // The pitch clamp keeps front off the world-up axis, so this cross
        // product cannot degenerate.
        let right = front.cross(Vec3::Y).normalize();
        let up = right.cross(front);
        Basis { front, right, up }
    }

    /// Translate along the camera-local axes: right * dx + up * dy + front * dz.
    pub fn move_local(&mut self, dx: f32, dy: f32, dz: f32) {
        let basis = self.basis();
        self.position += basis.right * dx + basis.up * dy + basis.front * dz;
    }

    /// Point the camera at a world-space target. Fails if the target sits at
    /// the eye position (zero-length direction).
    pub fn look_at(&mut self, target: Vec3) -> Result<(), MathError> {
        let dir = try_normalize(target - self.position)?;
        self.set_pitch(dir.y.asin().to_degrees());
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        Ok(())
    }

    /// Right-handed look-at view transform: eye = position,
    /// target = position + front, up = world-up.
    pub fn view_transform(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.basis().front, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_near(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length() < EPS,
            "expected {b:?}, got {a:?} (delta {})",
            (a - b).length()
        );
    }

    #[test]
    fn basis_is_orthonormal_across_angle_sweep() {
        let mut camera = OrientationCamera::default();
        for yaw_step in 0..24 {
            for pitch_step in -8..=8 {
                camera.set_yaw(yaw_step as f32 * 15.0);
                camera.set_pitch(pitch_step as f32 * 11.0);
                let b = camera.basis();

                assert!((b.front.length() - 1.0).abs() < EPS);
                assert!((b.right.length() - 1.0).abs() < EPS);
                assert!((b.up.length() - 1.0).abs() < EPS);

                assert!(b.front.dot(b.right).abs() < EPS);
                assert!(b.front.dot(b.up).abs() < EPS);
                assert!(b.right.dot(b.up).abs() < EPS);
            }
        }
    }

    #[test]
    fn basis_at_origin_angles_matches_convention() {
        let camera = OrientationCamera::new(Vec3::ZERO, 0.0, 0.0);
        let b = camera.basis();
        assert_near(b.front, Vec3::X);
        assert_near(b.right, Vec3::Z);
        assert_near(b.up, Vec3::Y);
    }

    #[test]
    fn default_camera_faces_negative_z() {
        let b = OrientationCamera::default().basis();
        assert_near(b.front, Vec3::NEG_Z);
    }

    #[test]
    fn move_local_round_trip_restores_position() {
        let mut camera = OrientationCamera::new(Vec3::new(1.0, 2.0, 3.0), 37.0, -12.0);
        let start = camera.position;
        camera.move_local(1.0, 0.0, 0.0);
        camera.move_local(-1.0, 0.0, 0.0);
        assert_near(camera.position, start);
    }

    #[test]
    fn move_local_vertical_uses_basis_up_only() {
        // Pitched camera: local up is tilted, so a pure dy move must change
        // more than the Y component and must not double-count it.
        let mut camera = OrientationCamera::new(Vec3::ZERO, 0.0, 45.0);
        let up = camera.basis().up;
        camera.move_local(0.0, 2.0, 0.0);
        assert_near(camera.position, up * 2.0);
    }

    #[test]
    fn pitch_is_clamped_by_every_mutator() {
        let mut camera = OrientationCamera::new(Vec3::ZERO, 0.0, 200.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT_DEGREES);

        camera.set_pitch(-500.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT_DEGREES);

        camera.sensitivity = 1.0;
        camera.look(0.0, 1000.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT_DEGREES);
    }

    #[test]
    fn look_does_not_clamp_yaw() {
        let mut camera = OrientationCamera::new(Vec3::ZERO, 0.0, 0.0);
        camera.sensitivity = 1.0;
        camera.look(400.0, 0.0);
        assert_eq!(camera.yaw(), 400.0);
        // Wrapping happens through the trigonometry: 400 degrees == 40 degrees.
        let reference = OrientationCamera::new(Vec3::ZERO, 40.0, 0.0);
        assert_near(camera.basis().front, reference.basis().front);
    }

    #[test]
    fn look_at_round_trips_through_basis() {
        let mut camera = OrientationCamera::new(Vec3::new(4.0, -1.0, 2.0), 63.0, 17.0);
        let front = camera.basis().front;
        let (yaw, pitch) = (camera.yaw(), camera.pitch());

        camera.look_at(camera.position + front * 3.0).unwrap();
        assert!((camera.yaw() - yaw).abs() < 1e-3);
        assert!((camera.pitch() - pitch).abs() < 1e-3);
    }

    #[test]
    fn look_at_own_position_is_an_error() {
        let mut camera = OrientationCamera::default();
        let err = camera.look_at(camera.position).unwrap_err();
        assert_eq!(err, MathError::ZeroLengthNormalize);
    }

    #[test]
    fn view_transform_maps_eye_to_origin_and_front_to_negative_z() {
        let camera = OrientationCamera::new(Vec3::new(5.0, 1.0, -2.0), 123.0, -33.0);
        let view = camera.view_transform();

        let eye = view.transform_point3(camera.position);
        assert_near(eye, Vec3::ZERO);

        let ahead = view.transform_point3(camera.position + camera.basis().front);
        assert_near(ahead, Vec3::NEG_Z);
    }
}
