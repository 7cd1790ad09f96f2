use glam::Vec3;

/// Speed multiplier applied while the boost key is held.
pub const BOOST_MULTIPLIER: f32 = 3.0;

/// A high-level action the frame loop consumes.
///
/// The camera and UI consume actions, never raw key or mouse events, so the
/// windowing layer stays swappable.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Translate the camera by a camera-local delta (right, up, front).
    MoveLocal(Vec3),
    /// Rotate the camera by a look delta in input units.
    Look { dx: f32, dy: f32 },
    /// Show or hide the inspector panel.
    ToggleInspector,
    /// Leave the application.
    Quit,
    /// No-op (unbound input).
    Noop,
}

/// A held movement key, decoupled from the window library's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl MoveKey {
    /// Camera-local unit contribution, packed as (right, up, front).
    fn local_axis(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::new(0.0, 0.0, 1.0),
            Self::Back => Vec3::new(0.0, 0.0, -1.0),
            Self::Right => Vec3::new(1.0, 0.0, 0.0),
            Self::Left => Vec3::new(-1.0, 0.0, 0.0),
            Self::Up => Vec3::new(0.0, 1.0, 0.0),
            Self::Down => Vec3::new(0.0, -1.0, 0.0),
        }
    }
}

/// Combine the held movement keys into one camera-local delta for this frame.
pub fn local_delta(
    held: impl IntoIterator<Item = MoveKey>,
    dt: f32,
    speed: f32,
    boost: bool,
) -> Vec3 {
    let mult = if boost { BOOST_MULTIPLIER } else { 1.0 };
    let axes: Vec3 = held.into_iter().map(MoveKey::local_axis).sum();
    axes * speed * mult * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_move_is_constructible() {
        let a = Action::MoveLocal(Vec3::new(1.0, 0.0, 0.0));
        assert!(matches!(a, Action::MoveLocal(_)));
    }

    #[test]
    fn action_look_carries_deltas() {
        let a = Action::Look { dx: 2.0, dy: -1.0 };
        assert!(matches!(a, Action::Look { dx, dy } if dx == 2.0 && dy == -1.0));
    }

    #[test]
    fn opposing_keys_cancel() {
        let delta = local_delta([MoveKey::Forward, MoveKey::Back], 1.0, 10.0, false);
        assert_eq!(delta, Vec3::ZERO);
    }

    #[test]
    fn delta_scales_with_dt_and_speed() {
        let delta = local_delta([MoveKey::Forward], 0.5, 10.0, false);
        assert_eq!(delta, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn boost_multiplies_speed() {
        let plain = local_delta([MoveKey::Right], 1.0, 2.0, false);
        let boosted = local_delta([MoveKey::Right], 1.0, 2.0, true);
        assert_eq!(boosted, plain * BOOST_MULTIPLIER);
    }

    #[test]
    fn no_keys_means_no_motion() {
        assert_eq!(local_delta([], 1.0, 10.0, true), Vec3::ZERO);
    }
}
