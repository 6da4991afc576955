//! First-person flight camera.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`flight_key_system`]: folds raw key press/release messages into the
//!    controller's [`MovementState`].
//! 2. [`flight_escape_system`]: ESC while locked asks for pointer release.
//! 3. [`mouse_look_system`]: yaw/pitch from mouse motion while locked.
//! 4. [`flight_integration_system`]: translates the camera along its own
//!    axes, scaled by frame time.  No-op unless the pointer is locked.
//!
//! The movement flags live inside the [`FlightController`] component on the
//! camera, so they exist exactly as long as the controller is mounted and
//! nothing else can read or write them.  The interaction coordinator removes
//! the component while a body is being inspected; key messages that arrive
//! while it is absent are simply dropped.

use crate::config::SceneConfig;
use crate::constants::MAX_PITCH;
use crate::interaction::InteractionState;
use crate::pointer_lock::PointerLockRequest;
use crate::{configure_frame_sets, FrameSet};
use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::MouseMotion;
use bevy::input::ButtonState;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker for the single scene camera the flight controller drives.
#[derive(Component, Debug, Default)]
pub struct FlightCamera;

/// One movement input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementFlag {
    Forward,
    Backward,
    Left,
    Right,
    Boost,
    Ascend,
    Descend,
}

impl MovementFlag {
    pub const ALL: [MovementFlag; 7] = [
        MovementFlag::Forward,
        MovementFlag::Backward,
        MovementFlag::Left,
        MovementFlag::Right,
        MovementFlag::Boost,
        MovementFlag::Ascend,
        MovementFlag::Descend,
    ];

    /// Map a physical key to its flag.  Unmapped keys return `None`.
    ///
    /// - **W / S** → forward / backward
    /// - **A / D** → left / right
    /// - **Shift** (either) → boost
    /// - **Space** → ascend
    /// - **Ctrl** (either) → descend
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW => Some(Self::Forward),
            KeyCode::KeyS => Some(Self::Backward),
            KeyCode::KeyA => Some(Self::Left),
            KeyCode::KeyD => Some(Self::Right),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Self::Boost),
            KeyCode::Space => Some(Self::Ascend),
            KeyCode::ControlLeft | KeyCode::ControlRight => Some(Self::Descend),
            _ => None,
        }
    }
}

/// Seven independent held-key flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    pub ascend: bool,
    pub descend: bool,
}

impl MovementState {
    pub fn set(&mut self, flag: MovementFlag, held: bool) {
        match flag {
            MovementFlag::Forward => self.forward = held,
            MovementFlag::Backward => self.backward = held,
            MovementFlag::Left => self.left = held,
            MovementFlag::Right => self.right = held,
            MovementFlag::Boost => self.boost = held,
            MovementFlag::Ascend => self.ascend = held,
            MovementFlag::Descend => self.descend = held,
        }
    }

    pub fn get(&self, flag: MovementFlag) -> bool {
        match flag {
            MovementFlag::Forward => self.forward,
            MovementFlag::Backward => self.backward,
            MovementFlag::Left => self.left,
            MovementFlag::Right => self.right,
            MovementFlag::Boost => self.boost,
            MovementFlag::Ascend => self.ascend,
            MovementFlag::Descend => self.descend,
        }
    }

    /// Apply one raw key event.  Returns `false` for unmapped keys.
    pub fn apply_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match MovementFlag::from_key(key) {
            Some(flag) => {
                self.set(flag, pressed);
                true
            }
            None => false,
        }
    }
}

/// The mounted flight controller.  Owns its movement flags.
#[derive(Component, Debug, Default)]
pub struct FlightController {
    movement: MovementState,
}

impl FlightController {
    pub fn movement(&self) -> &MovementState {
        &self.movement
    }

    pub fn movement_mut(&mut self) -> &mut MovementState {
        &mut self.movement
    }
}

// ── Integration ───────────────────────────────────────────────────────────────

/// World-space displacement for one frame.
///
/// All axes are the camera's own: forward/back along local −Z, strafing along
/// local +X, ascend/descend along local +Y.  Returns zero when `locked` is
/// false regardless of which flags are held.
pub fn flight_displacement(
    rotation: Quat,
    movement: &MovementState,
    config: &SceneConfig,
    locked: bool,
    dt: f32,
) -> Vec3 {
    if !locked {
        return Vec3::ZERO;
    }

    let step = config.flight_speed(movement.boost) * dt;
    let forward = rotation * Vec3::NEG_Z;
    let right = rotation * Vec3::X;
    let up = rotation * Vec3::Y;

    let mut delta = Vec3::ZERO;
    if movement.forward {
        delta += forward * step;
    }
    if movement.backward {
        delta -= forward * step;
    }
    if movement.left {
        delta -= right * step;
    }
    if movement.right {
        delta += right * step;
    }
    if movement.ascend {
        delta += up * step;
    }
    if movement.descend {
        delta -= up * step;
    }
    delta
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Fold raw key press/release messages into the mounted controller's flags.
///
/// Flags update whether or not the pointer is locked; only integration is
/// gated on the lock.
pub fn flight_key_system(
    mut keys: MessageReader<KeyboardInput>,
    mut controllers: Query<&mut FlightController>,
) {
    for event in keys.read() {
        let pressed = event.state == ButtonState::Pressed;
        for mut controller in controllers.iter_mut() {
            controller.movement.apply_key(event.key_code, pressed);
        }
    }
}

/// ESC while locked releases the pointer, like a browser does.
pub fn flight_escape_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<InteractionState>,
    controllers: Query<(), With<FlightController>>,
    mut requests: MessageWriter<PointerLockRequest>,
) {
    if state.pointer_locked() && !controllers.is_empty() && keys.just_pressed(KeyCode::Escape) {
        requests.write(PointerLockRequest::Release);
    }
}

/// Mouse look while locked: yaw about world up, pitch about local right,
/// pitch clamped short of the poles.
pub fn mouse_look_system(
    mut motion: MessageReader<MouseMotion>,
    state: Res<InteractionState>,
    config: Res<SceneConfig>,
    mut cameras: Query<&mut Transform, With<FlightController>>,
) {
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    if !state.pointer_locked() || delta == Vec2::ZERO {
        return;
    }

    for mut transform in cameras.iter_mut() {
        let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let yaw = yaw - delta.x * config.mouse_sensitivity;
        let pitch = (pitch - delta.y * config.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    }
}

/// Move the camera for this frame.
pub fn flight_integration_system(
    time: Res<Time>,
    state: Res<InteractionState>,
    config: Res<SceneConfig>,
    mut cameras: Query<(&mut Transform, &FlightController)>,
) {
    if !state.pointer_locked() {
        return;
    }
    let dt = time.delta_secs();
    for (mut transform, controller) in cameras.iter_mut() {
        let delta = flight_displacement(
            transform.rotation,
            &controller.movement,
            &config,
            true,
            dt,
        );
        transform.translation += delta;
    }
}

/// Keyboard flight and mouse look for the [`FlightCamera`].
pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        configure_frame_sets(app);
        app.add_systems(
            Update,
            (
                flight_key_system,
                flight_escape_system,
                mouse_look_system,
                flight_integration_system,
            )
                .chain()
                .in_set(FrameSet::Motion),
        );
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn all_combinations() -> impl Iterator<Item = MovementState> {
        (0u8..128).map(|bits| {
            let mut state = MovementState::default();
            for (i, flag) in MovementFlag::ALL.iter().enumerate() {
                state.set(*flag, bits & (1 << i) != 0);
            }
            state
        })
    }

    #[test]
    fn key_mapping_covers_both_modifier_sides() {
        assert_eq!(MovementFlag::from_key(KeyCode::ShiftLeft), Some(MovementFlag::Boost));
        assert_eq!(MovementFlag::from_key(KeyCode::ShiftRight), Some(MovementFlag::Boost));
        assert_eq!(MovementFlag::from_key(KeyCode::ControlLeft), Some(MovementFlag::Descend));
        assert_eq!(MovementFlag::from_key(KeyCode::ControlRight), Some(MovementFlag::Descend));
        assert_eq!(MovementFlag::from_key(KeyCode::Space), Some(MovementFlag::Ascend));
        assert_eq!(MovementFlag::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn press_then_release_clears_flag() {
        let mut state = MovementState::default();
        assert!(state.apply_key(KeyCode::KeyW, true));
        assert!(state.forward);
        assert!(state.apply_key(KeyCode::KeyW, false));
        assert!(!state.forward);
    }

    #[test]
    fn unmapped_key_changes_nothing() {
        let mut state = MovementState::default();
        assert!(!state.apply_key(KeyCode::KeyZ, true));
        assert_eq!(state, MovementState::default());
    }

    #[test]
    fn unlocked_never_moves() {
        let config = SceneConfig::default();
        let rotation = Quat::from_euler(EulerRot::YXZ, 0.7, -0.3, 0.0);
        for state in all_combinations() {
            let delta = flight_displacement(rotation, &state, &config, false, 0.5);
            assert_eq!(delta, Vec3::ZERO, "moved while unlocked with {state:?}");
        }
    }

    #[test]
    fn boosted_forward_moves_exact_distance_along_view() {
        let config = SceneConfig::default();
        let rotation = Quat::from_euler(EulerRot::YXZ, 1.1, 0.4, 0.0);
        let state = MovementState {
            forward: true,
            boost: true,
            ..Default::default()
        };
        let dt = 0.25;

        let delta = flight_displacement(rotation, &state, &config, true, dt);
        let expected = (rotation * Vec3::NEG_Z) * (15.0 * 5.0 * dt);

        assert!(
            (delta - expected).length() < EPS,
            "expected {expected:?}, got {delta:?}"
        );
    }

    #[test]
    fn ascend_uses_local_up_not_world_up() {
        let config = SceneConfig::default();
        // Pitched down 45°: local up leans forward.
        let rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4);
        let state = MovementState {
            ascend: true,
            ..Default::default()
        };

        let delta = flight_displacement(rotation, &state, &config, true, 1.0);
        assert!(delta.z.abs() > 1.0, "expected a forward component, got {delta:?}");
        assert!((delta.length() - 15.0).abs() < EPS);
    }

    #[test]
    fn opposite_flags_cancel() {
        let config = SceneConfig::default();
        let state = MovementState {
            forward: true,
            backward: true,
            left: true,
            right: true,
            ..Default::default()
        };
        let delta = flight_displacement(Quat::IDENTITY, &state, &config, true, 1.0);
        assert!(delta.length() < EPS);
    }
}
