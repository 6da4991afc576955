//! Interaction coordinator: selection, pointer lock, and mode transitions.
//!
//! ## Modes
//!
//! | Mode         | `pointer_locked` | selection | Flight controller | Overlay      |
//! |--------------|------------------|-----------|-------------------|--------------|
//! | `Flying`     | true             | none      | mounted, moving   | crosshair    |
//! | `Inspecting` | false (forced)   | some      | unmounted         | info panel   |
//! | `Idle`       | false            | none      | mounted, frozen   | legend only  |
//!
//! ## Transitions
//!
//! ```text
//! Idle       --pointer locked-------------> Flying
//! Flying     --body clicked---------------> Inspecting   (lock dropped in the same call)
//! Flying     --pointer unlocked (ESC)-----> Idle
//! Inspecting --info panel closed----------> Idle         (lock is NOT re-acquired)
//! Idle       --click anywhere-------------> request lock; Flying only once it lands
//! ```
//!
//! All transitions go through [`InteractionState`] methods; systems only
//! translate messages into those calls.

use crate::catalog::{Catalog, CelestialBody};
use crate::flight::{FlightCamera, FlightController};
use crate::picking::{body_click_system, hover_system, pointer_target_system, PointerTarget};
use crate::pointer_lock::{
    apply_pointer_lock_requests_system, observe_pointer_lock_system, PointerLockChanged,
    PointerLockRequest,
};
use crate::{configure_frame_sets, FrameSet};
use bevy::prelude::*;

// ── State ─────────────────────────────────────────────────────────────────────

/// The three effective interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Flying,
    Inspecting,
    Idle,
}

/// Top-level session state.  Lives for the whole run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    selected: Option<CelestialBody>,
    pointer_locked: bool,
}

impl InteractionState {
    pub fn selected(&self) -> Option<&CelestialBody> {
        self.selected.as_ref()
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn mode(&self) -> InteractionMode {
        match (&self.selected, self.pointer_locked) {
            (Some(_), _) => InteractionMode::Inspecting,
            (None, true) => InteractionMode::Flying,
            (None, false) => InteractionMode::Idle,
        }
    }

    /// Select `body`.  Only allowed while locked; selecting drops the lock in
    /// the same step.  Returns `true` when the selection took effect.
    pub fn select(&mut self, body: CelestialBody) -> bool {
        if !self.pointer_locked {
            return false;
        }
        self.selected = Some(body);
        self.pointer_locked = false;
        true
    }

    /// Close the info panel.  Leaves the lock alone.
    pub fn close_info(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Pointer capture landed.  Refused while a body is being inspected,
    /// since a selection always implies an unlocked pointer.
    pub fn on_lock(&mut self) -> bool {
        if self.selected.is_some() {
            return false;
        }
        self.pointer_locked = true;
        true
    }

    /// Pointer capture was lost (ESC, focus change, or our own release).
    pub fn on_unlock(&mut self) {
        self.pointer_locked = false;
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// A qualifying click landed on a body.  Written by the body picking system.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyClicked {
    pub id: &'static str,
}

/// The user asked to close the information panel.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct CloseInfoRequested;

// ── Systems ───────────────────────────────────────────────────────────────────

/// Fold observed lock changes into [`InteractionState`].
pub fn apply_lock_changes_system(
    mut changes: MessageReader<PointerLockChanged>,
    mut state: ResMut<InteractionState>,
    mut requests: MessageWriter<PointerLockRequest>,
) {
    for change in changes.read() {
        if change.locked {
            if !state.on_lock() {
                warn!("[lock] Pointer locked while inspecting; releasing");
                requests.write(PointerLockRequest::Release);
            }
        } else {
            state.on_unlock();
        }
        info!("[mode] {:?}", state.mode());
    }
}

/// Idle + left click anywhere → ask for pointer capture.
///
/// Must run before the info-panel close handling so the click that closes the
/// panel is not also read as an Idle click.
pub fn idle_click_system(
    mouse: Res<ButtonInput<MouseButton>>,
    state: Res<InteractionState>,
    mut requests: MessageWriter<PointerLockRequest>,
) {
    if state.mode() == InteractionMode::Idle && mouse.just_pressed(MouseButton::Left) {
        requests.write(PointerLockRequest::Acquire);
    }
}

/// Turn body clicks into selections.
pub fn apply_body_clicks_system(
    mut clicks: MessageReader<BodyClicked>,
    catalog: Res<Catalog>,
    mut state: ResMut<InteractionState>,
    mut requests: MessageWriter<PointerLockRequest>,
) {
    for click in clicks.read() {
        let body = match catalog.get(click.id) {
            Ok(body) => body.clone(),
            Err(e) => {
                warn!("[select] {e}");
                continue;
            }
        };
        let name = body.name;
        if state.select(body) {
            info!("[select] Inspecting {name}");
            requests.write(PointerLockRequest::Release);
        }
    }
}

/// Close the info panel on request.
pub fn apply_close_requests_system(
    mut closes: MessageReader<CloseInfoRequested>,
    mut state: ResMut<InteractionState>,
) {
    for _ in closes.read() {
        if state.close_info() {
            info!("[select] Info panel closed");
        }
    }
}

/// Mount the flight controller while nothing is selected, unmount it while
/// inspecting.  Unmounting drops its movement flags with it.
pub fn sync_flight_controller_system(
    mut commands: Commands,
    state: Res<InteractionState>,
    cameras: Query<(Entity, Has<FlightController>), With<FlightCamera>>,
) {
    let want = state.selected().is_none();
    for (camera, mounted) in cameras.iter() {
        if want && !mounted {
            commands.entity(camera).insert(FlightController::default());
        } else if !want && mounted {
            commands.entity(camera).remove::<FlightController>();
        }
    }
}

/// Selection, pointer lock and picking.
///
/// Per frame: observed lock changes are folded in first, then the pointer
/// ray is resolved, then clicks.  Requests to the window go out last so a
/// release issued this frame is visible to the observer next frame.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        configure_frame_sets(app);
        app.init_resource::<InteractionState>()
            .init_resource::<PointerTarget>()
            .add_message::<PointerLockRequest>()
            .add_message::<PointerLockChanged>()
            .add_message::<BodyClicked>()
            .add_message::<CloseInfoRequested>()
            .add_systems(
                Update,
                (
                    observe_pointer_lock_system,
                    apply_lock_changes_system,
                    pointer_target_system,
                    hover_system,
                    body_click_system,
                    idle_click_system,
                )
                    .chain()
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (
                    apply_body_clicks_system,
                    apply_close_requests_system,
                    sync_flight_controller_system,
                )
                    .chain()
                    .in_set(FrameSet::Coordinate),
            )
            .add_systems(
                Update,
                apply_pointer_lock_requests_system.in_set(FrameSet::Present),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{solar_system, STAR_ID};

    fn body(id: &str) -> CelestialBody {
        solar_system()
            .into_iter()
            .find(|b| b.id == id)
            .expect("body in built-in catalog")
    }

    fn flying() -> InteractionState {
        let mut state = InteractionState::default();
        assert!(state.on_lock());
        state
    }

    #[test]
    fn starts_idle() {
        assert_eq!(InteractionState::default().mode(), InteractionMode::Idle);
    }

    #[test]
    fn select_while_unlocked_is_a_no_op() {
        let mut state = InteractionState::default();
        let before = state.clone();

        assert!(!state.select(body("earth")));
        assert_eq!(state, before);
    }

    #[test]
    fn select_drops_lock_in_the_same_step() {
        let mut state = flying();

        assert!(state.select(body("earth")));
        assert!(!state.pointer_locked());
        assert_eq!(state.selected().map(|b| b.id), Some("earth"));
        assert_eq!(state.mode(), InteractionMode::Inspecting);
    }

    #[test]
    fn star_is_selectable() {
        let mut state = flying();
        assert!(state.select(body(STAR_ID)));
        assert_eq!(state.selected().map(|b| b.id), Some(STAR_ID));
        assert!(!state.pointer_locked());
    }

    #[test]
    fn closing_clears_selection_without_relocking() {
        let mut state = flying();
        state.select(body("mars"));

        assert!(state.close_info());
        assert!(state.selected().is_none());
        assert!(!state.pointer_locked());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn losing_lock_while_flying_goes_idle() {
        let mut state = flying();
        state.on_unlock();
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn lock_is_refused_while_inspecting() {
        let mut state = flying();
        state.select(body("venus"));

        assert!(!state.on_lock());
        assert_eq!(state.mode(), InteractionMode::Inspecting);
    }
}
