//! Pointer capture (cursor grab) plumbing.
//!
//! Other systems never touch the window cursor directly.  They write a
//! [`PointerLockRequest`]; [`apply_pointer_lock_requests_system`] turns it into
//! a `CursorOptions` change on the primary window, and
//! [`observe_pointer_lock_system`] reports what the window actually ended up
//! doing as a [`PointerLockChanged`] message.  That message is the only source
//! of truth for "are we capturing input": a request can be ignored or undone by
//! the platform, so nothing assumes success after asking.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

/// Ask the platform to capture or release the pointer.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerLockRequest {
    Acquire,
    Release,
}

/// Emitted whenever the observed capture state changes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerLockChanged {
    pub locked: bool,
}

/// `true` for grab modes that count as captured.
pub fn is_grabbed(mode: CursorGrabMode) -> bool {
    matches!(mode, CursorGrabMode::Locked | CursorGrabMode::Confined)
}

/// Grab mode used for capture.  Web builds can only confine the cursor.
#[cfg(not(target_family = "wasm"))]
const CAPTURE_MODE: CursorGrabMode = CursorGrabMode::Locked;
#[cfg(target_family = "wasm")]
const CAPTURE_MODE: CursorGrabMode = CursorGrabMode::Confined;

/// Capture or free the cursor.  A captured cursor is hidden and parked under
/// the crosshair so picking and mouse look start from the view centre.
fn apply_capture(cursor: &mut CursorOptions, window: &mut Window, capture: bool) {
    cursor.grab_mode = if capture {
        CAPTURE_MODE
    } else {
        CursorGrabMode::None
    };
    cursor.visible = !capture;
    if capture {
        window.set_cursor_position(Some(window.size() / 2.0));
    }
}

/// Apply queued lock requests to the primary window.
///
/// Only the last request of the frame matters.  No-ops without a window
/// (headless tests).
pub fn apply_pointer_lock_requests_system(
    mut requests: MessageReader<PointerLockRequest>,
    mut windows: Query<(&mut Window, &mut CursorOptions), With<PrimaryWindow>>,
) {
    let Some(last) = requests.read().last().copied() else {
        return;
    };
    let Ok((mut window, mut cursor)) = windows.single_mut() else {
        return;
    };

    let want = last == PointerLockRequest::Acquire;
    if is_grabbed(cursor.grab_mode) != want {
        apply_capture(&mut cursor, &mut window, want);
        debug!("[lock] Requested pointer {}", if want { "capture" } else { "release" });
    }
}

/// Watch the window's grab mode and report transitions.
///
/// Also releases the pointer when the window loses focus, matching what a
/// browser does with an active pointer lock.
pub fn observe_pointer_lock_system(
    mut last_seen: Local<bool>,
    mut windows: Query<(&mut Window, &mut CursorOptions), With<PrimaryWindow>>,
    mut changed: MessageWriter<PointerLockChanged>,
) {
    let Ok((mut window, mut cursor)) = windows.single_mut() else {
        return;
    };

    if !window.focused && is_grabbed(cursor.grab_mode) {
        apply_capture(&mut cursor, &mut window, false);
    }

    let locked = is_grabbed(cursor.grab_mode);
    if locked != *last_seen {
        *last_seen = locked;
        info!("[lock] Pointer {}", if locked { "locked" } else { "unlocked" });
        changed.write(PointerLockChanged { locked });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_and_confined_count_as_grabbed() {
        assert!(is_grabbed(CursorGrabMode::Locked));
        assert!(is_grabbed(CursorGrabMode::Confined));
        assert!(!is_grabbed(CursorGrabMode::None));
    }

    #[test]
    fn capture_hides_cursor_and_release_restores_it() {
        let mut window = Window::default();
        let mut cursor = CursorOptions::default();

        apply_capture(&mut cursor, &mut window, true);
        assert!(is_grabbed(cursor.grab_mode));
        assert!(!cursor.visible);

        apply_capture(&mut cursor, &mut window, false);
        assert_eq!(cursor.grab_mode, CursorGrabMode::None);
        assert!(cursor.visible);
    }
}
