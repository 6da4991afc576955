//! Centralised scene, flight and interaction constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place.  [`crate::config::SceneConfig`] mirrors them and lets
//! `assets/scene.toml` override any subset at startup.

// ── Flight ────────────────────────────────────────────────────────────────────

/// Camera translation speed in scene units per second with no boost held.
pub const BASE_SPEED: f32 = 15.0;

/// Factor applied to [`BASE_SPEED`] while Shift is held.
pub const BOOST_MULTIPLIER: f32 = 5.0;

/// Radians of yaw/pitch per pixel of mouse motion while the pointer is locked.
pub const MOUSE_SENSITIVITY: f32 = 0.002;

/// Pitch is clamped just short of straight up/down so the view never flips.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Initial camera position, slightly above and behind the orbital plane.
pub const CAMERA_START: [f32; 3] = [0.0, 20.0, 100.0];

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 60.0;

// ── Asteroid belt ─────────────────────────────────────────────────────────────

/// Number of asteroid instances in the belt.
pub const ASTEROID_COUNT: usize = 2000;

/// Inner belt radius.  Sits between Mars (65) and Jupiter (100).
pub const BELT_INNER_RADIUS: f32 = 80.0;

/// Outer belt radius.
pub const BELT_OUTER_RADIUS: f32 = 95.0;

/// Maximum vertical offset from the orbital plane, either side.
pub const BELT_HALF_HEIGHT: f32 = 4.0;

/// Smallest uniform scale applied to an asteroid instance.
pub const ASTEROID_SCALE_MIN: f32 = 0.2;

/// Largest uniform scale applied to an asteroid instance.
pub const ASTEROID_SCALE_MAX: f32 = 1.0;

/// Radius of the shared asteroid mesh before per-instance scaling.
pub const ASTEROID_BASE_RADIUS: f32 = 0.2;

// ── Lighting ──────────────────────────────────────────────────────────────────

/// Ambient fill brightness.  Deep space is nearly black.
pub const AMBIENT_BRIGHTNESS: f32 = 20.0;

/// Luminous power of the point light at the star.
///
/// Bevy point lights always fall off with distance, so this is sized to keep
/// Neptune (220 units out) readable while the inner planets stay unclipped.
pub const STAR_LIGHT_INTENSITY: f32 = 2.0e8;

/// Point light range; nothing in the scene lies beyond it.
pub const STAR_LIGHT_RANGE: f32 = 2000.0;

// ── Starfield ─────────────────────────────────────────────────────────────────

/// Inner radius of the starfield shell.
pub const STARFIELD_RADIUS: f32 = 400.0;

/// Thickness of the starfield shell.
pub const STARFIELD_DEPTH: f32 = 100.0;

/// Number of background stars.
pub const STARFIELD_COUNT: usize = 10_000;

/// Base half-size of a single star quad.
pub const STAR_SIZE: f32 = 0.6;

/// Colour saturation of background stars (0 = white, 1 = fully tinted).
pub const STARFIELD_SATURATION: f32 = 0.5;

// ── Body geometry ─────────────────────────────────────────────────────────────

/// Sphere tessellation for planets and cloud shells.
pub const SPHERE_SEGMENTS: u32 = 64;

/// Cloud layers spin this much faster than the surface beneath them.
pub const CLOUD_SPIN_FACTOR: f32 = 1.2;

/// Cloud shell radius above the body's surface.
pub const CLOUD_RADIUS_OFFSET: f32 = 0.02;

/// Cloud shell opacity.
pub const CLOUD_OPACITY: f32 = 0.4;

/// Star glow shell scale relative to the star radius.
pub const GLOW_SCALE: f32 = 1.2;

/// Star glow shell opacity.
pub const GLOW_OPACITY: f32 = 0.1;

/// Ring inner radius as a multiple of the body radius.
pub const RING_INNER_FACTOR: f32 = 1.4;

/// Ring outer radius as a multiple of the body radius.
pub const RING_OUTER_FACTOR: f32 = 2.4;

/// Ring tilt away from the body's equatorial plane, in radians.
pub const RING_TILT: f32 = std::f32::consts::PI / 2.5;

/// Half-width of the orbit guide annulus.
pub const ORBIT_GUIDE_HALF_WIDTH: f32 = 0.15;

/// Orbit guide opacity.
pub const ORBIT_GUIDE_OPACITY: f32 = 0.08;

/// Annulus tessellation for rings and orbit guides.
pub const RING_SEGMENTS: u32 = 128;

// ── Labels ────────────────────────────────────────────────────────────────────

/// Screen-size attenuation factor for body labels.  A label is drawn at its
/// base size when the camera is this far from the body.
pub const LABEL_DISTANCE_FACTOR: f32 = 20.0;

/// Base label font size in logical pixels.
pub const LABEL_FONT_SIZE: f32 = 12.0;

/// Label scale is clamped to this range so far-away labels stay legible and
/// near ones never swamp the screen.
pub const LABEL_SCALE_MIN: f32 = 0.4;
pub const LABEL_SCALE_MAX: f32 = 3.0;

/// Star label opacity; keeps the label from hiding the glow.
pub const STAR_LABEL_OPACITY: f32 = 0.5;
