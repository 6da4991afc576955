//! Runtime scene configuration loaded from `assets/scene.toml`.
//!
//! [`SceneConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_scene_config`] reads
//! `assets/scene.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<SceneConfig>` to any system parameter list and read values
//! with `config.base_speed`, `config.asteroid_count`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `SceneConfig::default()`.

use crate::constants::*;
use crate::error::{SceneError, SceneResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the override file, relative to the working directory.
pub const SCENE_CONFIG_PATH: &str = "assets/scene.toml";

/// Runtime-tunable flight, scene composition and presentation configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    // ── Flight ────────────────────────────────────────────────────────────────
    pub base_speed: f32,
    pub boost_multiplier: f32,
    pub mouse_sensitivity: f32,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub camera_start: [f32; 3],
    pub camera_fov_degrees: f32,

    // ── Asteroid belt ─────────────────────────────────────────────────────────
    pub asteroid_count: usize,
    pub belt_inner_radius: f32,
    pub belt_outer_radius: f32,
    pub belt_half_height: f32,
    pub asteroid_scale_min: f32,
    pub asteroid_scale_max: f32,
    pub asteroid_base_radius: f32,
    /// Fixed RNG seed for the belt.  `None` draws a fresh layout every mount.
    pub belt_seed: Option<u64>,

    // ── Lighting ──────────────────────────────────────────────────────────────
    pub ambient_brightness: f32,
    pub star_light_intensity: f32,
    pub star_light_range: f32,

    // ── Starfield ─────────────────────────────────────────────────────────────
    pub starfield_radius: f32,
    pub starfield_depth: f32,
    pub starfield_count: usize,
    pub star_size: f32,
    pub starfield_saturation: f32,

    // ── Body geometry ─────────────────────────────────────────────────────────
    pub cloud_spin_factor: f32,
    pub cloud_radius_offset: f32,
    pub glow_scale: f32,
    pub ring_inner_factor: f32,
    pub ring_outer_factor: f32,
    pub ring_tilt: f32,
    pub orbit_guide_half_width: f32,

    // ── Labels ────────────────────────────────────────────────────────────────
    pub label_distance_factor: f32,
    pub label_font_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            // Flight
            base_speed: BASE_SPEED,
            boost_multiplier: BOOST_MULTIPLIER,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            // Camera
            camera_start: CAMERA_START,
            camera_fov_degrees: CAMERA_FOV_DEGREES,
            // Asteroid belt
            asteroid_count: ASTEROID_COUNT,
            belt_inner_radius: BELT_INNER_RADIUS,
            belt_outer_radius: BELT_OUTER_RADIUS,
            belt_half_height: BELT_HALF_HEIGHT,
            asteroid_scale_min: ASTEROID_SCALE_MIN,
            asteroid_scale_max: ASTEROID_SCALE_MAX,
            asteroid_base_radius: ASTEROID_BASE_RADIUS,
            belt_seed: None,
            // Lighting
            ambient_brightness: AMBIENT_BRIGHTNESS,
            star_light_intensity: STAR_LIGHT_INTENSITY,
            star_light_range: STAR_LIGHT_RANGE,
            // Starfield
            starfield_radius: STARFIELD_RADIUS,
            starfield_depth: STARFIELD_DEPTH,
            starfield_count: STARFIELD_COUNT,
            star_size: STAR_SIZE,
            starfield_saturation: STARFIELD_SATURATION,
            // Body geometry
            cloud_spin_factor: CLOUD_SPIN_FACTOR,
            cloud_radius_offset: CLOUD_RADIUS_OFFSET,
            glow_scale: GLOW_SCALE,
            ring_inner_factor: RING_INNER_FACTOR,
            ring_outer_factor: RING_OUTER_FACTOR,
            ring_tilt: RING_TILT,
            orbit_guide_half_width: ORBIT_GUIDE_HALF_WIDTH,
            // Labels
            label_distance_factor: LABEL_DISTANCE_FACTOR,
            label_font_size: LABEL_FONT_SIZE,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a TOML document, keeping compiled defaults for
    /// absent keys.
    pub fn from_toml(path: &str, contents: &str) -> SceneResult<Self> {
        let config = toml::from_str::<SceneConfig>(contents).map_err(|e| SceneError::Config {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Check every sampled range and extent.
    ///
    /// Belt and starfield sampling panic on an empty range and the ring mesh
    /// needs `outer > inner`, so a file that breaks these is rejected whole.
    pub fn validate(&self, path: &str) -> SceneResult<()> {
        let invalid = |reason: String| SceneError::Config {
            path: path.to_string(),
            reason,
        };

        let ordered = [
            (
                "belt_inner_radius",
                self.belt_inner_radius,
                "belt_outer_radius",
                self.belt_outer_radius,
            ),
            (
                "asteroid_scale_min",
                self.asteroid_scale_min,
                "asteroid_scale_max",
                self.asteroid_scale_max,
            ),
        ];
        for (lo_key, lo, hi_key, hi) in ordered {
            if lo > hi {
                return Err(invalid(format!("{lo_key} ({lo}) exceeds {hi_key} ({hi})")));
            }
        }
        if self.ring_inner_factor >= self.ring_outer_factor {
            return Err(invalid(format!(
                "ring_inner_factor ({}) must be below ring_outer_factor ({})",
                self.ring_inner_factor, self.ring_outer_factor
            )));
        }

        let extents = [
            ("belt_inner_radius", self.belt_inner_radius),
            ("belt_half_height", self.belt_half_height),
            ("asteroid_scale_min", self.asteroid_scale_min),
            ("asteroid_base_radius", self.asteroid_base_radius),
            ("starfield_radius", self.starfield_radius),
            ("starfield_depth", self.starfield_depth),
            ("star_size", self.star_size),
            ("ring_inner_factor", self.ring_inner_factor),
            ("orbit_guide_half_width", self.orbit_guide_half_width),
            ("glow_scale", self.glow_scale),
        ];
        for (key, value) in extents {
            if value < 0.0 {
                return Err(invalid(format!("{key} must be non-negative, got {value}")));
            }
        }
        Ok(())
    }

    /// Effective flight speed in units per second for the given boost state.
    pub fn flight_speed(&self, boost: bool) -> f32 {
        if boost {
            self.base_speed * self.boost_multiplier
        } else {
            self.base_speed
        }
    }
}

/// Startup system: attempt to load `assets/scene.toml` and overwrite the
/// `SceneConfig` resource with any values present in the file.
///
/// A missing file is not an error.  Parse and validation errors are logged
/// and the compiled defaults stay in place.
pub fn load_scene_config(mut config: ResMut<SceneConfig>) {
    let path = SCENE_CONFIG_PATH;
    match std::fs::read_to_string(path) {
        Ok(contents) => match SceneConfig::from_toml(path, &contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("[config] Loaded scene config from {path}");
            }
            Err(e) => {
                warn!("[config] {e}; using defaults");
            }
        },
        Err(_) => {
            info!("[config] No {path} found; using compiled defaults");
        }
    }
}
