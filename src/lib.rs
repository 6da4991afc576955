//! Solar system explorer library
//!
//! A free-flight 3D viewer of the solar system: fly a first-person camera
//! between the planets, point at a body to highlight it, and click it to read
//! its facts.  Bodies spin in place; nothing orbits.

pub mod belt;
pub mod body;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod flight;
pub mod geometry;
pub mod graphics;
pub mod interaction;
pub mod loading;
pub mod overlay;
pub mod picking;
pub mod pointer_lock;
pub mod scene;
pub mod starfield;

use bevy::prelude::*;
use loading::AppPhase;

/// Per-frame ordering of the interactive systems.  Every set only runs while
/// the scene is [`AppPhase::Running`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Lock changes, picking, clicks.
    Input,
    /// Selection and controller mounting.
    Coordinate,
    /// Camera flight and body spin.
    Motion,
    /// Visual state, overlays, window requests.
    Present,
}

/// Order the [`FrameSet`]s and gate them on the running phase.  Safe to call
/// from more than one plugin.
pub fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Input,
            FrameSet::Coordinate,
            FrameSet::Motion,
            FrameSet::Present,
        )
            .chain(),
    );
    for set in [
        FrameSet::Input,
        FrameSet::Coordinate,
        FrameSet::Motion,
        FrameSet::Present,
    ] {
        app.configure_sets(Update, set.run_if(in_state(AppPhase::Running)));
    }
}

/// Everything the explorer needs on top of `DefaultPlugins`.
pub struct SolarSystemPlugin;

impl Plugin for SolarSystemPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<config::SceneConfig>()
            .init_resource::<catalog::Catalog>()
            .add_plugins((
                loading::LoadingPlugin,
                interaction::InteractionPlugin,
                flight::FlightPlugin,
                scene::ScenePlugin,
                overlay::OverlayPlugin,
            ))
            .add_systems(
                Startup,
                (
                    // Config first so every other startup system sees the final values.
                    config::load_scene_config,
                    catalog::validate_catalog,
                    graphics::setup_camera,
                )
                    .chain(),
            );
    }
}
