//! Scene composition: lights, starfield, asteroid belt and one body per
//! catalog entry.
//!
//! Composition happens once on `OnEnter(AppPhase::Running)` and is torn down
//! on `OnExit`.  Nothing here runs per frame except the animation and
//! presentation systems registered by [`ScenePlugin`].

use crate::belt::{belt_from_config, spawn_belt, AsteroidBelt};
use crate::body::{
    cursor_style_system, hover_visuals_system, label_follow_system, spawn_celestial_body,
    spin_system,
};
use crate::catalog::Catalog;
use crate::config::SceneConfig;
use crate::loading::{AppPhase, SceneTextures};
use crate::starfield::{spawn_starfield, StarfieldParams};
use crate::FrameSet;
use bevy::prelude::*;

/// Tags every top-level entity owned by the composed scene.
#[derive(Component)]
pub struct SceneEntity;

/// Build the whole scene.
///
/// The belt is generated only if no [`AsteroidBelt`] resource exists yet, so
/// re-running composition with unchanged inputs reuses the same layout.
pub fn compose_scene_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
    catalog: Res<Catalog>,
    textures: Option<Res<SceneTextures>>,
    belt: Option<Res<AsteroidBelt>>,
) {
    // ── Lights ────────────────────────────────────────────────────────────────
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: config.ambient_brightness,
        ..default()
    });
    commands.spawn((
        SceneEntity,
        Name::new("Star light"),
        PointLight {
            intensity: config.star_light_intensity,
            range: config.star_light_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));

    // ── Backdrop ──────────────────────────────────────────────────────────────
    let starfield = spawn_starfield(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut rand::thread_rng(),
        &StarfieldParams::from(&*config),
    );
    commands.entity(starfield).insert(SceneEntity);

    // ── Asteroid belt ─────────────────────────────────────────────────────────
    let belt = match belt {
        Some(existing) => AsteroidBelt::clone(&existing),
        None => {
            let generated = belt_from_config(&config);
            commands.insert_resource(generated.clone());
            generated
        }
    };
    let belt_root = spawn_belt(
        &mut commands,
        &mut meshes,
        &mut materials,
        &belt,
        config.asteroid_base_radius,
    );
    commands.entity(belt_root).insert(SceneEntity);

    // ── Bodies ────────────────────────────────────────────────────────────────
    for body in catalog.iter() {
        let body_textures = textures
            .as_deref()
            .map(|t| t.for_body(body.id))
            .unwrap_or_default();
        let spawned = spawn_celestial_body(
            &mut commands,
            &mut meshes,
            &mut materials,
            body,
            &body_textures,
            &config,
        );
        commands.entity(spawned.root).insert(SceneEntity);
        commands.entity(spawned.label).insert(SceneEntity);
    }

    info!(
        "[setup] Scene composed: {} bodies, {} asteroids, {} stars",
        catalog.len(),
        belt.instances.len(),
        config.starfield_count
    );
}

/// Despawn everything the scene owns and forget the belt.
pub fn teardown_scene_system(mut commands: Commands, entities: Query<Entity, With<SceneEntity>>) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<AsteroidBelt>();
    debug!("[setup] Scene torn down");
}

/// Scene composition and per-frame presentation of bodies.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppPhase::Running), compose_scene_system)
            .add_systems(OnExit(AppPhase::Running), teardown_scene_system)
            .add_systems(Update, spin_system.in_set(FrameSet::Motion))
            .add_systems(
                Update,
                (hover_visuals_system, label_follow_system, cursor_style_system)
                    .in_set(FrameSet::Present),
            );
    }
}
