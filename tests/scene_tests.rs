//! Headless scene composition tests.
//!
//! Textures are replaced by default handles via `SceneTextures::placeholder`,
//! so every optional layer is present without loading any files.

use bevy::asset::AssetPlugin;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use solar_explorer::belt::{AsteroidBelt, BeltAsteroid};
use solar_explorer::body::{
    BodyLabel, BodyRoot, BodySurface, CloudShell, OrbitGuide, PlanetRing, StarGlow,
};
use solar_explorer::catalog::{Catalog, STAR_ID};
use solar_explorer::config::SceneConfig;
use solar_explorer::flight::FlightPlugin;
use solar_explorer::interaction::InteractionPlugin;
use solar_explorer::loading::{AppPhase, SceneTextures};
use solar_explorer::scene::{SceneEntity, ScenePlugin};
use solar_explorer::starfield::Starfield;

fn scene_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        InputPlugin,
        AssetPlugin::default(),
    ));
    app.init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_asset::<Image>();
    app.insert_state(AppPhase::Running);
    app.insert_resource(SceneConfig {
        starfield_count: 64,
        belt_seed: Some(11),
        ..Default::default()
    });
    app.init_resource::<Catalog>();
    let textures = SceneTextures::placeholder(&Catalog::default());
    app.insert_resource(textures);
    app.add_plugins((InteractionPlugin, FlightPlugin, ScenePlugin));
    app.update();
    app
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

#[test]
fn one_body_per_catalog_entry_with_labels() {
    let mut app = scene_app();
    assert_eq!(count::<BodyRoot>(&mut app), 9);
    assert_eq!(count::<BodySurface>(&mut app), 9);
    assert_eq!(count::<BodyLabel>(&mut app), 9);
    assert_eq!(count::<Starfield>(&mut app), 1);
}

#[test]
fn exactly_one_cloud_shell_and_one_ring() {
    let mut app = scene_app();
    assert_eq!(count::<CloudShell>(&mut app), 1);
    assert_eq!(count::<PlanetRing>(&mut app), 1);
    assert_eq!(count::<StarGlow>(&mut app), 1);
}

#[test]
fn every_planet_but_not_the_star_has_an_orbit_guide() {
    let mut app = scene_app();
    assert_eq!(count::<OrbitGuide>(&mut app), 8);

    let owners: Vec<&'static str> = {
        let world = app.world_mut();
        let parents: Vec<Entity> = world
            .query_filtered::<&ChildOf, With<OrbitGuide>>()
            .iter(world)
            .map(|c| c.parent())
            .collect();
        parents
            .into_iter()
            .filter_map(|p| world.get::<BodyRoot>(p).map(|r| r.id))
            .collect()
    };
    assert_eq!(owners.len(), 8);
    assert!(!owners.contains(&STAR_ID), "the star must not get an orbit guide");
}

#[test]
fn belt_has_2000_asteroids_and_is_not_regenerated() {
    let mut app = scene_app();
    assert_eq!(count::<BeltAsteroid>(&mut app), 2000);

    let before = app.world().resource::<AsteroidBelt>().instances.clone();
    for _ in 0..5 {
        app.update();
    }
    let after = app.world().resource::<AsteroidBelt>().instances.clone();

    assert_eq!(before, after);
    assert_eq!(count::<BeltAsteroid>(&mut app), 2000);
    for a in &after {
        assert!((80.0 - 1e-3..=95.0 + 1e-3).contains(&a.radius()));
        assert!((-4.0..=4.0).contains(&a.height()));
    }
}

#[test]
fn surfaces_keep_spinning() {
    let mut app = scene_app();
    let (earth, start) = {
        let world = app.world_mut();
        let mut q = world.query::<(Entity, &BodySurface, &Transform)>();
        q.iter(world)
            .find(|(_, s, _)| s.id == "earth")
            .map(|(e, _, t)| (e, t.rotation))
            .expect("earth surface")
    };

    app.update();

    let now = app.world().get::<Transform>(earth).map(|t| t.rotation);
    assert_ne!(now, Some(start));
}

#[test]
fn leaving_running_tears_the_scene_down() {
    let mut app = scene_app();

    app.world_mut()
        .resource_mut::<NextState<AppPhase>>()
        .set(AppPhase::Failed);
    app.update();

    assert_eq!(count::<SceneEntity>(&mut app), 0);
    assert_eq!(count::<BodySurface>(&mut app), 0);
    assert_eq!(count::<BeltAsteroid>(&mut app), 0);
    assert!(!app.world().contains_resource::<AsteroidBelt>());
}
