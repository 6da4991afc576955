//! Headless overlay tests: info panel and crosshair follow the interaction
//! mode.

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use solar_explorer::catalog::Catalog;
use solar_explorer::config::SceneConfig;
use solar_explorer::flight::{FlightCamera, FlightPlugin};
use solar_explorer::interaction::{BodyClicked, CloseInfoRequested, InteractionPlugin};
use solar_explorer::loading::AppPhase;
use solar_explorer::overlay::{ControlsLegend, Crosshair, InfoPanelRoot, OverlayPlugin};
use solar_explorer::pointer_lock::PointerLockChanged;

fn app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin));
    app.insert_state(AppPhase::Running);
    app.init_resource::<SceneConfig>();
    app.init_resource::<Catalog>();
    app.add_plugins((InteractionPlugin, FlightPlugin, OverlayPlugin));
    app.world_mut().spawn((FlightCamera, Transform::default()));
    app.update();
    app
}

fn panels(app: &mut App) -> Vec<&'static str> {
    app.world_mut()
        .query::<&InfoPanelRoot>()
        .iter(app.world())
        .map(|p| p.id)
        .collect()
}

fn crosshair_visible(app: &mut App) -> bool {
    app.world_mut()
        .query_filtered::<&Visibility, With<Crosshair>>()
        .iter(app.world())
        .any(|v| *v != Visibility::Hidden)
}

#[test]
fn legend_is_always_present() {
    let mut app = app();
    let legends = app
        .world_mut()
        .query_filtered::<(), With<ControlsLegend>>()
        .iter(app.world())
        .count();
    assert_eq!(legends, 1);
}

#[test]
fn crosshair_only_while_flying() {
    let mut app = app();
    assert!(!crosshair_visible(&mut app), "idle must hide the crosshair");

    app.world_mut().write_message(PointerLockChanged { locked: true });
    app.update();
    assert!(crosshair_visible(&mut app));

    app.world_mut().write_message(BodyClicked { id: "saturn" });
    app.update();
    assert!(!crosshair_visible(&mut app), "inspecting must hide the crosshair");
}

#[test]
fn info_panel_tracks_selection() {
    let mut app = app();
    assert!(panels(&mut app).is_empty());

    app.world_mut().write_message(PointerLockChanged { locked: true });
    app.update();
    app.world_mut().write_message(BodyClicked { id: "earth" });
    app.update();
    assert_eq!(panels(&mut app), vec!["earth"]);

    // Stays a single panel across frames.
    app.update();
    assert_eq!(panels(&mut app), vec!["earth"]);

    app.world_mut().write_message(CloseInfoRequested);
    app.update();
    assert!(panels(&mut app).is_empty());
}

#[test]
fn info_card_scrolls_instead_of_overflowing_the_window() {
    let mut app = app();
    app.world_mut().write_message(PointerLockChanged { locked: true });
    app.update();
    app.world_mut().write_message(BodyClicked { id: "jupiter" });
    app.update();

    let world = app.world_mut();
    let roots: Vec<Entity> = world
        .query_filtered::<Entity, With<InfoPanelRoot>>()
        .iter(world)
        .collect();
    assert_eq!(roots.len(), 1);

    let cards: Vec<Node> = world
        .query::<(&Node, &ChildOf)>()
        .iter(world)
        .filter(|(_, parent)| parent.parent() == roots[0])
        .map(|(node, _)| node.clone())
        .collect();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].max_height, Val::Percent(90.0));
    assert_eq!(cards[0].overflow, Overflow::scroll_y());
}
