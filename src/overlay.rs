//! Screen-space overlays: controls legend, crosshair, loading and error
//! screens, and the body information panel.
//!
//! Overlays hold no state of their own.  They are spawned and despawned from
//! [`AppPhase`] and [`InteractionState`], and user actions leave them only as
//! messages ([`CloseInfoRequested`], [`ReloadRequested`]).

use crate::catalog::CelestialBody;
use crate::interaction::{CloseInfoRequested, InteractionMode, InteractionState};
use crate::loading::{AppPhase, AssetFailure, ReloadRequested};
use crate::FrameSet;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Bottom-left key legend.  Always present.
#[derive(Component)]
pub struct ControlsLegend;

/// Centre-screen dot shown only while flying.
#[derive(Component)]
pub struct Crosshair;

/// Root of the loading placeholder; despawned on `OnExit(Loading)`.
#[derive(Component)]
pub struct LoadingScreenRoot;

/// Root of the asset failure screen; despawned on `OnExit(Failed)`.
#[derive(Component)]
pub struct ErrorScreenRoot;

/// Tags the "Reload" button on the error screen.
#[derive(Component)]
pub struct ReloadButton;

/// Root of the information panel for the body with this id.
#[derive(Component, Debug)]
pub struct InfoPanelRoot {
    pub id: &'static str,
}

/// Tags the info panel's close button.
#[derive(Component)]
pub struct InfoCloseButton;

/// Background colours for a hoverable overlay button.
#[derive(Component, Debug, Clone, Copy)]
pub struct ButtonColors {
    pub idle: Color,
    pub hovered: Color,
}

// ── Palette ───────────────────────────────────────────────────────────────────

fn accent() -> Color {
    Color::srgb(0.063, 0.357, 0.847)
}
fn muted_text() -> Color {
    Color::srgb(0.62, 0.62, 0.66)
}
fn panel_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.9)
}
fn dim_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.6)
}
fn error_text() -> Color {
    Color::srgb(0.94, 0.27, 0.27)
}
fn error_detail() -> Color {
    Color::srgb(1.0, 0.79, 0.79)
}
fn reload_bg() -> Color {
    Color::srgb(0.60, 0.11, 0.11)
}
fn reload_hover_bg() -> Color {
    Color::srgb(0.73, 0.11, 0.11)
}

fn text(value: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn full_screen(background: Color, z: i32) -> (Node, BackgroundColor, ZIndex) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
        BackgroundColor(background),
        ZIndex(z),
    )
}

// ── Controls legend ───────────────────────────────────────────────────────────

const LEGEND_LINES: [&str; 6] = [
    "[W, A, S, D] Move forward / back / sideways",
    "[Shift] Hold for boost",
    "[Space / Ctrl] Up / down",
    "[Mouse] Look around",
    "[Click] Start exploring / select",
    "[ESC] Release cursor",
];

pub fn setup_controls_legend(mut commands: Commands) {
    commands
        .spawn((
            ControlsLegend,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(32.0),
                bottom: Val::Px(32.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(16.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.1)),
            ZIndex(40),
        ))
        .with_children(|legend| {
            legend.spawn(text("NAVIGATION CONTROLS", 12.0, accent()));
            for line in LEGEND_LINES {
                legend.spawn(text(line, 12.0, Color::srgba(1.0, 1.0, 1.0, 0.7)));
            }
        });
}

// ── Crosshair ─────────────────────────────────────────────────────────────────

pub fn setup_crosshair(mut commands: Commands) {
    commands.spawn((
        Crosshair,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            width: Val::Px(6.0),
            height: Val::Px(6.0),
            margin: UiRect {
                left: Val::Px(-3.0),
                top: Val::Px(-3.0),
                ..default()
            },
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
        ZIndex(30),
        Visibility::Hidden,
    ));
}

/// Show the crosshair only while the scene is running and the user is flying.
pub fn crosshair_visibility_system(
    phase: Res<State<AppPhase>>,
    state: Res<InteractionState>,
    mut crosshairs: Query<&mut Visibility, With<Crosshair>>,
) {
    let show = *phase.get() == AppPhase::Running && state.mode() == InteractionMode::Flying;
    let want = if show {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in crosshairs.iter_mut() {
        if *visibility != want {
            *visibility = want;
        }
    }
}

// ── Loading screen ────────────────────────────────────────────────────────────

pub fn setup_loading_screen(mut commands: Commands) {
    commands
        .spawn((LoadingScreenRoot, full_screen(Color::BLACK, 50)))
        .with_children(|screen| {
            screen
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|col| {
                    col.spawn(text("LOADING SOLAR SYSTEM", 20.0, Color::WHITE));
                    col.spawn(text("Fetching planetary textures...", 12.0, muted_text()));
                });
        });
}

pub fn cleanup_loading_screen(mut commands: Commands, roots: Query<Entity, With<LoadingScreenRoot>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Error screen ──────────────────────────────────────────────────────────────

/// Full-screen recoverable failure display.
///
/// ```text
/// ┌──────────────────────────────────────────┐
/// │      ┌────────────────────────────┐      │
/// │      │   Failed to load assets    │      │
/// │      │   <failure message>        │      │
/// │      │        [ RELOAD ]          │      │
/// │      └────────────────────────────┘      │
/// └──────────────────────────────────────────┘
/// ```
pub fn setup_error_screen(mut commands: Commands, failure: Option<Res<AssetFailure>>) {
    let message = failure
        .map(|f| f.0.to_string())
        .unwrap_or_else(|| "Something went wrong while loading the 3D scene.".to_string());

    commands
        .spawn((ErrorScreenRoot, full_screen(Color::BLACK, 100)))
        .with_children(|screen| {
            screen
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(32.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(1.0)),
                        max_width: Val::Px(480.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.5, 0.11, 0.11, 0.2)),
                    BorderColor::all(Color::srgb(0.5, 0.11, 0.11)),
                ))
                .with_children(|card| {
                    card.spawn(text("Failed to load assets", 24.0, error_text()));
                    card.spawn(text(message, 14.0, error_detail()));
                    card.spawn((
                        Button,
                        ReloadButton,
                        ButtonColors {
                            idle: reload_bg(),
                            hovered: reload_hover_bg(),
                        },
                        Node {
                            padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                            ..default()
                        },
                        BackgroundColor(reload_bg()),
                    ))
                    .with_children(|btn| {
                        btn.spawn(text("RELOAD", 12.0, Color::WHITE));
                    });
                });
        });
}

pub fn cleanup_error_screen(mut commands: Commands, roots: Query<Entity, With<ErrorScreenRoot>>) {
    for entity in roots.iter() {
        commands.entity(entity).despawn();
    }
}

pub fn reload_button_system(
    buttons: Query<&Interaction, (Changed<Interaction>, With<ReloadButton>)>,
    mut reloads: MessageWriter<ReloadRequested>,
) {
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        reloads.write(ReloadRequested);
    }
}

/// Swap button backgrounds on hover.
pub fn button_hover_system(
    mut buttons: Query<(&Interaction, &ButtonColors, &mut BackgroundColor), Changed<Interaction>>,
) {
    for (interaction, colors, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => colors.hovered,
            Interaction::None => colors.idle,
        };
    }
}

// ── Information panel ─────────────────────────────────────────────────────────

/// Labelled fact rows for the panel's data column, in display order.
pub fn fact_rows(body: &CelestialBody) -> Vec<(&'static str, String)> {
    let f = &body.facts;
    vec![
        ("Diameter", f.diameter.to_string()),
        ("Distance from Sun", f.distance.to_string()),
        ("Average Temperature", f.temperature.to_string()),
        ("Mass", f.mass.to_string()),
        ("Orbital Period", f.orbit_period.to_string()),
        ("Moons", f.moons.to_string()),
        ("Atmosphere", f.atmosphere.to_string()),
        ("Exploration Missions", f.exploration_missions.to_string()),
    ]
}

fn spawn_info_panel(commands: &mut Commands, body: &CelestialBody) {
    let swatch = body.fallback_color();

    commands
        .spawn((InfoPanelRoot { id: body.id }, full_screen(dim_bg(), 150)))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Row,
                        max_width: Val::Px(900.0),
                        width: Val::Percent(90.0),
                        max_height: Val::Percent(90.0),
                        overflow: Overflow::scroll_y(),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(panel_bg()),
                    BorderColor::all(accent().with_alpha(0.5)),
                ))
                .with_children(|card| {
                    // ── Header column ─────────────────────────────────────────
                    card.spawn((
                        Node {
                            width: Val::Percent(33.0),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            padding: UiRect::all(Val::Px(32.0)),
                            row_gap: Val::Px(12.0),
                            ..default()
                        },
                        BackgroundColor(accent().with_alpha(0.2)),
                    ))
                    .with_children(|header| {
                        header.spawn((
                            Node {
                                width: Val::Px(128.0),
                                height: Val::Px(128.0),
                                ..default()
                            },
                            BackgroundColor(swatch),
                        ));
                        header.spawn(text(body.name.to_uppercase(), 32.0, Color::WHITE));
                        header.spawn(text(
                            format!("\"{}\"", body.description),
                            13.0,
                            muted_text(),
                        ));
                    });

                    // ── Data column ───────────────────────────────────────────
                    card.spawn(Node {
                        width: Val::Percent(67.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(32.0)),
                        row_gap: Val::Px(10.0),
                        ..default()
                    })
                    .with_children(|data| {
                        data.spawn((
                            Button,
                            InfoCloseButton,
                            ButtonColors {
                                idle: Color::NONE,
                                hovered: Color::srgba(1.0, 1.0, 1.0, 0.1),
                            },
                            Node {
                                align_self: AlignSelf::FlexEnd,
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                                ..default()
                            },
                            BackgroundColor(Color::NONE),
                        ))
                        .with_children(|btn| {
                            btn.spawn(text("X", 20.0, muted_text()));
                        });

                        for (label, value) in fact_rows(body) {
                            data.spawn(Node {
                                flex_direction: FlexDirection::Column,
                                padding: UiRect::bottom(Val::Px(6.0)),
                                border: UiRect::bottom(Val::Px(1.0)),
                                ..default()
                            })
                            .insert(BorderColor::all(Color::srgba(1.0, 1.0, 1.0, 0.1)))
                            .with_children(|row| {
                                row.spawn(text(label.to_uppercase(), 11.0, muted_text()));
                                row.spawn(text(value, 14.0, Color::WHITE));
                            });
                        }

                        data.spawn(text("PHYSICAL CHARACTERISTICS", 13.0, accent()));
                        data.spawn(text(
                            body.facts.physical_characteristics,
                            14.0,
                            Color::srgb(0.82, 0.84, 0.86),
                        ));

                        data.spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                padding: UiRect::all(Val::Px(14.0)),
                                border: UiRect::left(Val::Px(4.0)),
                                row_gap: Val::Px(4.0),
                                ..default()
                            },
                            BackgroundColor(accent().with_alpha(0.1)),
                            BorderColor::all(accent()),
                        ))
                        .with_children(|fun| {
                            fun.spawn(text("FUN FACT", 11.0, accent()));
                            fun.spawn(text(body.facts.fun_fact, 14.0, Color::WHITE));
                        });
                    });
                });
        });
}

/// Keep exactly one panel for the current selection, none without one.
pub fn info_panel_system(
    mut commands: Commands,
    state: Res<InteractionState>,
    panels: Query<(Entity, &InfoPanelRoot)>,
) {
    let selected = state.selected();
    let mut showing = false;
    for (entity, panel) in panels.iter() {
        if selected.is_some_and(|b| b.id == panel.id) && !showing {
            showing = true;
        } else {
            commands.entity(entity).despawn();
        }
    }
    if let (Some(body), false) = (selected, showing) {
        spawn_info_panel(&mut commands, body);
    }
}

/// Close button or Escape while inspecting asks to close the panel.
pub fn info_close_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<InteractionState>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<InfoCloseButton>)>,
    mut closes: MessageWriter<CloseInfoRequested>,
) {
    if state.mode() != InteractionMode::Inspecting {
        return;
    }
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    if clicked || keys.just_pressed(KeyCode::Escape) {
        closes.write(CloseInfoRequested);
    }
}

pub fn cleanup_info_panels(mut commands: Commands, panels: Query<Entity, With<InfoPanelRoot>>) {
    for entity in panels.iter() {
        commands.entity(entity).despawn();
    }
}

/// All screen-space overlays.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_controls_legend, setup_crosshair))
            .add_systems(OnEnter(AppPhase::Loading), setup_loading_screen)
            .add_systems(OnExit(AppPhase::Loading), cleanup_loading_screen)
            .add_systems(OnEnter(AppPhase::Failed), setup_error_screen)
            .add_systems(OnExit(AppPhase::Failed), cleanup_error_screen)
            .add_systems(OnExit(AppPhase::Running), cleanup_info_panels)
            .add_systems(
                Update,
                (
                    button_hover_system,
                    crosshair_visibility_system.after(FrameSet::Coordinate),
                    reload_button_system.run_if(in_state(AppPhase::Failed)),
                ),
            )
            .add_systems(Update, info_close_system.in_set(FrameSet::Input))
            .add_systems(Update, info_panel_system.in_set(FrameSet::Present));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::solar_system;

    #[test]
    fn fact_rows_cover_every_tabular_fact() {
        let earth = solar_system()
            .into_iter()
            .find(|b| b.id == "earth")
            .expect("earth in catalog");
        let rows = fact_rows(&earth);

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].0, "Diameter");
        let moons = rows.iter().find(|(l, _)| *l == "Moons").map(|(_, v)| v.as_str());
        assert_eq!(moons, Some("1"));
    }
}
