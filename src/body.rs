//! Celestial body rendering: sphere, optional cloud shell, optional ring,
//! orbit guide, glow for the star, and a screen-space name label.
//!
//! ## Entity layout per body
//!
//! ```text
//! BodyRoot (translation = (distance, 0, 0))
//! ├── BodySurface + BodyHover + Spin      core sphere, hit-tested
//! ├── CloudShell + Spin                   only with a declared *and* loaded cloud texture
//! ├── StarGlow                            star only
//! ├── PlanetRing                          only when `has_rings`
//! └── OrbitGuide                          every body except the star, centred on the origin
//! BodyLabel (UI node, follows the surface on screen)
//! ```

use crate::catalog::CelestialBody;
use crate::config::SceneConfig;
use crate::constants::{
    CLOUD_OPACITY, GLOW_OPACITY, LABEL_SCALE_MAX, LABEL_SCALE_MIN, ORBIT_GUIDE_OPACITY,
    RING_SEGMENTS, SPHERE_SEGMENTS, STAR_LABEL_OPACITY,
};
use crate::flight::FlightCamera;
use crate::geometry::annulus_mesh;
use crate::interaction::InteractionState;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use std::f32::consts::FRAC_PI_2;

// ── Components ─────────────────────────────────────────────────────────────────

/// Root of one body's hierarchy.
#[derive(Component, Debug)]
pub struct BodyRoot {
    pub id: &'static str,
}

/// The core sphere.  Carries everything hit-testing needs.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodySurface {
    pub id: &'static str,
    pub radius: f32,
    pub is_star: bool,
}

/// Pointer hover state for one body.
///
/// `inside` tracks the raw pointer-over/out edge; `hovered` is the visual
/// state and only turns on when the pointer enters while locked.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyHover {
    inside: bool,
    hovered: bool,
}

impl BodyHover {
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Pointer entered the body.
    pub fn pointer_over(&mut self, locked: bool) {
        self.inside = true;
        if locked {
            self.hovered = true;
        }
    }

    /// Pointer left the body.  Always clears hover, locked or not.
    pub fn pointer_out(&mut self) {
        self.inside = false;
        self.hovered = false;
    }
}

/// Constant per-frame spin about local Y.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    /// Radians per rendered frame.
    pub rate: f32,
}

/// Transparent cloud layer around a body.
#[derive(Component)]
pub struct CloudShell;

/// Translucent halo around the star.
#[derive(Component)]
pub struct StarGlow;

/// Flat ring around a ringed planet.
#[derive(Component)]
pub struct PlanetRing;

/// Faint annulus marking a body's orbital distance.
#[derive(Component)]
pub struct OrbitGuide;

/// Screen-space label that tracks a body surface.
#[derive(Component, Debug)]
pub struct BodyLabel {
    pub target: Entity,
    pub is_star: bool,
}

/// Texture handles for one body.  A layer without a handle is not rendered
/// (clouds) or falls back to a flat tint (surface, ring).
#[derive(Debug, Clone, Default)]
pub struct BodyTextures {
    pub surface: Option<Handle<Image>>,
    pub clouds: Option<Handle<Image>>,
    pub ring: Option<Handle<Image>>,
}

/// Entities created for one body.
#[derive(Debug, Clone, Copy)]
pub struct SpawnedBody {
    pub root: Entity,
    pub surface: Entity,
    pub label: Entity,
}

// ── Materials ─────────────────────────────────────────────────────────────────

/// Emissive tint for a planet surface.  Only hovered-and-locked glows.
pub fn hover_emissive(active: bool) -> LinearRgba {
    if active {
        // #444444 at 0.2 intensity.
        let c = Color::srgb_u8(0x44, 0x44, 0x44).to_linear();
        LinearRgba::rgb(c.red * 0.2, c.green * 0.2, c.blue * 0.2)
    } else {
        LinearRgba::BLACK
    }
}

fn surface_material(body: &CelestialBody, texture: Option<Handle<Image>>) -> StandardMaterial {
    let tint = if texture.is_some() {
        Color::WHITE
    } else {
        body.fallback_color()
    };
    if body.is_star() {
        StandardMaterial {
            base_color: if texture.is_some() {
                Color::srgb_u8(0xFF, 0xDD, 0xAA)
            } else {
                tint
            },
            base_color_texture: texture,
            unlit: true,
            ..default()
        }
    } else {
        StandardMaterial {
            base_color: tint,
            base_color_texture: texture,
            perceptual_roughness: 0.8,
            metallic: 0.1,
            emissive: hover_emissive(false),
            ..default()
        }
    }
}

fn cloud_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, CLOUD_OPACITY),
        base_color_texture: Some(texture),
        alpha_mode: AlphaMode::Add,
        ..default()
    }
}

fn glow_material(body: &CelestialBody) -> StandardMaterial {
    StandardMaterial {
        base_color: body.fallback_color().with_alpha(GLOW_OPACITY),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        // Inner faces only, so the halo reads as a shell around the star.
        cull_mode: Some(Face::Front),
        ..default()
    }
}

fn ring_material(texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba_u8(0xCB, 0xB3, 0x88, 204),
        base_color_texture: texture,
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.8,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn orbit_guide_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, ORBIT_GUIDE_OPACITY),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Spawn one body and its label.
pub fn spawn_celestial_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    body: &CelestialBody,
    textures: &BodyTextures,
    config: &SceneConfig,
) -> SpawnedBody {
    let is_star = body.is_star();
    let radius = body.radius;

    let sphere = meshes.add(
        Sphere::new(radius)
            .mesh()
            .uv(SPHERE_SEGMENTS, SPHERE_SEGMENTS),
    );
    let surface_mat = materials.add(surface_material(body, textures.surface.clone()));

    let root = commands
        .spawn((
            BodyRoot { id: body.id },
            Name::new(body.name),
            Transform::from_xyz(body.distance, 0.0, 0.0),
            Visibility::default(),
        ))
        .id();

    let surface = commands
        .spawn((
            BodySurface {
                id: body.id,
                radius,
                is_star,
            },
            BodyHover::default(),
            Spin {
                rate: body.rotation_speed,
            },
            Mesh3d(sphere.clone()),
            MeshMaterial3d(surface_mat),
            Transform::default(),
            ChildOf(root),
        ))
        .id();

    if let (Some(_), Some(texture)) = (body.cloud_texture, textures.clouds.clone()) {
        let shell = meshes.add(
            Sphere::new(radius + config.cloud_radius_offset)
                .mesh()
                .uv(SPHERE_SEGMENTS, SPHERE_SEGMENTS),
        );
        commands.spawn((
            CloudShell,
            Spin {
                rate: body.rotation_speed * config.cloud_spin_factor,
            },
            Mesh3d(shell),
            MeshMaterial3d(materials.add(cloud_material(texture))),
            Transform::default(),
            ChildOf(root),
        ));
    }

    if is_star {
        commands.spawn((
            StarGlow,
            Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(glow_material(body))),
            Transform::from_scale(Vec3::splat(config.glow_scale)),
            ChildOf(root),
        ));
    }

    if body.has_rings {
        let ring = annulus_mesh(
            radius * config.ring_inner_factor,
            radius * config.ring_outer_factor,
            RING_SEGMENTS,
        );
        commands.spawn((
            PlanetRing,
            Mesh3d(meshes.add(ring)),
            MeshMaterial3d(materials.add(ring_material(textures.ring.clone()))),
            Transform::from_rotation(Quat::from_rotation_x(-config.ring_tilt)),
            ChildOf(root),
        ));
    }

    if !is_star {
        let d = body.distance;
        let w = config.orbit_guide_half_width;
        let guide = annulus_mesh((d - w).max(0.0), d + w, RING_SEGMENTS);
        commands.spawn((
            OrbitGuide,
            Mesh3d(meshes.add(guide)),
            MeshMaterial3d(materials.add(orbit_guide_material())),
            // Undo the root offset so the guide is centred on the origin.
            Transform::from_xyz(-d, 0.0, 0.0).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ChildOf(root),
        ));
    }

    let label = commands
        .spawn((
            BodyLabel {
                target: surface,
                is_star,
            },
            Text::new(body.name),
            TextFont {
                font_size: config.label_font_size,
                ..default()
            },
            TextColor(label_text_color(false, is_star)),
            BackgroundColor(label_background(false, is_star)),
            Node {
                position_type: PositionType::Absolute,
                padding: UiRect::axes(Val::Px(10.0), Val::Px(3.0)),
                ..default()
            },
            Visibility::Hidden,
        ))
        .id();

    SpawnedBody {
        root,
        surface,
        label,
    }
}

// ── Label styling ─────────────────────────────────────────────────────────────

fn star_alpha(is_star: bool) -> f32 {
    if is_star {
        STAR_LABEL_OPACITY
    } else {
        1.0
    }
}

fn label_text_color(highlighted: bool, is_star: bool) -> Color {
    let alpha = if highlighted { 1.0 } else { 0.7 };
    Color::srgba(1.0, 1.0, 1.0, alpha * star_alpha(is_star))
}

fn label_background(highlighted: bool, is_star: bool) -> Color {
    if highlighted {
        Color::srgba(0.063, 0.357, 0.847, 0.8 * star_alpha(is_star))
    } else {
        Color::srgba(0.0, 0.0, 0.0, 0.4 * star_alpha(is_star))
    }
}

/// Screen-size multiplier for a label seen from `distance`.
pub fn label_scale(distance: f32, distance_factor: f32) -> f32 {
    (distance_factor / distance.max(f32::EPSILON)).clamp(LABEL_SCALE_MIN, LABEL_SCALE_MAX)
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Advance every spinning mesh by its per-frame rate.  Runs regardless of
/// lock or selection.
pub fn spin_system(mut spinning: Query<(&mut Transform, &Spin)>) {
    for (mut transform, spin) in spinning.iter_mut() {
        transform.rotate_y(spin.rate);
    }
}

/// Brighten a planet's emissive tint while it is hovered and the pointer is
/// locked.  The star's unlit material is left alone.
pub fn hover_visuals_system(
    state: Res<InteractionState>,
    surfaces: Query<(&BodySurface, &BodyHover, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let locked = state.pointer_locked();
    for (surface, hover, material) in surfaces.iter() {
        if surface.is_star {
            continue;
        }
        let want = hover_emissive(hover.is_hovered() && locked);
        if materials.get(&material.0).is_some_and(|m| m.emissive == want) {
            continue;
        }
        if let Some(m) = materials.get_mut(&material.0) {
            m.emissive = want;
        }
    }
}

/// Keep each label over its body, scaled by distance and styled by hover.
#[allow(clippy::type_complexity)]
pub fn label_follow_system(
    config: Res<SceneConfig>,
    state: Res<InteractionState>,
    cameras: Query<(&Camera, &GlobalTransform), With<FlightCamera>>,
    surfaces: Query<(&GlobalTransform, &BodyHover)>,
    mut labels: Query<(
        &BodyLabel,
        &ComputedNode,
        &mut Node,
        &mut Visibility,
        &mut TextFont,
        &mut TextColor,
        &mut BackgroundColor,
    )>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let eye = camera_transform.translation();

    for (label, computed, mut node, mut visibility, mut font, mut color, mut background) in
        labels.iter_mut()
    {
        let Ok((target, hover)) = surfaces.get(label.target) else {
            continue;
        };
        let world = target.translation();
        let Ok(screen) = camera.world_to_viewport(camera_transform, world) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let size = computed.size() * computed.inverse_scale_factor();
        node.left = Val::Px(screen.x - size.x / 2.0);
        node.top = Val::Px(screen.y - size.y / 2.0);
        *visibility = Visibility::Inherited;

        let font_size =
            config.label_font_size * label_scale(eye.distance(world), config.label_distance_factor);
        if (font.font_size - font_size).abs() > 0.1 {
            font.font_size = font_size;
        }

        let highlighted = hover.is_hovered() && state.pointer_locked();
        let want_color = label_text_color(highlighted, label.is_star);
        if color.0 != want_color {
            color.0 = want_color;
            background.0 = label_background(highlighted, label.is_star);
        }
    }
}

/// Pointer-style cursor while a body is hovered and locked, default otherwise.
pub fn cursor_style_system(
    mut commands: Commands,
    mut pointing: Local<bool>,
    state: Res<InteractionState>,
    hovers: Query<&BodyHover>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    let want = state.pointer_locked() && hovers.iter().any(|h| h.is_hovered());
    if want == *pointing {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    *pointing = want;
    let icon = if want {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window).insert(CursorIcon::from(icon));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_out_always_clears_hover() {
        let mut hover = BodyHover::default();
        hover.pointer_over(true);
        assert!(hover.is_hovered());

        hover.pointer_out();
        assert!(!hover.is_hovered());
        assert!(!hover.is_inside());
    }

    #[test]
    fn entering_while_unlocked_does_not_highlight() {
        let mut hover = BodyHover::default();
        hover.pointer_over(false);
        assert!(hover.is_inside());
        assert!(!hover.is_hovered());

        hover.pointer_out();
        assert_eq!(hover, BodyHover::default());
    }

    #[test]
    fn emissive_is_black_unless_active() {
        assert_eq!(hover_emissive(false), LinearRgba::BLACK);
        let lit = hover_emissive(true);
        assert!(lit.red > 0.0 && lit.red < 0.1);
    }

    #[test]
    fn label_scale_shrinks_with_distance_and_clamps() {
        assert_eq!(label_scale(20.0, 20.0), 1.0);
        assert!(label_scale(40.0, 20.0) < 1.0);
        assert_eq!(label_scale(1e6, 20.0), LABEL_SCALE_MIN);
        assert_eq!(label_scale(0.0, 20.0), LABEL_SCALE_MAX);
    }

    #[test]
    fn spin_advances_once_per_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, spin_system);
        let e = app
            .world_mut()
            .spawn((Transform::default(), Spin { rate: 0.01 }))
            .id();

        for _ in 0..3 {
            app.update();
        }

        let rotation = app.world().get::<Transform>(e).unwrap().rotation;
        let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
        assert!((yaw - 0.03).abs() < 1e-5, "expected 0.03 rad, got {yaw}");
    }
}
