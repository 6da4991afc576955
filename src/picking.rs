//! Pointer hit-testing against body spheres.
//!
//! While the pointer is locked the pointer *is* the crosshair at the viewport
//! centre; otherwise it is the OS cursor.  Each frame the nearest body sphere
//! along that ray becomes the [`PointerTarget`].  Only the nearest hit counts,
//! so a body in front hides any body behind it on the same ray: hover and
//! click never reach the occluded one.

use crate::body::{BodyHover, BodySurface};
use crate::flight::FlightCamera;
use crate::interaction::{BodyClicked, InteractionState};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Body under the pointer this frame, if any.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTarget {
    pub entity: Option<Entity>,
    pub id: Option<&'static str>,
}

/// Distance along a normalised ray to the first intersection with a sphere.
///
/// Returns `None` for misses and for spheres entirely behind the origin.  An
/// origin inside the sphere reports the exit point.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Nearest candidate sphere hit by the ray.
pub fn nearest_hit<T, I>(origin: Vec3, direction: Vec3, candidates: I) -> Option<(T, f32)>
where
    I: IntoIterator<Item = (T, Vec3, f32)>,
{
    candidates
        .into_iter()
        .filter_map(|(key, center, radius)| {
            ray_sphere_distance(origin, direction, center, radius).map(|d| (key, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Cast the pointer ray and record the nearest body.
pub fn pointer_target_system(
    state: Res<InteractionState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<FlightCamera>>,
    surfaces: Query<(Entity, &BodySurface, &GlobalTransform)>,
    mut target: ResMut<PointerTarget>,
) {
    let hit = (|| {
        let (camera, camera_transform) = cameras.single().ok()?;
        let screen = if state.pointer_locked() {
            camera.logical_viewport_size()? / 2.0
        } else {
            windows.single().ok()?.cursor_position()?
        };
        let ray = camera.viewport_to_world(camera_transform, screen).ok()?;
        nearest_hit(
            ray.origin,
            *ray.direction,
            surfaces
                .iter()
                .map(|(e, s, t)| ((e, s.id), t.translation(), s.radius)),
        )
    })();

    let next = match hit {
        Some(((entity, id), _)) => PointerTarget {
            entity: Some(entity),
            id: Some(id),
        },
        None => PointerTarget::default(),
    };
    if *target != next {
        *target = next;
    }
}

/// Emit pointer over/out edges from target changes.
pub fn hover_system(
    state: Res<InteractionState>,
    target: Res<PointerTarget>,
    mut hovers: Query<(Entity, &mut BodyHover)>,
) {
    let locked = state.pointer_locked();
    for (entity, mut hover) in hovers.iter_mut() {
        let under = target.entity == Some(entity);
        if under && !hover.is_inside() {
            hover.pointer_over(locked);
        } else if !under && hover.is_inside() {
            hover.pointer_out();
        }
    }
}

/// A left click while locked selects the body under the crosshair.  One
/// message per click, for the nearest body only.
pub fn body_click_system(
    mouse: Res<ButtonInput<MouseButton>>,
    state: Res<InteractionState>,
    target: Res<PointerTarget>,
    mut clicks: MessageWriter<BodyClicked>,
) {
    if !state.pointer_locked() || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if let Some(id) = target.id {
        clicks.write(BodyClicked { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_front_face() {
        let d = ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 2.0);
        assert_eq!(d, Some(8.0));
    }

    #[test]
    fn ray_misses_sphere_to_the_side_and_behind() {
        assert_eq!(
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(5.0, 0.0, -10.0), 2.0),
            None
        );
        assert_eq!(
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 10.0), 2.0),
            None
        );
    }

    #[test]
    fn nearer_body_occludes_the_one_behind() {
        let hit = nearest_hit(
            Vec3::ZERO,
            Vec3::NEG_Z,
            [
                ("far", Vec3::new(0.0, 0.0, -50.0), 4.0),
                ("near", Vec3::new(0.0, 0.0, -20.0), 1.0),
                ("aside", Vec3::new(30.0, 0.0, -5.0), 1.0),
            ],
        );
        assert_eq!(hit.map(|(id, _)| id), Some("near"));
    }

    #[test]
    fn hover_clears_on_pointer_out_even_when_unlocked() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(InteractionState::default());
        app.insert_resource(PointerTarget::default());
        app.add_systems(Update, hover_system);

        let mut hover = BodyHover::default();
        hover.pointer_over(true);
        let body = app.world_mut().spawn(hover).id();
        app.world_mut().resource_mut::<PointerTarget>().entity = Some(body);
        app.update();

        // Pointer moves off while unlocked.
        app.world_mut().resource_mut::<PointerTarget>().entity = None;
        app.update();

        let hover = app.world().get::<BodyHover>(body).unwrap();
        assert!(!hover.is_hovered());
    }
}
