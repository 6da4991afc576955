use crate::config::SceneConfig;
use crate::flight::FlightCamera;
use bevy::prelude::*;

/// Spawn the single 3D scene camera at the configured start position with
/// the default heading (looking down -Z).
///
/// The flight controller is not part of the spawn; the interaction systems
/// mount it on the [`FlightCamera`] once nothing is selected.
pub fn setup_camera(mut commands: Commands, config: Res<SceneConfig>) {
    let start = Vec3::from_array(config.camera_start);
    commands.spawn((
        Camera3d::default(),
        FlightCamera,
        Name::new("Flight camera"),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera_fov_degrees.to_radians(),
            far: (config.starfield_radius + config.starfield_depth) * 4.0,
            ..default()
        }),
        Transform::from_translation(start),
    ));
    info!("[setup] Camera spawned at {start}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn camera_starts_level_at_configured_position() {
        let mut world = World::new();
        world.insert_resource(SceneConfig::default());
        world
            .run_system_once(setup_camera)
            .expect("setup_camera runs");

        let mut cameras = world.query_filtered::<&Transform, With<FlightCamera>>();
        let transform = cameras.single(&world).expect("one flight camera");
        assert_eq!(
            transform.translation,
            Vec3::from_array(SceneConfig::default().camera_start)
        );
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert!((transform.forward().as_vec3() - Vec3::NEG_Z).length() < 1e-6);
    }
}
