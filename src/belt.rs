//! Procedural asteroid belt.
//!
//! The belt is generated once when the scene is composed and stored in the
//! [`AsteroidBelt`] resource; per-frame systems never touch it.  Every
//! instance shares one mesh and one material, so Bevy batches all of them
//! into a single instanced draw.

use crate::config::SceneConfig;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Sampling ranges for belt generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltParams {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub half_height: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl From<&SceneConfig> for BeltParams {
    fn from(config: &SceneConfig) -> Self {
        Self {
            count: config.asteroid_count,
            inner_radius: config.belt_inner_radius,
            outer_radius: config.belt_outer_radius,
            half_height: config.belt_half_height,
            scale_min: config.asteroid_scale_min,
            scale_max: config.asteroid_scale_max,
        }
    }
}

/// One baked asteroid transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidInstance {
    pub transform: Transform,
}

impl AsteroidInstance {
    /// Distance from the belt axis on the orbital plane.
    pub fn radius(&self) -> f32 {
        self.transform.translation.xz().length()
    }

    /// Offset above or below the orbital plane.
    pub fn height(&self) -> f32 {
        self.transform.translation.y
    }
}

/// The generated belt.  Inserted when the scene mounts, removed when it
/// unmounts.
#[derive(Resource, Debug, Clone)]
pub struct AsteroidBelt {
    pub instances: Vec<AsteroidInstance>,
}

/// Marker for the belt's parent entity.
#[derive(Component)]
pub struct AsteroidBeltRoot;

/// Marker for a single rendered asteroid.
#[derive(Component)]
pub struct BeltAsteroid;

/// Uniformly distributed random orientation (Shoemake's method).
pub fn random_rotation<R: Rng>(rng: &mut R) -> Quat {
    let u1: f32 = rng.gen_range(0.0..1.0);
    let u2: f32 = rng.gen_range(0.0..TAU);
    let u3: f32 = rng.gen_range(0.0..TAU);
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quat::from_xyzw(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos()).normalize()
}

/// Sample `params.count` asteroid transforms.
///
/// Each instance gets an angle in `[0, 2π)`, a radius in
/// `[inner_radius, outer_radius]`, a height in `[-half_height, half_height]`,
/// a uniformly random orientation and a uniform scale in
/// `[scale_min, scale_max]`.
pub fn generate_belt<R: Rng>(rng: &mut R, params: &BeltParams) -> Vec<AsteroidInstance> {
    (0..params.count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let radius = rng.gen_range(params.inner_radius..=params.outer_radius);
            let height = rng.gen_range(-params.half_height..=params.half_height);
            let rotation = random_rotation(rng);
            let scale = rng.gen_range(params.scale_min..=params.scale_max);

            AsteroidInstance {
                transform: Transform {
                    translation: Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
                    rotation,
                    scale: Vec3::splat(scale),
                },
            }
        })
        .collect()
}

/// Generate a belt from config, honouring `belt_seed` when set.
pub fn belt_from_config(config: &SceneConfig) -> AsteroidBelt {
    let params = BeltParams::from(config);
    let instances = match config.belt_seed {
        Some(seed) => generate_belt(&mut StdRng::seed_from_u64(seed), &params),
        None => generate_belt(&mut rand::thread_rng(), &params),
    };
    AsteroidBelt { instances }
}

/// Shared low-poly rock mesh: a flat-shaded icosahedron.
pub fn asteroid_mesh(radius: f32) -> Mesh {
    match Sphere::new(radius).mesh().ico(0) {
        Ok(mesh) => mesh.with_duplicated_vertices().with_computed_flat_normals(),
        // ico(0) never exceeds the subdivision limit; uv sphere as a fallback.
        Err(_) => Sphere::new(radius).mesh().uv(6, 4),
    }
}

/// Spawn the belt under a single parent.  Returns the parent entity.
pub fn spawn_belt(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    belt: &AsteroidBelt,
    base_radius: f32,
) -> Entity {
    let mesh = meshes.add(asteroid_mesh(base_radius));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x88, 0x88, 0x88),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands
        .spawn((
            AsteroidBeltRoot,
            Name::new("Asteroid belt"),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for instance in &belt.instances {
                parent.spawn((
                    BeltAsteroid,
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    instance.transform,
                ));
            }
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BeltParams {
        BeltParams::from(&SceneConfig::default())
    }

    #[test]
    fn default_belt_has_2000_instances_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let belt = generate_belt(&mut rng, &params());

        assert_eq!(belt.len(), 2000);
        for a in &belt {
            let r = a.radius();
            assert!((80.0 - 1e-3..=95.0 + 1e-3).contains(&r), "radius {r} out of range");
            assert!((-4.0..=4.0).contains(&a.height()), "height {} out of range", a.height());
            let s = a.transform.scale;
            assert!(s.x == s.y && s.y == s.z, "scale must be uniform, got {s:?}");
            assert!((0.2..=1.0).contains(&s.x), "scale {} out of range", s.x);
            assert!(a.transform.rotation.is_normalized());
        }
    }

    #[test]
    fn same_seed_same_belt() {
        let a = generate_belt(&mut StdRng::seed_from_u64(9), &params());
        let b = generate_belt(&mut StdRng::seed_from_u64(9), &params());
        assert_eq!(a, b);
    }

    #[test]
    fn angles_cover_the_full_circle() {
        let belt = generate_belt(&mut StdRng::seed_from_u64(3), &params());
        let mut quadrants = [0usize; 4];
        for a in &belt {
            let p = a.transform.translation;
            let q = match (p.x >= 0.0, p.z >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[q] += 1;
        }
        assert!(quadrants.iter().all(|&n| n > 300), "lopsided belt: {quadrants:?}");
    }
}
