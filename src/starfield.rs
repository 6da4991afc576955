//! Distant procedural starfield.
//!
//! Thousands of tiny stars are baked into a single retained mesh so the whole
//! backdrop costs one draw call.  Each star is a small octahedron placed in a
//! spherical shell around the origin and tinted with a per-vertex colour.

use crate::config::SceneConfig;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::Rng;
use std::f32::consts::TAU;

/// Marker for the starfield entity.
#[derive(Component)]
pub struct Starfield;

/// Vertices and indices contributed by one star.
pub const VERTICES_PER_STAR: usize = 6;
pub const INDICES_PER_STAR: usize = 24;

/// Shell and styling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldParams {
    pub count: usize,
    pub radius: f32,
    pub depth: f32,
    pub size: f32,
    pub saturation: f32,
}

impl From<&SceneConfig> for StarfieldParams {
    fn from(config: &SceneConfig) -> Self {
        Self {
            count: config.starfield_count,
            radius: config.starfield_radius,
            depth: config.starfield_depth,
            size: config.star_size,
            saturation: config.starfield_saturation,
        }
    }
}

/// Uniform random direction on the unit sphere.
fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Build the baked starfield mesh.
pub fn starfield_mesh<R: Rng>(rng: &mut R, params: &StarfieldParams) -> Mesh {
    let n = params.count;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n * VERTICES_PER_STAR);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(n * VERTICES_PER_STAR);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n * VERTICES_PER_STAR);
    let mut indices: Vec<u32> = Vec::with_capacity(n * INDICES_PER_STAR);

    // Octahedron faces as triples of the six axis vertices below.
    const FACES: [[u32; 3]; 8] = [
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];

    for i in 0..n {
        let center = random_direction(rng) * (params.radius + rng.gen_range(0.0..=params.depth));
        let size = params.size * rng.gen_range(0.5..=1.5);
        let hue = rng.gen_range(0.0..360.0);
        let color = Color::hsl(hue, params.saturation, rng.gen_range(0.7..=1.0))
            .to_linear()
            .to_f32_array();

        let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        for axis in axes {
            positions.push((center + axis * size).to_array());
            normals.push(axis.to_array());
            colors.push(color);
        }

        let base = (i * VERTICES_PER_STAR) as u32;
        for face in FACES {
            indices.extend(face.iter().map(|v| base + v));
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Spawn the starfield as one unlit, vertex-coloured mesh.
pub fn spawn_starfield<R: Rng>(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut R,
    params: &StarfieldParams,
) -> Entity {
    let mesh = meshes.add(starfield_mesh(rng, params));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands
        .spawn((
            Starfield,
            Name::new("Starfield"),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn mesh_has_one_octahedron_per_star_inside_the_shell() {
        let params = StarfieldParams {
            count: 50,
            radius: 400.0,
            depth: 100.0,
            size: 0.6,
            saturation: 0.5,
        };
        let mesh = starfield_mesh(&mut StdRng::seed_from_u64(1), &params);

        assert_eq!(mesh.count_vertices(), 50 * VERTICES_PER_STAR);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(50 * INDICES_PER_STAR));

        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .expect("positions");
        for p in positions {
            let d = Vec3::from_array(*p).length();
            // Vertex offsets reach at most 1.5 × size from the star centre.
            assert!((400.0 - 1.0..=500.0 + 1.0).contains(&d), "star vertex at {d}");
        }
    }
}
