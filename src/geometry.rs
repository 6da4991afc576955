//! Hand-built meshes that Bevy's primitive builders don't cover the way the
//! scene needs them.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::f32::consts::TAU;

/// Flat annulus in the local XY plane, facing +Z.
///
/// Two vertex rings (inner, outer) of `segments + 1` vertices each; the seam
/// vertex is duplicated so UVs don't wrap.  UVs are planar, mapped from local
/// coordinates so a ring texture lines up the same way as on a disc.
pub fn annulus_mesh(inner: f32, outer: f32, segments: u32) -> Mesh {
    debug_assert!(segments >= 3, "annulus needs at least 3 segments");
    debug_assert!(outer > inner, "outer radius must exceed inner radius");

    let n = segments as usize + 1;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n * 2);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n * 2);

    for ring_radius in [inner, outer] {
        for i in 0..n {
            let theta = TAU * i as f32 / segments as f32;
            let (s, c) = theta.sin_cos();
            let (x, y) = (c * ring_radius, s * ring_radius);
            positions.push([x, y, 0.0]);
            uvs.push([(x / outer + 1.0) * 0.5, (y / outer + 1.0) * 0.5]);
        }
    }
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n * 2];

    let mut indices: Vec<u32> = Vec::with_capacity(segments as usize * 6);
    let outer_start = n as u32;
    for i in 0..segments {
        let (a, b) = (i, i + 1);
        let (c, d) = (outer_start + i, outer_start + i + 1);
        indices.extend_from_slice(&[a, c, b, b, c, d]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annulus_vertices_lie_on_both_radii() {
        let mesh = annulus_mesh(1.4, 2.4, 16);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .expect("positions");

        assert_eq!(positions.len(), 34);
        for p in positions {
            let r = Vec2::new(p[0], p[1]).length();
            assert!(
                (r - 1.4).abs() < 1e-4 || (r - 2.4).abs() < 1e-4,
                "vertex at radius {r}"
            );
            assert_eq!(p[2], 0.0);
        }
        assert_eq!(mesh.indices().map(|i| i.len()), Some(16 * 6));
    }
}
