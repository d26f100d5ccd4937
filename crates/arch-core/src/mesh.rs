//! Tessellation of the three primitive shapes the scene is made of.
//!
//! Output is plain indexed triangle data with `bytemuck`-compatible vertices
//! so a renderer can upload it directly.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    fn push(&mut self, position: Vec3, normal: Vec3) {
        self.vertices.push(MeshVertex {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        });
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    // Stitch a (rows x cols) grid of vertices laid out row-major with cols+1 per row.
    fn stitch_grid(&mut self, base: u32, rows: u32, cols: u32) {
        let stride = cols + 1;
        for r in 0..rows {
            for c in 0..cols {
                let a = base + r * stride + c;
                let b = a + stride;
                self.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
    }
}

/// Capsule along +Y: a cylinder of `length` capped by two hemispheres of `radius`.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> MeshData {
    let cap_segments = cap_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let half = length * 0.5;
    let mut mesh = MeshData::default();

    // Rings run from the top pole to the bottom pole; the two equator rings bound the cylinder.
    let mut rings = 0u32;
    for (center_y, phi_start) in [(half, 0.0_f32), (-half, FRAC_PI_2)] {
        for s in 0..=cap_segments {
            let phi = phi_start + (s as f32 / cap_segments as f32) * FRAC_PI_2;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for k in 0..=radial_segments {
                let theta = (k as f32 / radial_segments as f32) * TAU;
                let (sin_t, cos_t) = theta.sin_cos();
                let normal = Vec3::new(sin_phi * sin_t, cos_phi, sin_phi * cos_t);
                let position = Vec3::new(0.0, center_y, 0.0) + normal * radius;
                mesh.push(position, normal);
            }
            rings += 1;
        }
    }
    mesh.stitch_grid(0, rings - 1, radial_segments);
    mesh
}

/// Torus segment lying in the local XY plane, sweeping `arc` radians from +X.
pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    arc: f32,
) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(1);
    let mut mesh = MeshData::default();

    for j in 0..=radial_segments {
        let v = (j as f32 / radial_segments as f32) * TAU;
        let (sin_v, cos_v) = v.sin_cos();
        for i in 0..=tubular_segments {
            let u = (i as f32 / tubular_segments as f32) * arc;
            let (sin_u, cos_u) = u.sin_cos();
            let position = Vec3::new(
                (radius + tube * cos_v) * cos_u,
                (radius + tube * cos_v) * sin_u,
                tube * sin_v,
            );
            let center = Vec3::new(radius * cos_u, radius * sin_u, 0.0);
            mesh.push(position, position - center);
        }
    }
    mesh.stitch_grid(0, radial_segments, tubular_segments);
    mesh
}

/// Unit quad in the XZ plane facing +Y, centered on the origin.
pub fn ground_plane() -> MeshData {
    let mut mesh = MeshData::default();
    for (x, z) in [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)] {
        mesh.push(Vec3::new(x, 0.0, z), Vec3::Y);
    }
    mesh.indices.extend_from_slice(&[0, 2, 1, 1, 2, 3]);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn capsule_spans_length_plus_caps() {
        let mesh = capsule(0.3, 0.4, 4, 8);
        assert_eq!(mesh.vertices.len(), 2 * 5 * 9);
        let (min_y, max_y) = mesh
            .vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| {
                (lo.min(v.position[1]), hi.max(v.position[1]))
            });
        assert!((max_y - 0.5).abs() < 1e-5);
        assert!((min_y + 0.5).abs() < 1e-5);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn half_torus_stays_on_one_side() {
        let mesh = torus(4.0, 0.25, 16, 32, PI);
        assert_eq!(mesh.vertices.len(), 17 * 33);
        assert_eq!(mesh.triangle_count(), 16 * 32 * 2);
        for v in &mesh.vertices {
            assert!(v.position[1] >= -1e-4, "vertex below arc start: {:?}", v.position);
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ground_plane_faces_up() {
        let mesh = ground_plane();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }
}
