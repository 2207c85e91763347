// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Voxel surface reconstructor.
//!
//! Points are snapped to a uniform voxel grid. Every occupied voxel face whose
//! neighbor is empty becomes a quad, giving a closed blocky surface around the
//! sample cloud. Occupancy is kept in a hash set so sparse scans stay cheap.

use alloc::vec::Vec;
use glam::{IVec3, Vec3};
use hashbrown::HashSet;

use crate::mesh::Mesh;
use crate::reconstructor::Reconstructor;

/// Voxel edge length used by [`VoxelSurface::default`], in scene units.
pub const DEFAULT_VOXEL_SIZE: f32 = 0.05;

/// Outward neighbor direction and the four unit-cube corners of that face,
/// wound counter-clockwise when seen from outside.
const FACES: [(IVec3, [Vec3; 4]); 6] = [
    (
        IVec3::NEG_X,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
    ),
    (
        IVec3::X,
        [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
    ),
    (
        IVec3::NEG_Y,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
    ),
    (
        IVec3::Y,
        [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
    ),
    (
        IVec3::NEG_Z,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ],
    ),
    (
        IVec3::Z,
        [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ],
    ),
];

/// Blocky surface around the occupied voxels of a point buffer.
#[derive(Clone, Debug)]
pub struct VoxelSurface {
    voxel_size: f32,
    occupied: HashSet<IVec3>,
    mesh: Mesh,
}

impl Default for VoxelSurface {
    fn default() -> Self {
        Self::new(DEFAULT_VOXEL_SIZE)
    }
}

impl VoxelSurface {
    /// Create a reconstructor with the given voxel edge length.
    ///
    /// `voxel_size` must be strictly positive.
    pub fn new(voxel_size: f32) -> Self {
        debug_assert!(voxel_size > 0.0, "voxel_size must be strictly positive");
        Self {
            voxel_size,
            occupied: HashSet::new(),
            mesh: Mesh::new(),
        }
    }

    /// Voxel edge length.
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Number of distinct occupied voxels in the last point buffer.
    pub fn occupied_voxels(&self) -> usize {
        self.occupied.len()
    }

    #[inline]
    fn voxel_of(&self, point: Vec3) -> IVec3 {
        // Float-to-int casts saturate, so far-away points clamp to the grid edge.
        (point / self.voxel_size).floor().as_ivec3()
    }
}

impl Reconstructor for VoxelSurface {
    fn set_points(&mut self, points: &[Vec3]) {
        self.occupied.clear();
        for &p in points.iter().filter(|p| p.is_finite()) {
            let voxel = self.voxel_of(p);
            self.occupied.insert(voxel);
        }
    }

    fn reconstruct(&mut self) {
        self.mesh.clear();

        // Hash order is not stable across runs; emit faces in grid order instead.
        let mut voxels: Vec<IVec3> = self.occupied.iter().copied().collect();
        voxels.sort_unstable_by_key(|v| v.to_array());

        for voxel in voxels {
            let base = voxel.as_vec3() * self.voxel_size;
            for &(dir, corners) in &FACES {
                if self.occupied.contains(&(voxel + dir)) {
                    continue;
                }
                let [a, b, c, d] = corners.map(|corner| base + corner * self.voxel_size);
                self.mesh.push_quad(a, b, c, d);
            }
        }
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_exported_voxel_size() {
        let exported = crate::reconstructors::DEFAULT_VOXEL_SIZE;
        assert_eq!(VoxelSurface::default().voxel_size(), exported);
    }

    #[test]
    fn single_voxel_is_a_closed_cube() {
        let mut r = VoxelSurface::new(1.0);
        r.set_points(&[Vec3::new(0.2, 0.4, 0.9), Vec3::new(0.7, 0.1, 0.3)]);
        r.reconstruct();
        assert_eq!(r.occupied_voxels(), 1);
        assert_eq!(r.mesh().triangle_count(), 12);
    }

    #[test]
    fn shared_faces_are_culled() {
        let mut r = VoxelSurface::new(1.0);
        r.set_points(&[Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.5, 0.5, 0.5)]);
        r.reconstruct();
        assert_eq!(r.occupied_voxels(), 2);
        // 12 faces minus the 2 touching each other.
        assert_eq!(r.mesh().triangle_count(), 20);
    }

    #[test]
    fn negative_coordinates_floor_into_their_own_voxel() {
        let mut r = VoxelSurface::new(1.0);
        r.set_points(&[Vec3::new(-0.5, 0.5, 0.5), Vec3::new(0.5, 0.5, 0.5)]);
        assert_eq!(r.occupied_voxels(), 2);
    }

    #[test]
    fn faces_point_outward() {
        let mut r = VoxelSurface::new(0.5);
        r.set_points(&[Vec3::splat(0.1)]);
        r.reconstruct();

        let center = Vec3::splat(0.25);
        for [a, b, c] in r.mesh().triangles() {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid - center) > 0.0,
                "inward triangle {a} {b} {c}"
            );
        }
    }

    #[test]
    fn output_is_deterministic() {
        let points = [
            Vec3::new(0.1, 0.1, 0.1),
            Vec3::new(2.1, 0.1, 0.1),
            Vec3::new(0.1, 3.1, 0.1),
            Vec3::new(0.1, 0.1, -4.1),
        ];
        let mut a = VoxelSurface::new(1.0);
        let mut b = VoxelSurface::new(1.0);
        a.set_points(&points);
        b.set_points(&points);
        a.reconstruct();
        b.reconstruct();
        assert_eq!(a.mesh(), b.mesh());
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let mut r = VoxelSurface::new(1.0);
        r.set_points(&[
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::new(f32::INFINITY, 0.0, 0.0),
        ]);
        r.reconstruct();
        assert_eq!(r.occupied_voxels(), 0);
        assert!(r.mesh().is_empty());
    }
}
