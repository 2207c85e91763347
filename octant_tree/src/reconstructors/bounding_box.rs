// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding box reconstructor.

use glam::Vec3;

use crate::mesh::Mesh;
use crate::reconstructor::Reconstructor;

/// Emits the closed axis-aligned box around a leaf's points.
///
/// The box has 6 faces split into 12 outward-facing triangles. A single point
/// (or coplanar points) yields a degenerate but still closed box; no points
/// yield an empty mesh.
#[derive(Clone, Debug, Default)]
pub struct BoundingBox {
    bounds: Option<(Vec3, Vec3)>,
    mesh: Mesh,
}

impl BoundingBox {
    /// Min/max corners of the last point buffer, if it was non-empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.bounds
    }
}

impl Reconstructor for BoundingBox {
    fn set_points(&mut self, points: &[Vec3]) {
        self.bounds = points.iter().fold(None, |acc, &p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        });
    }

    fn reconstruct(&mut self) {
        self.mesh.clear();
        let Some((lo, hi)) = self.bounds else {
            return;
        };
        let corner = |x: bool, y: bool, z: bool| {
            Vec3::new(
                if x { hi.x } else { lo.x },
                if y { hi.y } else { lo.y },
                if z { hi.z } else { lo.z },
            )
        };
        // -X, +X
        self.mesh.push_quad(
            corner(false, false, false),
            corner(false, false, true),
            corner(false, true, true),
            corner(false, true, false),
        );
        self.mesh.push_quad(
            corner(true, false, false),
            corner(true, true, false),
            corner(true, true, true),
            corner(true, false, true),
        );
        // -Y, +Y
        self.mesh.push_quad(
            corner(false, false, false),
            corner(true, false, false),
            corner(true, false, true),
            corner(false, false, true),
        );
        self.mesh.push_quad(
            corner(false, true, false),
            corner(false, true, true),
            corner(true, true, true),
            corner(true, true, false),
        );
        // -Z, +Z
        self.mesh.push_quad(
            corner(false, false, false),
            corner(false, true, false),
            corner(true, true, false),
            corner(true, false, false),
        );
        self.mesh.push_quad(
            corner(false, false, true),
            corner(true, false, true),
            corner(true, true, true),
            corner(false, true, true),
        );
    }

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}
