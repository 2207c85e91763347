// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconstructor trait: the per-leaf surface reconstruction boundary.

use glam::Vec3;

use crate::mesh::Mesh;

/// Leaf-local surface reconstruction used by [`SpatialNode`][crate::SpatialNode].
///
/// Every leaf owns exactly one reconstructor, created when the leaf is
/// materialized and kept for the lifetime of the tree. The tree decides *when*
/// reconstruction runs; the reconstructor decides *how* points become geometry.
pub trait Reconstructor {
    /// Replace the input point buffer with `points`.
    fn set_points(&mut self, points: &[Vec3]);

    /// Rebuild the mesh from the most recent point buffer.
    fn reconstruct(&mut self);

    /// Geometry produced by the last [`reconstruct`][Reconstructor::reconstruct] call.
    ///
    /// Empty before the first reconstruction.
    fn mesh(&self) -> &Mesh;
}

impl<R: Reconstructor + ?Sized> Reconstructor for alloc::boxed::Box<R> {
    fn set_points(&mut self, points: &[Vec3]) {
        (**self).set_points(points);
    }

    fn reconstruct(&mut self) {
        (**self).reconstruct();
    }

    fn mesh(&self) -> &Mesh {
        (**self).mesh()
    }
}
