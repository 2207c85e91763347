// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconstructor that ignores its input.

use glam::Vec3;

use crate::mesh::Mesh;
use crate::reconstructor::Reconstructor;

/// Discards points and always yields an empty mesh.
#[derive(Clone, Debug, Default)]
pub struct Noop {
    mesh: Mesh,
}

impl Reconstructor for Noop {
    fn set_points(&mut self, _points: &[Vec3]) {}

    fn reconstruct(&mut self) {}

    fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}
