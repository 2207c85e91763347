// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle-list geometry produced by reconstructors and composed by the tree.

use alloc::vec::Vec;
use glam::Vec3;

/// A triangle soup: every three consecutive positions form one triangle.
///
/// Meshes from different leaves are composed by plain concatenation, so no
/// index buffer or vertex sharing is involved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
}

impl Mesh {
    /// Create an empty mesh.
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Wrap a flat position list. Trailing positions that do not complete a
    /// triangle are kept but ignored by [`Mesh::triangles`].
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    /// Append one triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.positions.extend_from_slice(&[a, b, c]);
    }

    /// Append a quad as two triangles `(a, b, c)` and `(a, c, d)`.
    #[inline]
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Concatenate another mesh onto this one.
    pub fn append(&mut self, other: &Self) {
        self.positions.extend_from_slice(&other.positions);
    }

    /// Remove all geometry, keeping the allocation.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Flat position list.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the mesh has no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Iterate over complete triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Consume the mesh and return its position list.
    pub fn into_positions(self) -> Vec<Vec3> {
        self.positions
    }
}

impl Extend<Vec3> for Mesh {
    fn extend<I: IntoIterator<Item = Vec3>>(&mut self, iter: I) {
        self.positions.extend(iter);
    }
}
