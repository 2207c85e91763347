// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree configuration: root region, subdivision depth, and bounds handling.

use glam::Vec3;

use crate::error::{OctreeError, Result};
use crate::types::Cube;

/// Deepest subdivision a [`TreeConfig`] accepts.
pub const MAX_DEPTH: u32 = 21;

/// What [`ReconstructionTree::insert`][crate::ReconstructionTree::insert]
/// does with points outside the root cube.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Fail with [`OctreeError::OutOfBounds`] and leave the tree untouched.
    #[default]
    Reject,
    /// Route the point anyway. It ends up in the leaf its per-axis comparisons
    /// select, even though that leaf's cube does not contain it.
    Accept,
}

/// Root region and shape of a [`ReconstructionTree`][crate::ReconstructionTree].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Minimum corner of the root cube.
    pub origin: Vec3,
    /// Edge length of the root cube.
    pub range: f32,
    /// Number of subdivision levels; leaves have edge `range / 2^depth`.
    pub depth: u32,
    /// Handling of points outside the root cube.
    pub bounds: BoundsPolicy,
}

impl Default for TreeConfig {
    /// An 8-unit cube centered on the origin, split down to half-unit leaves.
    fn default() -> Self {
        Self::centered(Vec3::ZERO, 8.0, 4)
    }
}

impl TreeConfig {
    /// Root cube with minimum corner `origin`.
    pub const fn new(origin: Vec3, range: f32, depth: u32) -> Self {
        Self {
            origin,
            range,
            depth,
            bounds: BoundsPolicy::Reject,
        }
    }

    /// Root cube centered on `center`.
    pub fn centered(center: Vec3, range: f32, depth: u32) -> Self {
        Self::new(center - Vec3::splat(range / 2.0), range, depth)
    }

    /// Set the bounds policy.
    pub const fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the subdivision depth.
    pub const fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// The root cube.
    pub fn cube(&self) -> Cube {
        Cube::new(self.origin, self.range)
    }

    /// Edge length of a leaf.
    pub fn leaf_range(&self) -> f32 {
        // depth <= MAX_DEPTH after validation, so the exponent fits.
        self.range / (1_u32 << self.depth.min(MAX_DEPTH)) as f32
    }

    /// Check that the configuration describes a usable tree.
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_finite() {
            return Err(OctreeError::InvalidOrigin {
                origin: self.origin,
            });
        }
        if !(self.range.is_finite() && self.range > 0.0) {
            return Err(OctreeError::InvalidRange { range: self.range });
        }
        if self.depth > MAX_DEPTH {
            return Err(OctreeError::DepthTooLarge {
                depth: self.depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}
