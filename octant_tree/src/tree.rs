// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `ReconstructionTree` API: a configured root plus the ingestion policy.

use core::fmt;

use glam::Vec3;

use crate::config::{BoundsPolicy, TreeConfig};
use crate::error::{OctreeError, Result};
use crate::mesh::Mesh;
use crate::node::{Leaves, SpatialNode};
use crate::reconstructor::Reconstructor;
use crate::types::LeafPath;

/// Owner of a reconstruction octree.
///
/// Wraps the root [`SpatialNode`] with a validated [`TreeConfig`], applies the
/// [`BoundsPolicy`] on every insertion, and creates leaf reconstructors with
/// the factory `F` (by default `R::default`).
///
/// The intended cadence is: stream points in with [`insert`][Self::insert],
/// periodically call [`reconstruct`][Self::reconstruct] (or
/// `reconstruct_parallel` with the `parallel` feature), then read the result
/// with [`collect_mesh`][Self::collect_mesh]. Dropping the tree releases every
/// node and reconstructor.
///
/// ## Example
///
/// ```rust
/// use glam::Vec3;
/// use octant_tree::{OctreeError, ReconstructionTree, TreeConfig};
/// use octant_tree::reconstructors::VoxelSurface;
///
/// let config = TreeConfig::new(Vec3::ZERO, 8.0, 2);
/// let mut tree = ReconstructionTree::<VoxelSurface>::new(config).unwrap();
///
/// tree.insert(Vec3::new(1.0, 1.0, 1.0)).unwrap();
/// assert!(matches!(
///     tree.insert(Vec3::new(9.0, 1.0, 1.0)),
///     Err(OctreeError::OutOfBounds { .. })
/// ));
///
/// tree.reconstruct();
/// assert_eq!(tree.collect_mesh().triangle_count(), 12);
/// ```
pub struct ReconstructionTree<R, F = fn() -> R> {
    config: TreeConfig,
    root: SpatialNode<R>,
    make: F,
}

impl<R, F> fmt::Debug for ReconstructionTree<R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReconstructionTree")
            .field("config", &self.config)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<R: Reconstructor + Default> ReconstructionTree<R> {
    /// Create an empty tree whose leaves use `R::default()`.
    pub fn new(config: TreeConfig) -> Result<Self> {
        Self::with_factory(config, R::default as fn() -> R)
    }
}

impl<R, F> ReconstructionTree<R, F>
where
    R: Reconstructor,
    F: FnMut() -> R,
{
    /// Create an empty tree whose leaves get reconstructors from `make`.
    ///
    /// Fails if the configuration does not [validate][TreeConfig::validate].
    pub fn with_factory(config: TreeConfig, mut make: F) -> Result<Self> {
        config.validate()?;
        let root = SpatialNode::with_factory(config.origin, config.range, config.depth, &mut make);
        tracing::debug!(?config, "created reconstruction tree");
        Ok(Self { config, root, make })
    }

    /// Insert one point.
    ///
    /// Under [`BoundsPolicy::Reject`], points outside the root cube and
    /// non-finite points fail with [`OctreeError::OutOfBounds`]. Under
    /// [`BoundsPolicy::Accept`] they are routed like any other point.
    pub fn insert(&mut self, point: Vec3) -> Result<()> {
        if self.config.bounds == BoundsPolicy::Reject && !self.root.cube().contains(point) {
            let cube = self.root.cube();
            tracing::trace!(?point, "rejected point outside root cube");
            return Err(OctreeError::OutOfBounds {
                point,
                min: cube.origin,
                max: cube.max(),
            });
        }
        self.root.insert_with(point, &mut self.make)
    }

    /// Insert every point from `points`, stopping at the first failure.
    ///
    /// Points before the failing one stay inserted. Returns how many points
    /// were inserted.
    pub fn extend_points<I>(&mut self, points: I) -> Result<usize>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut inserted = 0;
        for point in points {
            self.insert(point)?;
            inserted += 1;
        }
        tracing::trace!(inserted, "inserted point batch");
        Ok(inserted)
    }

    /// Run every leaf's reconstructor over its current points.
    pub fn reconstruct(&mut self) {
        let leaves = self.root.cluster_count();
        let _span = tracing::debug_span!("reconstruct", leaves).entered();
        self.root.reconstruct();
    }

    /// Concatenated leaf meshes, in ascending octant order.
    pub fn collect_mesh(&self) -> Mesh {
        self.root.collect_mesh()
    }

    /// Total number of stored points.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Number of materialized leaves.
    pub fn cluster_count(&self) -> usize {
        self.root.cluster_count()
    }

    /// Points of the leaf `location` routes to; empty if that leaf does not exist yet.
    pub fn points_near(&self, location: Vec3) -> &[Vec3] {
        self.root.points_near(location)
    }
}

impl<R, F> ReconstructionTree<R, F> {
    /// The validated configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The root node.
    pub fn root(&self) -> &SpatialNode<R> {
        &self.root
    }

    /// Materialized leaves, depth first in ascending octant order.
    pub fn leaves(&self) -> Leaves<'_, R> {
        self.root.leaves()
    }

    /// Octants `point` descends through from the root to leaf level.
    pub fn leaf_path(&self, point: Vec3) -> LeafPath {
        self.root.leaf_path(point)
    }
}

#[cfg(feature = "parallel")]
impl<R, F> ReconstructionTree<R, F>
where
    R: Reconstructor + Send,
    F: FnMut() -> R,
{
    /// Like [`reconstruct`][Self::reconstruct], but runs the leaves on the
    /// rayon thread pool.
    ///
    /// Leaves own disjoint points and reconstructors, so they need no
    /// synchronization. Returns once every leaf has finished.
    pub fn reconstruct_parallel(&mut self) {
        use rayon::prelude::*;

        let leaves = self.root.leaves_mut();
        let count = leaves.len();
        let _span = tracing::debug_span!("reconstruct_parallel", leaves = count).entered();
        leaves.into_par_iter().for_each(|leaf| leaf.reconstruct());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    use crate::node::LeafState;
    use crate::reconstructors::{BoundingBox, Noop, VoxelSurface};
    use crate::types::Octant;

    fn v(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z)
    }

    fn empty_tree<R: Reconstructor + Default>(range: f32, depth: u32) -> ReconstructionTree<R> {
        ReconstructionTree::new(TreeConfig::new(Vec3::ZERO, range, depth)).unwrap()
    }

    #[test]
    fn rejects_points_outside_root() {
        let mut tree = empty_tree::<Noop>(8.0, 2);
        for p in [
            v(8.0, 1.0, 1.0),
            v(-0.001, 1.0, 1.0),
            v(1.0, 1.0, 100.0),
            v(f32::NAN, 1.0, 1.0),
        ] {
            let err = tree.insert(p).unwrap_err();
            let OctreeError::OutOfBounds { point, min, max } = err else {
                panic!("unexpected error {err:?}");
            };
            assert!(point == p || (point.is_nan() && p.is_nan()));
            assert_eq!(min, Vec3::ZERO);
            assert_eq!(max, Vec3::splat(8.0));
        }
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.cluster_count(), 0);
    }

    #[test]
    fn accept_policy_routes_outside_points() {
        let config = TreeConfig::new(Vec3::ZERO, 8.0, 2).with_bounds(BoundsPolicy::Accept);
        let mut tree = ReconstructionTree::<Noop>::new(config).unwrap();
        let far = v(100.0, -3.0, 7.0);
        tree.insert(far).unwrap();

        assert_eq!(tree.size(), 1);
        assert_eq!(tree.cluster_count(), 1);
        assert_eq!(tree.points_near(far), &[far]);
        let leaf = tree.leaves().next().unwrap();
        assert!(!leaf.cube().contains(far));
    }

    #[test]
    fn accept_policy_routes_nan_to_the_high_half() {
        let config = TreeConfig::new(Vec3::ZERO, 8.0, 1).with_bounds(BoundsPolicy::Accept);
        let mut tree = ReconstructionTree::<Noop>::new(config).unwrap();
        tree.insert(v(f32::NAN, 1.0, 1.0)).unwrap();

        assert_eq!(tree.size(), 1);
        let leaf = tree.leaves().next().unwrap();
        assert_eq!(leaf.origin(), v(4.0, 0.0, 0.0));
        let path = tree.leaf_path(v(f32::NAN, 1.0, 1.0));
        assert_eq!(path.as_slice(), &[Octant::X]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TreeConfig::new(Vec3::ZERO, -1.0, 2);
        let err = ReconstructionTree::<Noop>::new(config).unwrap_err();
        assert_eq!(err, OctreeError::InvalidRange { range: -1.0 });
    }

    #[test]
    fn extend_points_stops_at_first_failure() {
        let mut tree = empty_tree::<Noop>(8.0, 2);
        let n = tree.extend_points([v(1.0, 1.0, 1.0), v(2.0, 2.0, 2.0)]);
        assert_eq!(n, Ok(2));

        let err = tree.extend_points([v(3.0, 3.0, 3.0), v(9.0, 0.0, 0.0), v(4.0, 4.0, 4.0)]);
        assert!(matches!(err, Err(OctreeError::OutOfBounds { .. })));
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn full_cycle_with_bounding_boxes() {
        let mut tree = empty_tree::<BoundingBox>(8.0, 1);
        let points = [v(1.0, 1.0, 1.0), v(2.0, 3.0, 1.5), v(6.0, 6.0, 6.0)];
        tree.extend_points(points).unwrap();
        assert!(tree.collect_mesh().is_empty());

        tree.reconstruct();
        let mesh = tree.collect_mesh();
        assert_eq!(mesh.triangle_count(), 24);
        // Octant 0 comes first, and its box spans the two low points.
        let first: Vec<Vec3> = mesh.positions()[..36].to_vec();
        assert!(first.iter().all(|p| p.cmple(v(2.0, 3.0, 1.5)).all()));
        assert_eq!(tree.collect_mesh(), mesh);
    }

    #[test]
    fn custom_factory_configures_leaves() {
        let config = TreeConfig::new(Vec3::ZERO, 4.0, 1);
        let make = || VoxelSurface::new(0.5);
        let mut tree = ReconstructionTree::with_factory(config, make).unwrap();
        let points = [v(0.1, 0.1, 0.1), v(0.6, 0.1, 0.1), v(3.0, 3.0, 3.0)];
        tree.extend_points(points).unwrap();
        tree.reconstruct();

        for leaf in tree.leaves() {
            assert_eq!(leaf.reconstructor().unwrap().voxel_size(), 0.5);
            assert_eq!(leaf.state(), Some(LeafState::Reconstructed));
        }
        // Two touching voxels (20 triangles) plus one lone voxel (12).
        assert_eq!(tree.collect_mesh().triangle_count(), 32);
    }

    #[test]
    fn depth_zero_tree_is_one_cluster() {
        let mut tree = empty_tree::<BoundingBox>(2.0, 0);
        assert_eq!(tree.cluster_count(), 1);
        assert_eq!(tree.leaf_path(v(1.0, 1.0, 1.0)).len(), 0);
        tree.insert(v(0.5, 0.5, 0.5)).unwrap();
        tree.insert(v(1.5, 1.5, 1.5)).unwrap();
        assert_eq!(tree.cluster_count(), 1);
        assert_eq!(tree.size(), 2);
        tree.reconstruct();
        assert_eq!(tree.collect_mesh().triangle_count(), 12);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_reconstruction_matches_serial() {
        let config = TreeConfig::new(Vec3::ZERO, 16.0, 3);
        let make = || VoxelSurface::new(0.25);
        let mut serial = ReconstructionTree::with_factory(config, make).unwrap();
        let mut parallel = ReconstructionTree::with_factory(config, make).unwrap();

        let mut state = 0x9e37_79b9_u32;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 16_000) as f32 / 1_000.0
        };
        let points: Vec<Vec3> = (0..2_000).map(|_| v(next(), next(), next())).collect();
        serial.extend_points(points.iter().copied()).unwrap();
        parallel.extend_points(points.iter().copied()).unwrap();

        serial.reconstruct();
        parallel.reconstruct_parallel();
        assert!(!parallel.collect_mesh().is_empty());
        assert_eq!(serial.collect_mesh(), parallel.collect_mesh());
        for leaf in parallel.leaves() {
            assert_eq!(leaf.state(), Some(LeafState::Reconstructed));
        }
    }
}
