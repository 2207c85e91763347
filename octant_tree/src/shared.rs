// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lock-based octree node for concurrent ingestion.
//!
//! [`SharedNode`] mirrors [`SpatialNode`][crate::SpatialNode] but takes `&self`
//! on insertion. Two kinds of locks keep it consistent:
//!
//! - every internal node guards its child slots with a *shape lock*, held only
//!   for check-absent / create / mark-present of one slot, so racing inserts
//!   into the same empty octant create exactly one child;
//! - every leaf guards its points and reconstructor with its own *point lock*,
//!   so appends to different leaves never contend.
//!
//! No lock is held while descending into a child.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use glam::Vec3;
use parking_lot::Mutex;

use crate::error::Result;
use crate::mesh::Mesh;
use crate::reconstructor::Reconstructor;
use crate::types::{Cube, Octant};

struct SharedLeaf<R> {
    points: Vec<Vec3>,
    reconstructor: R,
}

type Slots<R> = [Option<Arc<SharedNode<R>>>; Octant::COUNT];

enum SharedKind<R> {
    Leaf(Mutex<SharedLeaf<R>>),
    Internal(Mutex<Slots<R>>),
}

/// Octree node that accepts insertions from many threads at once.
///
/// ```rust
/// use glam::Vec3;
/// use octant_tree::SharedNode;
/// use octant_tree::reconstructors::Noop;
///
/// let root = SharedNode::<Noop>::new(Vec3::ZERO, 8.0, 2);
/// std::thread::scope(|s| {
///     for t in 0..4 {
///         let root = &root;
///         s.spawn(move || root.insert(Vec3::splat(t as f32)).unwrap());
///     }
/// });
/// assert_eq!(root.size(), 4);
/// ```
pub struct SharedNode<R> {
    cube: Cube,
    depth: u32,
    kind: SharedKind<R>,
}

impl<R> fmt::Debug for SharedNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedNode")
            .field("cube", &self.cube)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

impl<R: Reconstructor + Default> SharedNode<R> {
    /// Create a node covering `[origin, origin + range)`; leaves use `R::default()`.
    pub fn new(origin: Vec3, range: f32, depth: u32) -> Self {
        Self::with_factory(origin, range, depth, &R::default)
    }

    /// Route `point` to its leaf and append it, creating missing nodes.
    pub fn insert(&self, point: Vec3) -> Result<()> {
        self.insert_with(point, &R::default)
    }
}

impl<R: Reconstructor> SharedNode<R> {
    /// Create a node whose leaves obtain reconstructors from `make`.
    pub fn with_factory<F>(origin: Vec3, range: f32, depth: u32, make: &F) -> Self
    where
        F: Fn() -> R,
    {
        let kind = if depth == 0 {
            SharedKind::Leaf(Mutex::new(SharedLeaf {
                points: Vec::new(),
                reconstructor: make(),
            }))
        } else {
            SharedKind::Internal(Mutex::new([None, None, None, None, None, None, None, None]))
        };
        Self {
            cube: Cube::new(origin, range),
            depth,
            kind,
        }
    }

    /// Like [`SharedNode::insert`], creating new leaves' reconstructors with `make`.
    pub fn insert_with<F>(&self, point: Vec3, make: &F) -> Result<()>
    where
        F: Fn() -> R,
    {
        match &self.kind {
            SharedKind::Leaf(leaf) => {
                let mut leaf = leaf.lock();
                leaf.points.try_reserve(1)?;
                leaf.points.push(point);
                Ok(())
            }
            SharedKind::Internal(slots) => {
                let octant = self.cube.octant_of(point);
                let child = {
                    let mut slots = slots.lock();
                    let slot = slots[octant.index()].get_or_insert_with(|| {
                        let region = self.cube.child(octant);
                        let depth = self.depth - 1;
                        tracing::debug!(
                            octant = octant.index(),
                            depth,
                            origin = ?region.origin,
                            "materializing shared octree node"
                        );
                        let node = Self::with_factory(region.origin, region.range, depth, make);
                        Arc::new(node)
                    });
                    Arc::clone(slot)
                };
                child.insert_with(point, make)
            }
        }
    }

    /// Snapshot of the materialized children, in octant order.
    fn children(&self) -> Vec<Arc<Self>> {
        match &self.kind {
            SharedKind::Leaf(_) => Vec::new(),
            SharedKind::Internal(slots) => slots.lock().iter().flatten().cloned().collect(),
        }
    }

    /// Region covered by this node.
    pub fn cube(&self) -> Cube {
        self.cube
    }

    /// Levels between this node and the leaves; 0 for a leaf.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Total number of points stored under this node.
    pub fn size(&self) -> usize {
        match &self.kind {
            SharedKind::Leaf(leaf) => leaf.lock().points.len(),
            SharedKind::Internal(_) => self.children().iter().map(|c| c.size()).sum(),
        }
    }

    /// Number of materialized leaves under this node.
    pub fn cluster_count(&self) -> usize {
        match &self.kind {
            SharedKind::Leaf(_) => 1,
            SharedKind::Internal(_) => self.children().iter().map(|c| c.cluster_count()).sum(),
        }
    }

    /// Number of materialized nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        let children = self.children();
        1 + children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Copy of the points of the leaf `location` routes to; empty if that leaf
    /// does not exist yet.
    pub fn points_near(&self, location: Vec3) -> Vec<Vec3> {
        match &self.kind {
            SharedKind::Leaf(leaf) => leaf.lock().points.clone(),
            SharedKind::Internal(slots) => {
                let child = slots.lock()[self.cube.octant_of(location).index()].clone();
                child.map(|c| c.points_near(location)).unwrap_or_default()
            }
        }
    }

    /// Run every leaf's reconstructor over its current points.
    pub fn reconstruct(&self) {
        match &self.kind {
            SharedKind::Leaf(leaf) => {
                let mut leaf = leaf.lock();
                let SharedLeaf {
                    points,
                    reconstructor,
                } = &mut *leaf;
                reconstructor.set_points(points);
                reconstructor.reconstruct();
            }
            SharedKind::Internal(_) => {
                for child in self.children() {
                    child.reconstruct();
                }
            }
        }
    }

    /// Concatenated leaf meshes, in ascending octant order.
    pub fn collect_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        self.collect_mesh_into(&mut mesh);
        mesh
    }

    fn collect_mesh_into(&self, out: &mut Mesh) {
        match &self.kind {
            SharedKind::Leaf(leaf) => out.append(leaf.lock().reconstructor.mesh()),
            SharedKind::Internal(_) => {
                for child in self.children() {
                    child.collect_mesh_into(out);
                }
            }
        }
    }
}
