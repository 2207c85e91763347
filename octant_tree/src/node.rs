// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recursive octree node: routing, lazy subdivision, and leaf fan-out.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use glam::Vec3;

use crate::error::Result;
use crate::mesh::Mesh;
use crate::reconstructor::Reconstructor;
use crate::types::{Cube, LeafPath, Octant};

/// Progress of a leaf through ingestion and reconstruction.
///
/// Inserting after a reconstruction does not invalidate the mesh; the leaf
/// just reports [`LeafState::Stale`] until the next reconstruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeafState {
    /// No points and never reconstructed.
    Empty,
    /// Points buffered, never reconstructed.
    Accumulating,
    /// Mesh reflects every buffered point.
    Reconstructed,
    /// Points arrived after the last reconstruction.
    Stale,
}

struct Leaf<R> {
    points: Vec<Vec3>,
    reconstructor: R,
    /// Point count at the last reconstruction.
    reconstructed_len: Option<usize>,
}

type Children<R> = [Option<Box<SpatialNode<R>>>; Octant::COUNT];

enum Kind<R> {
    Leaf(Leaf<R>),
    Internal(Box<Children<R>>),
}

/// A node of the reconstruction octree, covering one cubic region.
///
/// A node with `depth == 0` is a *leaf*: it buffers every point routed to it
/// and owns one [`Reconstructor`]. A node with `depth > 0` is *internal*: it
/// owns up to eight children, created the first time a point routes into
/// their octant and never removed afterwards.
///
/// Leaves have no capacity limit; once the depth is exhausted a leaf keeps
/// growing for as long as points arrive.
///
/// ## Example
///
/// ```rust
/// use glam::Vec3;
/// use octant_tree::SpatialNode;
/// use octant_tree::reconstructors::BoundingBox;
///
/// let mut root = SpatialNode::<BoundingBox>::new(Vec3::ZERO, 8.0, 2);
/// root.insert(Vec3::new(1.0, 1.0, 1.0)).unwrap();
/// root.insert(Vec3::new(7.0, 7.0, 7.0)).unwrap();
/// assert_eq!(root.size(), 2);
/// assert_eq!(root.cluster_count(), 2);
///
/// root.reconstruct();
/// assert_eq!(root.collect_mesh().triangle_count(), 24);
/// ```
pub struct SpatialNode<R> {
    cube: Cube,
    depth: u32,
    kind: Kind<R>,
}

impl<R> fmt::Debug for SpatialNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SpatialNode");
        s.field("cube", &self.cube).field("depth", &self.depth);
        if let Kind::Leaf(leaf) = &self.kind {
            s.field("points", &leaf.points.len());
            s.field("state", &self.state());
        } else {
            s.field("children", &self.children().count());
        }
        s.finish_non_exhaustive()
    }
}

impl<R: Reconstructor + Default> SpatialNode<R> {
    /// Create a node covering `[origin, origin + range)` on every axis.
    ///
    /// Leaves get their reconstructor from `R::default()`.
    pub fn new(origin: Vec3, range: f32, depth: u32) -> Self {
        Self::with_factory(origin, range, depth, &mut R::default)
    }

    /// Route `point` down to its leaf and append it there, creating any
    /// missing nodes on the way.
    ///
    /// No bounds check is made: a point outside this node's cube still lands
    /// in whichever leaf the per-axis comparisons select.
    pub fn insert(&mut self, point: Vec3) -> Result<()> {
        self.insert_with(point, &mut R::default)
    }
}

impl<R: Reconstructor> SpatialNode<R> {
    /// Create a node whose leaves obtain reconstructors from `make`.
    ///
    /// `make` is called once here if `depth == 0`; internal nodes defer until
    /// a leaf is materialized by [`SpatialNode::insert_with`].
    pub fn with_factory<F>(origin: Vec3, range: f32, depth: u32, make: &mut F) -> Self
    where
        F: FnMut() -> R,
    {
        let kind = if depth == 0 {
            Kind::Leaf(Leaf {
                points: Vec::new(),
                reconstructor: make(),
                reconstructed_len: None,
            })
        } else {
            Kind::Internal(Box::new([None, None, None, None, None, None, None, None]))
        };
        Self {
            cube: Cube::new(origin, range),
            depth,
            kind,
        }
    }

    /// Like [`SpatialNode::insert`], creating new leaves' reconstructors with `make`.
    pub fn insert_with<F>(&mut self, point: Vec3, make: &mut F) -> Result<()>
    where
        F: FnMut() -> R,
    {
        let octant = self.octant_index(point);
        match &mut self.kind {
            Kind::Leaf(leaf) => {
                leaf.points.try_reserve(1)?;
                leaf.points.push(point);
                Ok(())
            }
            Kind::Internal(children) => {
                let child = children[octant.index()].get_or_insert_with(|| {
                    let region = self.cube.child(octant);
                    let depth = self.depth - 1;
                    tracing::debug!(
                        octant = octant.index(),
                        depth,
                        origin = ?region.origin,
                        "materializing octree node"
                    );
                    let node = Self::with_factory(region.origin, region.range, depth, make);
                    Box::new(node)
                });
                child.insert_with(point, make)
            }
        }
    }

    /// Octant of this node that `point` routes to.
    ///
    /// Each axis is compared against `origin + half_range`; strictly below is
    /// the low half, anything else the high half.
    #[inline]
    pub fn octant_index(&self, point: Vec3) -> Octant {
        self.cube.octant_of(point)
    }

    /// Total number of points stored under this node.
    pub fn size(&self) -> usize {
        match &self.kind {
            Kind::Leaf(leaf) => leaf.points.len(),
            Kind::Internal(_) => self.children().map(Self::size).sum(),
        }
    }

    /// Points of the leaf that `location` routes to, without inserting.
    ///
    /// Returns an empty slice when the route hits an octant that has not been
    /// materialized yet.
    pub fn points_near(&self, location: Vec3) -> &[Vec3] {
        match &self.kind {
            Kind::Leaf(leaf) => &leaf.points,
            Kind::Internal(children) => match &children[self.octant_index(location).index()] {
                Some(child) => child.points_near(location),
                None => &[],
            },
        }
    }

    /// Number of materialized leaves under this node.
    pub fn cluster_count(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 1,
            Kind::Internal(_) => self.children().map(Self::cluster_count).sum(),
        }
    }

    /// Hand every leaf's points to its reconstructor and rebuild its mesh.
    ///
    /// Must run before [`SpatialNode::collect_mesh`] returns anything.
    pub fn reconstruct(&mut self) {
        match &mut self.kind {
            Kind::Leaf(leaf) => {
                leaf.reconstructor.set_points(&leaf.points);
                leaf.reconstructor.reconstruct();
                leaf.reconstructed_len = Some(leaf.points.len());
            }
            Kind::Internal(children) => {
                for child in children.iter_mut().flatten() {
                    child.reconstruct();
                }
            }
        }
    }

    /// Concatenate the current leaf meshes in ascending octant order.
    pub fn collect_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new();
        self.collect_mesh_into(&mut mesh);
        mesh
    }

    /// Append the current leaf meshes to `out` in ascending octant order.
    pub fn collect_mesh_into(&self, out: &mut Mesh) {
        match &self.kind {
            Kind::Leaf(leaf) => out.append(leaf.reconstructor.mesh()),
            Kind::Internal(_) => {
                for child in self.children() {
                    child.collect_mesh_into(out);
                }
            }
        }
    }
}

impl<R> SpatialNode<R> {
    /// Region covered by this node.
    pub fn cube(&self) -> Cube {
        self.cube
    }

    /// Minimum corner of this node's region.
    pub fn origin(&self) -> Vec3 {
        self.cube.origin
    }

    /// Edge length of this node's region.
    pub fn range(&self) -> f32 {
        self.cube.range
    }

    /// Levels between this node and the leaves; 0 for a leaf.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf(_))
    }

    /// Child in `octant`, if materialized. Always `None` on a leaf.
    pub fn child(&self, octant: Octant) -> Option<&Self> {
        match &self.kind {
            Kind::Leaf(_) => None,
            Kind::Internal(children) => children[octant.index()].as_deref(),
        }
    }

    /// Buffered points of a leaf; empty for internal nodes.
    pub fn points(&self) -> &[Vec3] {
        match &self.kind {
            Kind::Leaf(leaf) => &leaf.points,
            Kind::Internal(_) => &[],
        }
    }

    /// The leaf's reconstructor; `None` for internal nodes.
    pub fn reconstructor(&self) -> Option<&R> {
        match &self.kind {
            Kind::Leaf(leaf) => Some(&leaf.reconstructor),
            Kind::Internal(_) => None,
        }
    }

    /// Lifecycle state of a leaf; `None` for internal nodes.
    pub fn state(&self) -> Option<LeafState> {
        let Kind::Leaf(leaf) = &self.kind else {
            return None;
        };
        Some(match leaf.reconstructed_len {
            None if leaf.points.is_empty() => LeafState::Empty,
            None => LeafState::Accumulating,
            Some(n) if n == leaf.points.len() => LeafState::Reconstructed,
            Some(_) => LeafState::Stale,
        })
    }

    /// Octants `point` descends through from this node to leaf level.
    ///
    /// Purely geometric: the path is computed whether or not the nodes along
    /// it exist yet.
    pub fn leaf_path(&self, point: Vec3) -> LeafPath {
        let mut path = LeafPath::new();
        let mut cube = self.cube;
        for _ in 0..self.depth {
            let octant = cube.octant_of(point);
            path.push(octant);
            cube = cube.child(octant);
        }
        path
    }

    /// Materialized children in ascending octant order; empty for a leaf.
    fn children(&self) -> impl Iterator<Item = &Self> {
        let slots: &[Option<Box<Self>>] = match &self.kind {
            Kind::Leaf(_) => &[],
            Kind::Internal(children) => &children[..],
        };
        slots.iter().flatten().map(|c| &**c)
    }

    /// Number of materialized nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Self::node_count).sum::<usize>()
    }

    /// Materialized leaves, depth first in ascending octant order.
    pub fn leaves(&self) -> Leaves<'_, R> {
        let stack = vec![self];
        Leaves { stack }
    }

    /// Mutable references to every materialized leaf, in the order of [`SpatialNode::leaves`].
    ///
    /// Leaves are disjoint, so the returned references can be handed to
    /// separate workers.
    pub fn leaves_mut(&mut self) -> Vec<&mut Self> {
        let mut out = Vec::new();
        self.collect_leaves_mut(&mut out);
        out
    }

    fn collect_leaves_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Self>) {
        if self.is_leaf() {
            out.push(self);
            return;
        }
        if let Kind::Internal(children) = &mut self.kind {
            for child in children.iter_mut().flatten() {
                child.collect_leaves_mut(out);
            }
        }
    }
}

/// Iterator over the materialized leaves of a [`SpatialNode`].
pub struct Leaves<'a, R> {
    stack: Vec<&'a SpatialNode<R>>,
}

impl<R> fmt::Debug for Leaves<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaves")
            .field("pending", &self.stack.len())
            .finish()
    }
}

impl<'a, R> Iterator for Leaves<'a, R> {
    type Item = &'a SpatialNode<R>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            // Reverse so the lowest octant is popped first.
            let first = self.stack.len();
            self.stack.extend(node.children());
            self.stack[first..].reverse();
        }
        None
    }
}
