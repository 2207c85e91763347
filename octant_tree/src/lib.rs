// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=octant_tree --heading-base-level=0

//! Octant Tree: an adaptive octree that turns a point stream into a composed mesh.
//!
//! Octant Tree is the spatial core of a scan-to-mesh pipeline.
//!
//! - Insert 3D point samples one at a time, in any order.
//! - Points are routed by recursive octant subdivision into leaves of a fixed depth;
//!   nodes are created lazily, the first time a point reaches them.
//! - Each leaf owns a [`Reconstructor`] that turns its points into geometry.
//! - A reconstruction pass runs every leaf; a collection pass concatenates the
//!   leaf meshes in octant order into one [`Mesh`].
//!
//! It does not implement surface reconstruction itself beyond a few small
//! [reference reconstructors][reconstructors]. Plug in your own through the
//! [`Reconstructor`] trait.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use octant_tree::{ReconstructionTree, TreeConfig};
//! use octant_tree::reconstructors::BoundingBox;
//!
//! // An 8-unit cube at the origin, split twice (2-unit leaves).
//! let config = TreeConfig::new(Vec3::ZERO, 8.0, 2);
//! let mut tree = ReconstructionTree::<BoundingBox>::new(config).unwrap();
//!
//! tree.insert(Vec3::new(1.0, 1.0, 1.0)).unwrap();
//! tree.insert(Vec3::new(7.0, 7.0, 7.0)).unwrap();
//! tree.insert(Vec3::new(1.0, 1.0, 7.0)).unwrap();
//! assert_eq!(tree.size(), 3);
//! assert_eq!(tree.cluster_count(), 3);
//! assert_eq!(tree.points_near(Vec3::new(1.0, 1.0, 1.0)), &[Vec3::new(1.0, 1.0, 1.0)]);
//!
//! // Leaves only produce geometry after a reconstruction pass.
//! assert!(tree.collect_mesh().is_empty());
//! tree.reconstruct();
//! assert_eq!(tree.collect_mesh().triangle_count(), 3 * 12);
//! ```
//!
//! ## Routing
//!
//! A node compares each coordinate against its center plane: strictly below is
//! the low half, anything else the high half. The three decisions form the
//! [`Octant`] bits (x is the most significant). Child regions are derived from
//! the same bits, so a point on a center plane is both routed to and contained
//! by the high child.
//!
//! Out-of-bounds points are the caller's choice: [`ReconstructionTree`]
//! rejects them by default ([`BoundsPolicy::Reject`]) and routes them like
//! any other point under [`BoundsPolicy::Accept`]. A bare [`SpatialNode`]
//! never checks bounds.
//!
//! ## Features
//!
//! - `std` *(default)*: enables std support in `glam`, `thiserror` and `tracing`.
//! - `libm`: float math for `no_std` builds. One of `std` or `libm` is required.
//! - `parallel` *(default)*: `ReconstructionTree::reconstruct_parallel`, which
//!   fans leaf reconstruction out over `rayon`.
//! - `concurrent` *(default)*: [`SharedNode`], a lock-based node that accepts
//!   insertions from many threads.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` when nodes are materialized and
//! around reconstruction passes, `trace` for rejected points and batches.
//! Install any subscriber to see them.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod config;
mod error;
mod mesh;
mod node;
mod reconstructor;
pub mod reconstructors;
#[cfg(feature = "concurrent")]
mod shared;
mod tree;
mod types;

pub use config::{BoundsPolicy, MAX_DEPTH, TreeConfig};
pub use error::{OctreeError, Result};
pub use mesh::Mesh;
pub use node::{LeafState, Leaves, SpatialNode};
pub use reconstructor::Reconstructor;
#[cfg(feature = "concurrent")]
pub use shared::SharedNode;
pub use tree::ReconstructionTree;
pub use types::{Cube, LeafPath, Octant};
