// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference [`Reconstructor`][crate::Reconstructor] implementations.
//!
//! - `noop`: produces nothing; useful when only the partitioning matters.
//! - `bounding_box`: closes each leaf's points in an axis-aligned box (12 triangles).
//! - `voxel`: quantizes points into a voxel set and emits every exposed voxel face.
//!
//! These are deliberately small. Real surface reconstruction (Poisson, ball
//! pivoting, marching cubes over a fitted SDF) is expected to live outside
//! this crate and plug in through the same trait.

pub(crate) mod bounding_box;
pub(crate) mod noop;
pub(crate) mod voxel;

pub use bounding_box::BoundingBox;
pub use noop::Noop;
pub use voxel::{DEFAULT_VOXEL_SIZE, VoxelSurface};
