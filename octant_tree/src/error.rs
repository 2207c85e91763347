// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by tree construction and insertion.

use alloc::collections::TryReserveError;
use glam::Vec3;

/// Result alias used throughout the crate.
pub type Result<T, E = OctreeError> = core::result::Result<T, E>;

/// Failures reported by [`ReconstructionTree`][crate::ReconstructionTree] and
/// [`SpatialNode`][crate::SpatialNode].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OctreeError {
    /// The point lies outside the root cube (or is not finite) and the tree
    /// rejects such points.
    #[error("point {point} lies outside the root cube [{min}, {max})")]
    OutOfBounds {
        /// The rejected point.
        point: Vec3,
        /// Minimum corner of the root cube.
        min: Vec3,
        /// Exclusive maximum corner of the root cube.
        max: Vec3,
    },

    /// The configured root edge length is not a positive, finite number.
    #[error("root range must be positive and finite, got {range}")]
    InvalidRange {
        /// The offending edge length.
        range: f32,
    },

    /// The configured origin has a non-finite coordinate.
    #[error("root origin must be finite, got {origin}")]
    InvalidOrigin {
        /// The offending origin.
        origin: Vec3,
    },

    /// The requested depth would subdivide below what an `f32` edge length can represent.
    #[error("depth {depth} exceeds the supported maximum of {max}")]
    DepthTooLarge {
        /// Requested depth.
        depth: u32,
        /// Largest accepted depth.
        max: u32,
    },

    /// A leaf could not grow its point buffer.
    #[error("failed to grow leaf point buffer")]
    Allocation(#[from] TryReserveError),
}
