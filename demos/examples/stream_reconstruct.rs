// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stream synthetic depth frames into a tree and rebuild the mesh every few frames.
//!
//! Run with `RUST_LOG=octant_tree=debug` to see node materialization.

use glam::Vec3;
use octant_demos::{SyntheticScan, init_logging};
use octant_tree::reconstructors::VoxelSurface;
use octant_tree::{OctreeError, ReconstructionTree, TreeConfig};

const FRAMES: usize = 30;
const POINTS_PER_FRAME: usize = 2_000;
const RECONSTRUCT_EVERY: usize = 10;

fn main() -> Result<(), OctreeError> {
    init_logging();

    let config = TreeConfig::centered(Vec3::ZERO, 8.0, 3);
    let mut tree = ReconstructionTree::with_factory(config, || VoxelSurface::new(0.1))?;
    let mut scan = SyntheticScan::room(1, config.range);

    for frame in 1..=FRAMES {
        let inserted = tree.extend_points(scan.frame(POINTS_PER_FRAME))?;
        tracing::debug!(frame, inserted, "ingested frame");

        if frame % RECONSTRUCT_EVERY == 0 {
            tree.reconstruct_parallel();
            let mesh = tree.collect_mesh();
            tracing::info!(
                frame,
                points = tree.size(),
                clusters = tree.cluster_count(),
                triangles = mesh.triangle_count(),
                "reconstructed"
            );
        }
    }

    let probe = Vec3::new(-2.0, -2.0, -3.0);
    let path: Vec<usize> = tree.leaf_path(probe).iter().map(|o| o.index()).collect();
    tracing::info!(
        ?probe,
        nearby = tree.points_near(probe).len(),
        ?path,
        "leaf around probe"
    );
    Ok(())
}
