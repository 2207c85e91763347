// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Several sensor threads feed one shared tree; reconstruction runs after they join.

use std::thread;

use glam::Vec3;
use octant_demos::{SyntheticScan, init_logging};
use octant_tree::SharedNode;
use octant_tree::reconstructors::BoundingBox;

const SENSORS: u64 = 4;
const FRAMES_PER_SENSOR: usize = 5;
const POINTS_PER_FRAME: usize = 1_000;

fn main() {
    init_logging();

    let range = 8.0;
    let root = SharedNode::<BoundingBox>::new(Vec3::splat(-range / 2.0), range, 2);

    thread::scope(|s| {
        for sensor in 0..SENSORS {
            let root = &root;
            s.spawn(move || {
                let mut scan = SyntheticScan::room(sensor, range);
                for _ in 0..FRAMES_PER_SENSOR {
                    for p in scan.frame(POINTS_PER_FRAME) {
                        if let Err(err) = root.insert(p) {
                            tracing::error!(sensor, %err, "dropping sample");
                        }
                    }
                }
                tracing::debug!(sensor, "sensor finished");
            });
        }
    });

    root.reconstruct();
    tracing::info!(
        points = root.size(),
        clusters = root.cluster_count(),
        triangles = root.collect_mesh().triangle_count(),
        "merged sensors"
    );
}
