// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Octant demos and benchmarks.
//!
//! - [`init_logging`] installs `env_logger`, driven by `RUST_LOG`.
//! - [`SyntheticScan`] produces depth-sensor-like frames: noisy samples on the
//!   surface of a few spheres, delivered one frame at a time.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Install `env_logger` as the sink for the library's `tracing` events.
/// Defaults to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// A sphere the synthetic scanner samples.
#[derive(Clone, Copy, Debug)]
pub struct Blob {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

/// Deterministic generator of noisy surface samples.
#[derive(Debug)]
pub struct SyntheticScan {
    rng: StdRng,
    blobs: Vec<Blob>,
    noise: f32,
}

impl SyntheticScan {
    /// A scan of `blobs` with uniform radial noise of `noise` units.
    pub fn new(seed: u64, blobs: Vec<Blob>, noise: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            blobs,
            noise,
        }
    }

    /// Three spheres inside the cube centered on the origin with edge `range`.
    pub fn room(seed: u64, range: f32) -> Self {
        let r = range / 8.0;
        Self::new(
            seed,
            vec![
                Blob {
                    center: Vec3::new(-range / 4.0, -range / 4.0, -range / 4.0),
                    radius: r,
                },
                Blob {
                    center: Vec3::new(range / 4.0, 0.0, range / 5.0),
                    radius: r * 1.5,
                },
                Blob {
                    center: Vec3::new(0.0, range / 4.0, -range / 6.0),
                    radius: r * 0.75,
                },
            ],
            r * 0.02,
        )
    }

    /// Next frame of `len` samples.
    pub fn frame(&mut self, len: usize) -> Vec<Vec3> {
        (0..len).map(|_| self.sample()).collect()
    }

    fn sample(&mut self) -> Vec3 {
        let blob = self.blobs[self.rng.random_range(0..self.blobs.len())];
        // Uniform direction via rejection sampling in the unit ball.
        let dir = loop {
            let v = Vec3::new(
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
                self.rng.random_range(-1.0..1.0),
            );
            let len2 = v.length_squared();
            if len2 > 1e-6 && len2 <= 1.0 {
                break v / len2.sqrt();
            }
        };
        let jitter = self.rng.random_range(-self.noise..=self.noise);
        blob.center + dir * (blob.radius + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_samples_stay_inside_the_room() {
        let mut scan = SyntheticScan::room(7, 8.0);
        for p in scan.frame(2_000) {
            assert!(p.abs().max_element() < 4.0, "{p} left the room");
        }
    }

    #[test]
    fn same_seed_same_frames() {
        let a = SyntheticScan::room(42, 8.0).frame(100);
        let b = SyntheticScan::room(42, 8.0).frame(100);
        assert_eq!(a, b);
    }
}
