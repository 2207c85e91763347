// Copyright 2025 the Octant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: cubic regions, octant indices, and leaf paths.

use glam::Vec3;
use smallvec::SmallVec;

bitflags::bitflags! {
    /// One of the eight sub-cubes of a [`Cube`].
    ///
    /// Each flag marks the *high* half of the parent cube along one axis; an
    /// absent flag means the low half. The raw bits double as the child slot
    /// index (0–7): x is the most significant bit, z the least.
    ///
    /// ```
    /// use octant_tree::Octant;
    ///
    /// assert_eq!(Octant::empty().index(), 0);
    /// assert_eq!((Octant::X | Octant::Z).index(), 5);
    /// assert_eq!(Octant::all().index(), 7);
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Octant: u8 {
        /// High half along x.
        const X = 0b100;
        /// High half along y.
        const Y = 0b010;
        /// High half along z.
        const Z = 0b001;
    }
}

impl Octant {
    /// Number of octants in a cube.
    pub const COUNT: usize = 8;

    /// The octant with the given slot index, or `None` if `index >= 8`.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&bits| usize::from(bits) < Self::COUNT)
            .map(Self::from_bits_truncate)
    }

    /// Slot index of this octant (0–7).
    #[inline]
    pub const fn index(self) -> usize {
        self.bits() as usize
    }

    /// All eight octants in ascending index order.
    pub fn each() -> impl Iterator<Item = Self> {
        (0..8_u8).map(Self::from_bits_truncate)
    }

    /// Classify `point` against `center`, one axis at a time.
    ///
    /// A coordinate strictly below the center selects the low half; anything
    /// else (a coordinate exactly on the center plane, or NaN) selects the
    /// high half. No bounds check is performed.
    #[inline]
    #[allow(
        clippy::neg_cmp_op_on_partial_ord,
        reason = "NaN coordinates must select the high half."
    )]
    pub fn locate(point: Vec3, center: Vec3) -> Self {
        let mut octant = Self::empty();
        octant.set(Self::X, !(point.x < center.x));
        octant.set(Self::Y, !(point.y < center.y));
        octant.set(Self::Z, !(point.z < center.z));
        octant
    }

    /// Per-axis selector: `1.0` on high axes and `0.0` on low axes.
    #[inline]
    pub(crate) fn offset(self) -> Vec3 {
        Vec3::new(
            f32::from(u8::from(self.contains(Self::X))),
            f32::from(u8::from(self.contains(Self::Y))),
            f32::from(u8::from(self.contains(Self::Z))),
        )
    }
}

/// Sequence of octants a point descends through, from the root to its leaf.
///
/// Inline storage covers trees up to depth 8 without allocating.
pub type LeafPath = SmallVec<[Octant; 8]>;

/// Axis-aligned cube covering `[origin, origin + range)` on every axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cube {
    /// Minimum corner.
    pub origin: Vec3,
    /// Edge length.
    pub range: f32,
}

impl Cube {
    /// Create a cube from its minimum corner and edge length.
    #[inline(always)]
    pub const fn new(origin: Vec3, range: f32) -> Self {
        Self { origin, range }
    }

    /// Half the edge length; the distance from `origin` to the center plane on each axis.
    #[inline]
    pub fn half_range(&self) -> f32 {
        self.range / 2.0
    }

    /// The point where all three splitting planes meet.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.origin + Vec3::splat(self.half_range())
    }

    /// Maximum corner (exclusive).
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.origin + Vec3::splat(self.range)
    }

    /// Whether the point lies inside the half-open cube.
    ///
    /// Non-finite coordinates are never contained.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.origin).all() && point.cmplt(self.max()).all()
    }

    /// Octant of this cube that `point` routes to.
    #[inline]
    pub fn octant_of(&self, point: Vec3) -> Octant {
        Octant::locate(point, self.center())
    }

    /// The sub-cube for `octant`.
    ///
    /// The child's minimum corner is shifted by `half_range` exactly on the
    /// axes that [`Cube::octant_of`] classifies as high, so routing and
    /// geometry share one threshold.
    #[inline]
    pub fn child(&self, octant: Octant) -> Self {
        let half = self.half_range();
        Self {
            origin: self.origin + octant.offset() * half,
            range: half,
        }
    }

    /// Volume of the cube.
    #[inline]
    pub fn volume(&self) -> f32 {
        self.range * self.range * self.range
    }
}
