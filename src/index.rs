//! Integer voxel coordinates shared by every layer of the grid.

use std::ops::{Add, Sub};

/// A signed `(x, y, z)` voxel coordinate.
///
/// Used both as the *global* address handed to [`crate::HybridGrid`] (signed,
/// centered on the origin) and as the *local* address used internally by
/// [`crate::flat::FlatGrid`] and [`crate::nested::NestedGrid`] (unsigned,
/// relative to the block's own origin). Nothing in the type distinguishes the
/// two; the convention is documented at each call site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelIndex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelIndex {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise floor division.
    #[inline]
    pub fn div_floor(self, rhs: i32) -> Self {
        Self::new(
            self.x.div_euclid(rhs),
            self.y.div_euclid(rhs),
            self.z.div_euclid(rhs),
        )
    }

    #[inline]
    pub fn is_in_range(self, extent: i32) -> bool {
        (0..extent).contains(&self.x) && (0..extent).contains(&self.y) && (0..extent).contains(&self.z)
    }
}

impl Add for VoxelIndex {
    type Output = VoxelIndex;
    #[inline]
    fn add(self, rhs: VoxelIndex) -> VoxelIndex {
        VoxelIndex::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for VoxelIndex {
    type Output = VoxelIndex;
    #[inline]
    fn sub(self, rhs: VoxelIndex) -> VoxelIndex {
        VoxelIndex::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for VoxelIndex {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        VoxelIndex::new(x, y, z)
    }
}
