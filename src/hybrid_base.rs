//! Adds metric (point ↔ voxel-index) semantics on top of [`DynamicGrid`].

use nalgebra::Point3;

use crate::block::VoxelBlock;
use crate::dynamic::DynamicGrid;
use crate::index::VoxelIndex;

/// Round to the nearest integer, ties to even (banker's rounding). Used for
/// metric-to-voxel conversion so that a point exactly on a cell boundary is
/// assigned deterministically regardless of which side it approaches from.
#[inline]
fn round_ties_even(x: f32) -> i32 {
    let floor = x.floor();
    let diff = x - floor;
    let floor_i = floor as i32;
    if diff < 0.5 {
        floor_i
    } else if diff > 0.5 {
        floor_i + 1
    } else if floor_i % 2 == 0 {
        floor_i
    } else {
        floor_i + 1
    }
}

/// A [`DynamicGrid`] plus a metric `resolution`, giving callers point ↔
/// voxel-index conversion and a flat iteration façade.
pub struct HybridGridBase<W: VoxelBlock> {
    grid: DynamicGrid<W>,
    resolution: f32,
}

impl<W: VoxelBlock> HybridGridBase<W> {
    /// `resolution` is the metric edge length of a voxel. Must be positive.
    pub fn new(resolution: f32) -> Self {
        assert!(
            resolution > 0.0,
            "resolution ({resolution}) must be positive"
        );
        HybridGridBase {
            grid: DynamicGrid::default(),
            resolution,
        }
    }

    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// The voxel index whose cell the given metric point falls into.
    #[inline]
    pub fn cell_index(&self, point: impl Into<Point3<f32>>) -> VoxelIndex {
        let p = point.into();
        VoxelIndex::new(
            round_ties_even(p.x / self.resolution),
            round_ties_even(p.y / self.resolution),
            round_ties_even(p.z / self.resolution),
        )
    }

    /// The metric center of the cell at `idx`.
    #[inline]
    pub fn center_of_cell(&self, idx: VoxelIndex) -> Point3<f32> {
        Point3::new(
            idx.x as f32 * self.resolution,
            idx.y as f32 * self.resolution,
            idx.z as f32 * self.resolution,
        )
    }

    #[inline]
    pub fn value(&self, idx: VoxelIndex) -> &W::Value {
        self.grid.value(idx)
    }

    #[inline]
    pub fn mutable_value(&mut self, idx: VoxelIndex) -> &mut W::Value {
        self.grid.mutable_value(idx)
    }

    /// Every non-default cell, with its *signed* voxel index, in
    /// deterministic (outer-meta, sub-meta, inner) z-major order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelIndex, &W::Value)> {
        self.grid.iter()
    }
}
