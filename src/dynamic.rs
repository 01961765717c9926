//! The outermost grid layer: an origin-centered, dynamically-growing vector
//! of meta-cells.

use crate::block::VoxelBlock;
use crate::index::VoxelIndex;

/// Hard cap on `b_dyn`. With `b_flat = b_nest = 3` (`S = 64`), this bounds
/// the addressable range to `±(2^7 * 64) = ±8192` per axis.
const MAX_B_DYN: u32 = 8;

/// An origin-centered grid of optional owning handles to a wrapped block
/// `W`, which doubles its extent (re-centering symmetrically around the
/// origin) whenever a write falls outside the current range.
///
/// Reads never grow the grid; only `mutable_value` does, and only as a last
/// resort when the target index is out of range.
pub struct DynamicGrid<W: VoxelBlock> {
    b_dyn: u32,
    meta: Vec<Option<Box<W>>>,
    empty: W::Value,
}

impl<W: VoxelBlock> Default for DynamicGrid<W> {
    fn default() -> Self {
        let b_dyn = 1;
        let m3 = Self::meta_side(b_dyn).pow(3);
        DynamicGrid {
            b_dyn,
            meta: (0..m3).map(|_| None).collect(),
            empty: W::Value::default(),
        }
    }
}

impl<W: VoxelBlock> DynamicGrid<W> {
    #[inline]
    fn meta_side(b_dyn: u32) -> usize {
        1usize << b_dyn
    }

    #[inline]
    fn extent(&self) -> i64 {
        Self::meta_side(self.b_dyn) as i64 * W::EXTENT
    }

    #[inline]
    fn shift(&self) -> i64 {
        self.extent() / 2
    }

    #[inline]
    fn meta_linear(&self, meta: VoxelIndex) -> usize {
        let m = Self::meta_side(self.b_dyn) as i64;
        let x = meta.x as i64;
        let y = meta.y as i64;
        let z = meta.z as i64;
        (((z * m) + y) * m + x) as usize
    }

    fn unflatten_meta(&self, flat: usize) -> VoxelIndex {
        let m = Self::meta_side(self.b_dyn);
        let x = flat % m;
        let y = (flat / m) % m;
        let z = flat / (m * m);
        VoxelIndex::new(x as i32, y as i32, z as i32)
    }

    /// Shift `idx` into non-negative "meta space" and split it into a meta
    /// index and an inner (within-`W`) index. Returns `None` if out of the
    /// current addressable range.
    fn split(&self, idx: VoxelIndex) -> Option<(VoxelIndex, VoxelIndex)> {
        let shift = self.shift() as i32;
        let shifted = idx + VoxelIndex::splat(shift);
        if !shifted.is_in_range(self.extent() as i32) {
            return None;
        }
        let s = W::EXTENT as i32;
        let meta = shifted.div_floor(s);
        let inner = shifted - VoxelIndex::new(meta.x * s, meta.y * s, meta.z * s);
        Some((meta, inner))
    }

    #[inline]
    pub fn value(&self, idx: VoxelIndex) -> &W::Value {
        match self.split(idx) {
            None => &self.empty,
            Some((meta, inner)) => match &self.meta[self.meta_linear(meta)] {
                Some(block) => block.value(inner),
                None => &self.empty,
            },
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = "debug"))]
    pub fn mutable_value(&mut self, idx: VoxelIndex) -> &mut W::Value {
        loop {
            if let Some((meta, inner)) = self.split(idx) {
                let linear = self.meta_linear(meta);
                let slot = &mut self.meta[linear];
                let block = slot.get_or_insert_with(|| Box::new(W::default()));
                return block.mutable_value(inner);
            }
            assert!(
                self.b_dyn < MAX_B_DYN,
                "voxel index {:?} is outside the representable range (b_dyn already at its cap of {MAX_B_DYN}, extent ±{})",
                idx,
                self.extent() / 2,
            );
            self.grow();
        }
    }

    /// Doubles `b_dyn`, re-centering existing sub-grids so every logical
    /// voxel coordinate they hold is preserved. Invalidates all outstanding
    /// iterators and previously returned cell references.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = "debug"))]
    fn grow(&mut self) {
        debug_assert!(self.b_dyn < MAX_B_DYN);
        let offset = 1i32 << (self.b_dyn - 1);
        let new_b_dyn = self.b_dyn + 1;
        let new_m = Self::meta_side(new_b_dyn);
        let mut new_meta: Vec<Option<Box<W>>> = (0..new_m.pow(3)).map(|_| None).collect();

        let old_meta = std::mem::take(&mut self.meta);
        for (flat, slot) in old_meta.into_iter().enumerate() {
            let Some(block) = slot else { continue };
            let old = self.unflatten_meta(flat);
            let moved = VoxelIndex::new(old.x + offset, old.y + offset, old.z + offset);
            let new_linear = ((moved.z as i64 * new_m as i64 + moved.y as i64) * new_m as i64
                + moved.x as i64) as usize;
            new_meta[new_linear] = Some(block);
        }

        self.meta = new_meta;
        self.b_dyn = new_b_dyn;
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoxelIndex, &W::Value)> {
        let s = W::EXTENT as i32;
        let m = Self::meta_side(self.b_dyn);
        let shift = self.shift() as i32;
        self.meta
            .iter()
            .enumerate()
            .filter_map(|(flat, slot)| slot.as_deref().map(|block| (flat, block)))
            .flat_map(move |(flat, block)| {
                let x = flat % m;
                let y = (flat / m) % m;
                let z = flat / (m * m);
                let meta = VoxelIndex::new(x as i32, y as i32, z as i32);
                let offset = VoxelIndex::new(meta.x * s - shift, meta.y * s - shift, meta.z * s - shift);
                block.iter().map(move |(inner, v)| (offset + inner, v))
            })
    }

    #[cfg(test)]
    pub(crate) fn b_dyn(&self) -> u32 {
        self.b_dyn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::FlatGrid;
    use crate::nested::NestedGrid;

    type Leaf = FlatGrid<i32, 2>; // side 4
    type Block = NestedGrid<Leaf, 2>; // side 16
    type Grid = DynamicGrid<Block>;

    #[test]
    fn fresh_grid_reads_default_without_allocating() {
        let g = Grid::default();
        assert_eq!(*g.value(VoxelIndex::new(0, 0, 0)), 0);
        assert_eq!(*g.value(VoxelIndex::new(1000, 0, 0)), 0);
    }

    #[test]
    fn write_read_roundtrip_at_origin() {
        let mut g = Grid::default();
        *g.mutable_value(VoxelIndex::new(0, 0, 0)) = 9;
        assert_eq!(*g.value(VoxelIndex::new(0, 0, 0)), 9);
        assert_eq!(g.iter().count(), 1);
    }

    #[test]
    fn out_of_range_write_grows_and_preserves_prior_writes() {
        let mut g = Grid::default();
        *g.mutable_value(VoxelIndex::new(0, 0, 0)) = 1;
        let b_dyn_before = g.b_dyn();

        // Block side is 16, so the initial extent (b_dyn=1) is ±16.
        *g.mutable_value(VoxelIndex::new(1000, 0, 0)) = 2;
        assert!(g.b_dyn() > b_dyn_before);

        assert_eq!(*g.value(VoxelIndex::new(0, 0, 0)), 1);
        assert_eq!(*g.value(VoxelIndex::new(1000, 0, 0)), 2);
        assert_eq!(*g.value(VoxelIndex::new(-1000, 0, 0)), 0);
    }

    #[test]
    fn symmetric_addressability_up_to_cap() {
        let mut g = Grid::default();
        let max = (1i32 << (MAX_B_DYN - 1)) * Block::EXTENT as i32 - 1;
        *g.mutable_value(VoxelIndex::new(max, 0, 0)) = 5;
        assert_eq!(*g.value(VoxelIndex::new(max, 0, 0)), 5);
    }

    #[test]
    #[should_panic]
    fn write_beyond_hard_cap_is_fatal() {
        let mut g = Grid::default();
        let beyond = (1i32 << (MAX_B_DYN - 1)) * Block::EXTENT as i32;
        g.mutable_value(VoxelIndex::new(beyond, 0, 0));
    }
}
