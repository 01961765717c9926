//! The common interface shared by the two fixed-size grid layers.
//!
//! [`FlatGrid`](crate::flat::FlatGrid) and
//! [`NestedGrid`](crate::nested::NestedGrid) both implement [`VoxelBlock`],
//! which is what lets `NestedGrid<W, _>` be generic over its wrapped grid
//! `W` instead of hard-coding a single depth of nesting. `DynamicGrid` does
//! not implement this trait: its extent changes at runtime (it grows), so it
//! can't offer the `EXTENT` associated constant the way a fixed-size block
//! can. It is always the outermost layer and exposes its own inherent API
//! instead (see `dynamic.rs`).

use crate::index::VoxelIndex;

/// A fixed-size, origin-relative cube of cells addressable by an unsigned
/// `VoxelIndex` in `[0, EXTENT)` along each axis.
pub trait VoxelBlock: Default {
    /// The value stored per cell. `Value::default()` is the "empty" marker:
    /// iteration skips cells whose value equals it.
    type Value: Default + PartialEq;

    /// Number of addressable cells along one axis.
    const EXTENT: i64;

    /// Read-only access to the cell at `idx`. Never allocates; returns a
    /// reference to a stored default when nothing has been written there.
    ///
    /// # Panics
    /// If any component of `idx` is outside `[0, EXTENT)` (debug builds only;
    /// this is a programming-contract violation, not a recoverable error).
    fn value(&self, idx: VoxelIndex) -> &Self::Value;

    /// Mutable access to the cell at `idx`, lazily allocating any
    /// intermediate storage on the way down. The returned reference is valid
    /// until the next structural mutation of `self`.
    ///
    /// # Panics
    /// If any component of `idx` is outside `[0, EXTENT)`.
    fn mutable_value(&mut self, idx: VoxelIndex) -> &mut Self::Value;

    /// Every non-default cell, in ascending flat (z-major) order.
    fn iter(&self) -> impl Iterator<Item = (VoxelIndex, &Self::Value)>;
}
