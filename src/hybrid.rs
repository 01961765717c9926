//! The domain layer: a metric point-cloud index with `InsertScan` and
//! `GetSurroundedCloud`.

use std::collections::HashSet;

use nalgebra::{Isometry3, Point3};

use crate::cloud::PointCloud;
use crate::flat::FlatGrid;
use crate::hybrid_base::HybridGridBase;
use crate::index::VoxelIndex;
use crate::nested::NestedGrid;

const B_FLAT: u32 = 3;
const B_NEST: u32 = 3;

/// Fixed neighborhood radius, in meters, used by [`HybridGrid::get_surrounded_cloud`].
const SURROUND_RADIUS: f32 = 100.0;

type Leaf = FlatGrid<Option<PointCloud>, B_FLAT>;
type Block = NestedGrid<Leaf, B_NEST>;

/// A sparse, dynamically-growing voxel grid of point clouds, quantized at a
/// fixed metric `resolution`.
///
/// Each occupied voxel owns a small aggregated [`PointCloud`]. Use
/// [`insert_scan`](Self::insert_scan) to route and downsample a batch of
/// points, and [`get_surrounded_cloud`](Self::get_surrounded_cloud) to pull
/// the union of nearby voxel clouds for scan matching.
pub struct HybridGrid {
    base: HybridGridBase<Block>,
}

impl HybridGrid {
    /// `resolution` is the metric edge length of a voxel; must be positive.
    pub fn new(resolution: f32) -> Self {
        HybridGrid {
            base: HybridGridBase::new(resolution),
        }
    }

    #[inline]
    pub fn resolution(&self) -> f32 {
        self.base.resolution()
    }

    /// Route every point in `scan` into its voxel, then downsample each
    /// touched voxel's cloud in place with `filter`.
    ///
    /// `scan` may be empty, in which case this is a no-op. Points are
    /// expected to already be expressed in the map frame. `filter`'s leaf
    /// size should be smaller than [`resolution`](Self::resolution); a
    /// coarser filter is merely wasteful, not incorrect.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(points = scan.len())))]
    pub fn insert_scan(&mut self, scan: &PointCloud, mut filter: impl FnMut(&mut PointCloud)) {
        if scan.is_empty() {
            return;
        }
        let mut touched: HashSet<VoxelIndex> = HashSet::new();
        for p in scan.iter() {
            let idx = self.base.cell_index(*p);
            let cell = self.base.mutable_value(idx);
            cell.get_or_insert_with(PointCloud::new).push(*p);
            touched.insert(idx);
        }
        for idx in touched {
            if let Some(cloud) = self.base.mutable_value(idx) {
                filter(cloud);
            }
        }
    }

    /// The union of the clouds of every voxel that contains (or would
    /// contain) a transformed scan point within the fixed surround radius.
    ///
    /// The radius test (`‖p‖ ≤ 100 m`) is applied to the *original* scan
    /// point, before `pose` is applied; the voxel lookup uses the
    /// *transformed* point. This mismatch is intentional (the radius is a
    /// sensor-frame range limit, not a map-frame one) and is preserved here.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(points = scan.len())))]
    pub fn get_surrounded_cloud(&self, scan: &PointCloud, pose: &Isometry3<f64>) -> PointCloud {
        let mut out = PointCloud::new();
        if scan.is_empty() {
            return out;
        }
        let pose_f32 = pose.cast::<f32>();
        let mut touched: HashSet<VoxelIndex> = HashSet::new();
        for p in scan.iter() {
            if p.coords.norm() > SURROUND_RADIUS {
                continue;
            }
            let transformed: Point3<f32> = pose_f32 * p;
            let idx = self.base.cell_index(transformed);
            if self.base.value(idx).is_some() {
                touched.insert(idx);
            }
        }
        for idx in touched {
            if let Some(cloud) = self.base.value(idx) {
                out.extend_from_cloud(cloud);
            }
        }
        out
    }

    /// Every occupied voxel, with its signed index, in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelIndex, &PointCloud)> {
        self.base
            .iter()
            .filter_map(|(idx, v)| v.as_ref().map(|cloud| (idx, cloud)))
    }
}
