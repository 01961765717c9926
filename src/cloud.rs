//! The point-cloud value type stored per cell, and the canonical
//! voxel-grid downsampler.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::index::VoxelIndex;

/// An owned, growable collection of 3D points.
///
/// Used both as the scan input to [`crate::HybridGrid::insert_scan`] /
/// [`crate::HybridGrid::get_surrounded_cloud`] and as the value stored per
/// occupied cell.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointCloud {
    points: Vec<Point3<f32>>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point3<f32>>) -> Self {
        PointCloud { points }
    }

    #[inline]
    pub fn push(&mut self, p: Point3<f32>) {
        self.points.push(p);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f32>> {
        self.points.iter()
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn extend_from_cloud(&mut self, other: &PointCloud) {
        self.points.extend_from_slice(&other.points);
    }
}

impl FromIterator<Point3<f32>> for PointCloud {
    fn from_iter<T: IntoIterator<Item = Point3<f32>>>(iter: T) -> Self {
        PointCloud {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point3<f32>> for PointCloud {
    fn extend<T: IntoIterator<Item = Point3<f32>>>(&mut self, iter: T) {
        self.points.extend(iter)
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3<f32>;
    type IntoIter = std::slice::Iter<'a, Point3<f32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The canonical in-place downsampler: buckets points into a fresh grid of
/// `leaf_size`-edge voxels and replaces each point with the centroid of its
/// bucket. This is the standard PCL-style "VoxelGrid" filter used by
/// LOAM-family mapping pipelines to thin out a cell's cloud after insertion.
///
/// `leaf_size` should be smaller than the grid's own `resolution`; see
/// `HybridGrid::insert_scan`'s documentation for why.
pub fn voxel_grid_filter(leaf_size: f32) -> impl FnMut(&mut PointCloud) {
    assert!(leaf_size > 0.0, "leaf_size ({leaf_size}) must be positive");
    move |cloud: &mut PointCloud| {
        if cloud.is_empty() {
            return;
        }
        let mut buckets: HashMap<VoxelIndex, (Point3<f32>, u32)> = HashMap::new();
        for p in cloud.iter() {
            let idx = VoxelIndex::new(
                (p.x / leaf_size).round() as i32,
                (p.y / leaf_size).round() as i32,
                (p.z / leaf_size).round() as i32,
            );
            let entry = buckets.entry(idx).or_insert((Point3::origin(), 0));
            entry.0 = Point3::from(entry.0.coords + p.coords);
            entry.1 += 1;
        }
        cloud.clear();
        for (sum, count) in buckets.into_values() {
            cloud.push(Point3::from(sum.coords / count as f32));
        }
    }
}
