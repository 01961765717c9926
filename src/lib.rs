//!
//! `hybrid_grid` is a sparse, dynamically-growing, hierarchical 3D voxel grid
//! used as a spatial index over point clouds in LiDAR odometry-and-mapping
//! pipelines. Points are quantized to integer voxel coordinates at a
//! configurable `resolution`; each occupied voxel owns a small aggregated
//! [`PointCloud`].
//!
//! The grid is built from four layers, leaves first: [`flat::FlatGrid`] (a
//! dense fixed-size block) ← [`nested::NestedGrid`] (a block of lazily
//! allocated blocks) ← [`dynamic::DynamicGrid`] (an origin-centered,
//! growable block of blocks) ← [`hybrid_base::HybridGridBase`] (adds metric
//! semantics). [`HybridGrid`] is the domain layer on top, exposing
//! [`HybridGrid::insert_scan`] and [`HybridGrid::get_surrounded_cloud`].
//!
//! ```
//! use hybrid_grid::{HybridGrid, PointCloud, voxel_grid_filter};
//! use nalgebra::Point3;
//!
//! let mut grid = HybridGrid::new(0.5);
//! let scan = PointCloud::from_points(vec![Point3::new(0.1, 0.0, 0.0)]);
//! grid.insert_scan(&scan, voxel_grid_filter(0.1));
//! assert_eq!(grid.iter().count(), 1);
//! ```

pub mod block;
pub mod cloud;
pub mod dynamic;
pub mod flat;
pub mod hybrid;
pub mod hybrid_base;
pub mod index;
pub mod nested;

pub use cloud::{voxel_grid_filter, PointCloud};
pub use hybrid::HybridGrid;
pub use index::VoxelIndex;
