use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hybrid_grid::{voxel_grid_filter, HybridGrid, PointCloud};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};
use rand::Rng;

const RESOLUTION: f32 = 0.5;
const SCAN_SIZE: usize = 2_000;
const SPREAD: f32 = 20.0;

fn random_scan(n: usize) -> PointCloud {
    let mut rng = rand::thread_rng();
    PointCloud::from_points(
        (0..n)
            .map(|_| {
                Point3::new(
                    rng.gen_range(-SPREAD..SPREAD),
                    rng.gen_range(-SPREAD..SPREAD),
                    rng.gen_range(-SPREAD..SPREAD),
                )
            })
            .collect(),
    )
}

fn insert_scan(c: &mut Criterion) {
    let mut g = c.benchmark_group("InsertScan");
    g.bench_function("insert 2k points, no filter", |b| {
        b.iter(|| {
            let mut grid = HybridGrid::new(RESOLUTION);
            let scan = random_scan(SCAN_SIZE);
            grid.insert_scan(&scan, |_: &mut PointCloud| {});
            black_box(&grid);
        })
    });
    g.bench_function("insert 2k points, downsampled", |b| {
        b.iter(|| {
            let mut grid = HybridGrid::new(RESOLUTION);
            let scan = random_scan(SCAN_SIZE);
            grid.insert_scan(&scan, voxel_grid_filter(0.1));
            black_box(&grid);
        })
    });
    g.finish();
}

fn surrounded_cloud(c: &mut Criterion) {
    let mut grid = HybridGrid::new(RESOLUTION);
    grid.insert_scan(&random_scan(20_000), voxel_grid_filter(0.1));
    let scan = random_scan(SCAN_SIZE);
    let pose = Isometry3::from_parts(Translation3::new(1.0, 0.0, 0.0), UnitQuaternion::identity());

    let mut g = c.benchmark_group("GetSurroundedCloud");
    g.bench_function("query 2k points against populated grid", |b| {
        b.iter(|| black_box(grid.get_surrounded_cloud(&scan, &pose)))
    });
    g.finish();
}

criterion_group!(benches, insert_scan, surrounded_cloud);
criterion_main!(benches);
