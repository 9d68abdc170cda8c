use divan::{Bencher, black_box};
use lidar_sim::na::DMatrix;
use lidar_sim::{BeamGrid, Iso3, LidarSimulator, OrganizedPointCloud, Plane3, UnitVec3, Vector3};
use std::f64::consts::PI;

fn main() {
    // Run registered benchmarks.
    divan::main();
}

fn room() -> Vec<Plane3> {
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    axes.iter()
        .flat_map(|a| [*a, -*a])
        .map(|n| Plane3::new(UnitVec3::new_normalize(n), 5.0))
        .collect()
}

/// A sensor layout similar to a 16 channel spinning lidar at one degree azimuth resolution
fn sixteen_channel() -> LidarSimulator {
    let lat = 15.0_f64.to_radians();
    let grid = BeamGrid::from_linear_spaces(-lat, lat, 16, -PI, PI, 360).unwrap();
    LidarSimulator::from_grid(grid)
}

#[divan::bench]
fn ranges_sequential(bencher: Bencher) {
    let sim = sixteen_channel();
    let scene = room();
    let pose = Iso3::translation(0.5, -1.0, 0.2);
    let mut ranges = DMatrix::zeros(sim.height(), sim.width());

    bencher.bench_local(move || {
        sim.get_ranges(black_box(&mut ranges), &scene, &pose, None);
    });
}

#[divan::bench]
fn ranges_with_cloud(bencher: Bencher) {
    let sim = sixteen_channel();
    let scene = room();
    let pose = Iso3::translation(0.5, -1.0, 0.2);
    let mut ranges = DMatrix::zeros(sim.height(), sim.width());
    let mut cloud = OrganizedPointCloud::new(sim.width(), sim.height());

    bencher.bench_local(move || {
        sim.get_ranges(black_box(&mut ranges), &scene, &pose, Some(&mut cloud));
    });
}

#[divan::bench]
fn ranges_parallel(bencher: Bencher) {
    let sim = sixteen_channel();
    let scene = room();
    let pose = Iso3::translation(0.5, -1.0, 0.2);
    let mut ranges = DMatrix::zeros(sim.height(), sim.width());

    bencher.bench_local(move || {
        sim.par_get_ranges(black_box(&mut ranges), &scene, &pose, None);
    });
}
