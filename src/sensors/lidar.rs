//! This module simulates a scanning 3D laser range finder. A grid of beams is cast from the
//! sensor origin into a scene of infinite planes, and the distance to the nearest surface along
//! each beam is reported as a range grid and optionally as an organized point cloud.

use crate::geom3::{Iso3, OrganizedPointCloud, OrganizedPoints, Point3, Point3f, Ray3, Vector3};
use crate::na::{DMatrix, DMatrixViewMut};
use crate::sensors::{BeamGrid, RaySurface};
use crate::Result;
use itertools::iproduct;
use rayon::prelude::*;

/// The range reported for a beam which does not strike any surface in the scene. Any range at or
/// above this value should be treated as "no return".
pub const NO_HIT_RANGE: f64 = 1e99;

/// Returns true if the range is the no-hit sentinel rather than a real measurement
pub fn is_no_return(range: f64) -> bool {
    range >= NO_HIT_RANGE
}

/// Converts a range from the simulator into `None` if the beam did not hit anything
pub fn range_or_none(range: f64) -> Option<f64> {
    if is_no_return(range) {
        None
    } else {
        Some(range)
    }
}

/// Simulates a 3D laser range finder with beams laid out on a fixed grid of latitudes and
/// longitudes. The simulator holds no state besides its beam grid, so a single instance can be
/// reused for any number of scene and pose combinations.
///
/// Ranges are produced in a matrix with one row per latitude and one column per longitude. When
/// a point cloud is requested it is organized the other way around from the point of view of its
/// addressing: the cloud's width is the number of longitudes and its height is the number of
/// latitudes, so the point for range `(i, j)` lives at column `j`, row `i`. Cloud points are
/// expressed in the sensor's frame, not the world frame.
#[derive(Debug, Clone)]
pub struct LidarSimulator {
    grid: BeamGrid,
}

impl LidarSimulator {
    /// Create a simulator from latitude and longitude angles in radians. See `BeamGrid::try_new`
    /// for the constraints on the angles.
    pub fn try_new(
        latitudes: impl Into<Vec<f64>>,
        longitudes: impl Into<Vec<f64>>,
    ) -> Result<Self> {
        Ok(Self::from_grid(BeamGrid::try_new(latitudes, longitudes)?))
    }

    pub fn from_grid(grid: BeamGrid) -> Self {
        Self { grid }
    }

    /// Create a simulator for a planar scanner, which has a single latitude of zero
    pub fn planar(longitudes: impl Into<Vec<f64>>) -> Result<Self> {
        Self::try_new(vec![0.0], longitudes)
    }

    pub fn grid(&self) -> &BeamGrid {
        &self.grid
    }

    /// The number of rows in the range grid (the latitude count)
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The number of columns in the range grid (the longitude count)
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Compute the ranges to the nearest surface of the scene for every beam, writing them into a
    /// fixed size matrix view and optionally filling an organized point cloud.
    ///
    /// # Arguments
    ///
    /// * `ranges`: the output view, which must have `height()` rows and `width()` columns
    /// * `scene`: the surfaces in world coordinates, may be empty
    /// * `pose`: the transform from the sensor frame to the world frame
    /// * `cloud`: an optional output cloud, which will be reshaped to `width()` by `height()`
    ///
    /// # Panics
    ///
    /// Panics if the shape of `ranges` does not match the beam grid.
    pub fn get_ranges_into<S: RaySurface>(
        &self,
        mut ranges: DMatrixViewMut<'_, f64>,
        scene: &[S],
        pose: &Iso3,
        mut cloud: Option<&mut dyn OrganizedPoints>,
    ) {
        let (height, width) = (self.height(), self.width());
        assert_eq!(
            ranges.shape(),
            (height, width),
            "range grid must have one row per latitude and one column per longitude"
        );
        self.log_sweep(scene.len(), cloud.is_some());

        if let Some(c) = cloud.as_deref_mut() {
            c.reshape(width, height);
        }

        let mut hits = 0;
        for (i, j) in iproduct!(0..height, 0..width) {
            let (range, dir) = self.cast_beam(i, j, scene, pose);
            if !is_no_return(range) {
                hits += 1;
            }
            ranges[(i, j)] = range;
            if let Some(c) = cloud.as_deref_mut() {
                c.set(j, i, cloud_point(&dir, range));
            }
        }

        log::trace!("{} of {} beams returned", hits, height * width);
    }

    /// Compute the ranges for every beam, resizing `ranges` to the shape of the beam grid first.
    /// Otherwise identical to `get_ranges_into`.
    pub fn get_ranges<S: RaySurface>(
        &self,
        ranges: &mut DMatrix<f64>,
        scene: &[S],
        pose: &Iso3,
        cloud: Option<&mut dyn OrganizedPoints>,
    ) {
        let (height, width) = (self.height(), self.width());
        if ranges.shape() != (height, width) {
            ranges.resize_mut(height, width, 0.0);
        }
        self.get_ranges_into(ranges.view_mut((0, 0), (height, width)), scene, pose, cloud);
    }

    /// Compute and return a new range grid for the scene and pose.
    pub fn ranges<S: RaySurface>(&self, scene: &[S], pose: &Iso3) -> DMatrix<f64> {
        let mut ranges = DMatrix::zeros(self.height(), self.width());
        self.get_ranges(&mut ranges, scene, pose, None);
        ranges
    }

    /// Compute and return both a new range grid and a new organized point cloud in the sensor
    /// frame for the scene and pose.
    pub fn scan<S: RaySurface>(
        &self,
        scene: &[S],
        pose: &Iso3,
    ) -> (DMatrix<f64>, OrganizedPointCloud) {
        let mut ranges = DMatrix::zeros(self.height(), self.width());
        let mut cloud = OrganizedPointCloud::new(self.width(), self.height());
        self.get_ranges(&mut ranges, scene, pose, Some(&mut cloud));
        (ranges, cloud)
    }

    /// Compute the ranges for every beam with the beams distributed across the rayon thread pool.
    /// The results are identical to `get_ranges`, which should be preferred for small grids.
    pub fn par_get_ranges<S: RaySurface + Sync>(
        &self,
        ranges: &mut DMatrix<f64>,
        scene: &[S],
        pose: &Iso3,
        mut cloud: Option<&mut dyn OrganizedPoints>,
    ) {
        let (height, width) = (self.height(), self.width());
        self.log_sweep(scene.len(), cloud.is_some());

        let beams = (0..height * width)
            .into_par_iter()
            .map(|k| self.cast_beam(k / width, k % width, scene, pose))
            .collect::<Vec<_>>();

        if ranges.shape() != (height, width) {
            ranges.resize_mut(height, width, 0.0);
        }
        if let Some(c) = cloud.as_deref_mut() {
            c.reshape(width, height);
        }

        for (k, (range, dir)) in beams.iter().enumerate() {
            let (i, j) = (k / width, k % width);
            ranges[(i, j)] = *range;
            if let Some(c) = cloud.as_deref_mut() {
                c.set(j, i, cloud_point(dir, *range));
            }
        }
    }

    /// Cast the beam at latitude index `i` and longitude index `j`, returning the range to the
    /// nearest surface and the beam direction in the sensor frame.
    fn cast_beam<S: RaySurface>(
        &self,
        i: usize,
        j: usize,
        scene: &[S],
        pose: &Iso3,
    ) -> (f64, Vector3) {
        let dir = self.grid.direction(i, j);
        let ray = Ray3::new(Point3::from(pose.translation.vector), pose.rotation * dir);
        (nearest_hit(scene, &ray), dir)
    }

    fn log_sweep(&self, surfaces: usize, with_cloud: bool) {
        log::debug!(
            "casting {}x{} beams against {} surfaces (point cloud: {})",
            self.height(),
            self.width(),
            surfaces,
            with_cloud
        );
    }
}

/// Find the smallest strictly positive intersection parameter of the ray with any surface. The
/// first surface to reach a given minimum keeps it.
fn nearest_hit<S: RaySurface>(scene: &[S], ray: &Ray3) -> f64 {
    let mut nearest = NO_HIT_RANGE;
    for surface in scene {
        if let Some(t) = surface.intersection_parameter(ray) {
            if t > 0.0 && t < nearest {
                nearest = t;
            }
        }
    }
    nearest
}

fn cloud_point(dir: &Vector3, range: f64) -> Point3f {
    Point3f::from((dir * range).cast::<f32>())
}
