//! An organized (grid shaped) point cloud, where every point has a fixed column and row position
//! in addition to its spatial coordinates. This is the natural output shape of a scanning sensor
//! that sweeps a rectangular grid of beam directions.

use crate::geom3::Point3f;

/// Capability of a container which can hold a grid of points addressed by column and row. The
/// simulated sensors only write through this interface, so any storage that can be reshaped and
/// written at `(col, row)` can receive their output.
pub trait OrganizedPoints {
    /// Resize the container to hold `width * height` points, where `width` is the number of
    /// columns and `height` is the number of rows. Previous contents are not preserved.
    fn reshape(&mut self, width: usize, height: usize);

    /// Write a single point at the given column and row.
    fn set(&mut self, col: usize, row: usize, point: Point3f);
}

/// A grid of single precision points stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizedPointCloud {
    width: usize,
    height: usize,
    points: Vec<Point3f>,
}

impl OrganizedPointCloud {
    /// Create a new cloud with `width` columns and `height` rows, filled with points at the
    /// origin.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            points: vec![Point3f::origin(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in row-major order, so the point at `(col, row)` is at `row * width + col`.
    pub fn points(&self) -> &[Point3f] {
        &self.points
    }

    /// Resize the cloud, resetting every point to the origin.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.points.clear();
        self.points.resize(width * height, Point3f::origin());
    }

    /// Get a reference to the point at the given column and row. Panics if either index is out of
    /// bounds.
    pub fn at(&self, col: usize, row: usize) -> &Point3f {
        let i = self.index(col, row);
        &self.points[i]
    }

    pub fn at_mut(&mut self, col: usize, row: usize) -> &mut Point3f {
        let i = self.index(col, row);
        &mut self.points[i]
    }

    /// Iterate over the points which have all finite coordinates. Beams which did not return
    /// anything produce points at an enormous distance that overflow single precision, and those
    /// are skipped here.
    pub fn iter_valid(&self) -> impl Iterator<Item = &Point3f> {
        self.points.iter().filter(|p| p.coords.iter().all(|v| v.is_finite()))
    }

    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.width && row < self.height,
            "point ({}, {}) is outside of a {}x{} cloud",
            col,
            row,
            self.width,
            self.height
        );
        row * self.width + col
    }
}

impl OrganizedPoints for OrganizedPointCloud {
    fn reshape(&mut self, width: usize, height: usize) {
        self.resize(width, height);
    }

    fn set(&mut self, col: usize, row: usize, point: Point3f) {
        *self.at_mut(col, row) = point;
    }
}
