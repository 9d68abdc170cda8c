//! Tools for generating synthetic LIDAR data from simple planar scenes, intended for use as test
//! input to mapping and perception code.

use std::error::Error;

pub mod common;
pub mod errors;
pub mod geom3;
pub mod sensors;

pub use parry3d_f64::na;

pub use geom3::{
    Iso3, OrganizedPointCloud, OrganizedPoints, Plane3, Point3, Point3f, Ray3, UnitVec3, Vector3,
};
pub use sensors::{BeamGrid, BeamGridConfig, LidarSimulator, NO_HIT_RANGE, RaySurface};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;
