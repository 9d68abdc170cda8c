//! This module contains tools for simulating sensors and sensor data

mod beam_grid;
mod lidar;

use crate::{Plane3, Ray3};

pub use beam_grid::{ANGLE_TOLERANCE, AngleSpec, BeamGrid, BeamGridConfig};
pub use lidar::{LidarSimulator, NO_HIT_RANGE, is_no_return, range_or_none};

/// A surface which a simulated beam can strike. Implementors report the ray parameter at which
/// the ray meets their surface, which may be negative if the surface is behind the ray origin, or
/// `None` if the ray never meets it.
pub trait RaySurface {
    fn intersection_parameter(&self, ray: &Ray3) -> Option<f64>;
}

impl RaySurface for Plane3 {
    fn intersection_parameter(&self, ray: &Ray3) -> Option<f64> {
        Plane3::intersection_parameter(self, ray)
    }
}
