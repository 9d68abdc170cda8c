mod organized_cloud;
mod plane3;

pub use organized_cloud::{OrganizedPointCloud, OrganizedPoints};
pub use plane3::Plane3;

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
pub type Iso3 = parry3d_f64::na::Isometry3<f64>;
pub type Ray3 = parry3d_f64::query::Ray;

/// Single precision point type used for simulated point cloud output
pub type Point3f = parry3d_f64::na::Point3<f32>;
