use crate::geom3::{Iso3, Point3, Ray3, UnitVec3};
use serde::{Deserialize, Serialize};

/// An infinite oriented plane in 3D space, represented by a unit normal and the signed offset `d`
/// such that every point `x` on the plane satisfies `normal · x = d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3 {
    pub normal: UnitVec3,
    pub d: f64,
}

impl Plane3 {
    pub fn new(normal: UnitVec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Create a new plane which is in the same position as the input plane, but with the normal
    /// direction inverted.
    pub fn inverted_normal(&self) -> Self {
        Self::new(-self.normal, -self.d)
    }

    /// Measure and return the signed distance from the plane to a point in 3D space. The sign of
    /// the distance indicates whether the point is above or below the plane according to the
    /// plane's normal vector.
    ///
    /// # Arguments
    ///
    /// * `point`: the point to measure
    ///
    /// returns: f64
    ///
    /// # Examples
    ///
    /// ```
    /// use lidar_sim::{Plane3, Point3, UnitVec3, Vector3};
    /// let plane = Plane3::new(UnitVec3::new_normalize(Vector3::z()), 2.0);
    /// assert_eq!(plane.signed_distance_to_point(&Point3::new(1.0, 1.0, 0.5)), -1.5);
    /// ```
    pub fn signed_distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) - self.d
    }

    /// Measure and return the distance from the plane to a point in 3D space. The distance is
    /// always positive. If you need to know whether the point is above or below the plane, use
    /// `signed_distance_to_point`.
    pub fn distance_to_point(&self, point: &Point3) -> f64 {
        self.signed_distance_to_point(point).abs()
    }

    /// Project a point onto the plane, returning the closest point on the plane to the input.
    pub fn project_point(&self, point: &Point3) -> Point3 {
        point - self.normal.into_inner() * self.signed_distance_to_point(point)
    }

    /// Transform the plane by an isometry
    ///
    /// # Arguments
    ///
    /// * `iso`: The isometry to transform the plane by
    ///
    /// returns: Plane3
    pub fn transform_by(&self, iso: &Iso3) -> Self {
        let on_plane = Point3::from(self.normal.into_inner() * self.d);
        let normal = iso * self.normal;
        let point = iso * on_plane;
        Self::from((&normal, &point))
    }

    /// Compute the ray parameter `t` at which `ray.origin + t * ray.dir` lies on the plane. The
    /// result may be negative, meaning the plane is behind the ray origin. Returns `None` when
    /// the ray is exactly parallel to the plane or the parameter is not finite.
    ///
    /// The ray direction does not need to be normalized, but the parameter is only a distance
    /// when it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use lidar_sim::{Plane3, Point3, Ray3, UnitVec3, Vector3};
    /// let plane = Plane3::new(UnitVec3::new_normalize(Vector3::x()), 5.0);
    /// let ray = Ray3::new(Point3::new(1.0, 0.0, 0.0), Vector3::x());
    /// assert_eq!(plane.intersection_parameter(&ray), Some(4.0));
    /// ```
    pub fn intersection_parameter(&self, ray: &Ray3) -> Option<f64> {
        let denom = self.normal.dot(&ray.dir);
        if denom == 0.0 {
            return None;
        }

        let t = (self.d - self.normal.dot(&ray.origin.coords)) / denom;
        if t.is_finite() { Some(t) } else { None }
    }
}

impl From<(&Point3, &Point3, &Point3)> for Plane3 {
    /// Create a Plane3 from three points, with the normal following the right hand rule from
    /// `p1 -> p2 -> p3`.
    fn from((p1, p2, p3): (&Point3, &Point3, &Point3)) -> Self {
        let normal = UnitVec3::new_normalize((p2 - p1).cross(&(p3 - p1)));
        Self::from((&normal, p1))
    }
}

impl From<(&UnitVec3, &Point3)> for Plane3 {
    fn from((normal, point): (&UnitVec3, &Point3)) -> Self {
        let d = normal.dot(&point.coords);
        Self::new(*normal, d)
    }
}
