//! The angular layout of a scanning range sensor. A `BeamGrid` is the cartesian product of a set
//! of latitudes (elevation above the sensor's horizontal plane) and a set of longitudes (azimuth
//! around the sensor's z axis), each pair defining the direction of one beam.

use crate::Result;
use crate::common::linear_space;
use crate::errors::InvalidBeamGrid;
use crate::geom3::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// How far outside of their nominal range latitudes and longitudes may fall before they are
/// rejected.
pub const ANGLE_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub struct BeamGrid {
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl BeamGrid {
    /// Create a new beam grid from a set of latitude and longitude angles, in radians. Both sets
    /// must have at least one value, latitudes must be in [-pi/2, pi/2] and longitudes must be in
    /// [-pi, pi], with `ANGLE_TOLERANCE` of slack on either end.
    ///
    /// For a planar (2D) scanner use a single latitude of `0.0`, and for evenly spaced angles see
    /// `from_linear_spaces`.
    ///
    /// # Arguments
    ///
    /// * `latitudes`: the beam elevations, which become the rows of the range grid
    /// * `longitudes`: the beam azimuths, which become the columns of the range grid
    ///
    /// returns: Result<BeamGrid, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use lidar_sim::BeamGrid;
    /// let grid = BeamGrid::try_new(vec![-0.1, 0.0, 0.1], [0.0, 1.0]).unwrap();
    /// assert_eq!(grid.height(), 3);
    /// assert_eq!(grid.width(), 2);
    /// assert!(BeamGrid::try_new(vec![2.0], vec![0.0]).is_err());
    /// ```
    pub fn try_new(
        latitudes: impl Into<Vec<f64>>,
        longitudes: impl Into<Vec<f64>>,
    ) -> Result<Self> {
        let latitudes = latitudes.into();
        let longitudes = longitudes.into();

        if let Err(e) = validate(&latitudes, &longitudes) {
            log::warn!("rejected beam grid: {}", e);
            return Err(e.into());
        }

        Ok(Self {
            latitudes,
            longitudes,
        })
    }

    /// Create a beam grid from evenly spaced latitudes and longitudes, with both ends of each
    /// range included. A count of one produces a single angle at the start of its range.
    pub fn from_linear_spaces(
        lat_start: f64,
        lat_end: f64,
        lat_count: usize,
        lon_start: f64,
        lon_end: f64,
        lon_count: usize,
    ) -> Result<Self> {
        Self::try_new(
            linear_space(lat_start, lat_end, lat_count),
            linear_space(lon_start, lon_end, lon_count),
        )
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// The number of latitudes, which is the number of rows in a range grid
    pub fn height(&self) -> usize {
        self.latitudes.len()
    }

    /// The number of longitudes, which is the number of columns in a range grid
    pub fn width(&self) -> usize {
        self.longitudes.len()
    }

    pub fn beam_count(&self) -> usize {
        self.height() * self.width()
    }

    /// The unit direction of the beam at latitude index `i` and longitude index `j`, in the
    /// sensor's local frame. Panics if either index is out of range.
    pub fn direction(&self, i: usize, j: usize) -> Vector3 {
        let (sin_lat, cos_lat) = self.latitudes[i].sin_cos();
        let (sin_lon, cos_lon) = self.longitudes[j].sin_cos();
        Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }
}

fn validate(latitudes: &[f64], longitudes: &[f64]) -> std::result::Result<(), InvalidBeamGrid> {
    if latitudes.is_empty() {
        return Err(InvalidBeamGrid::EmptyLatitudes);
    }
    if longitudes.is_empty() {
        return Err(InvalidBeamGrid::EmptyLongitudes);
    }

    // The negated comparisons also catch NaN
    if let Some((index, &value)) = latitudes
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.abs() <= FRAC_PI_2 + ANGLE_TOLERANCE))
    {
        return Err(InvalidBeamGrid::LatitudeOutOfRange { index, value });
    }

    if let Some((index, &value)) = longitudes
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.abs() <= PI + ANGLE_TOLERANCE))
    {
        return Err(InvalidBeamGrid::LongitudeOutOfRange { index, value });
    }

    Ok(())
}

/// A description of one axis of a beam grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleSpec {
    /// An explicit list of angles
    Explicit(Vec<f64>),

    /// `count` evenly spaced angles from `start` to `end`, inclusive
    Linear { start: f64, end: f64, count: usize },
}

impl AngleSpec {
    fn angles(&self, degrees: bool) -> Vec<f64> {
        let values = match self {
            AngleSpec::Explicit(values) => values.clone(),
            AngleSpec::Linear { start, end, count } => linear_space(*start, *end, *count),
        };

        if degrees {
            values.into_iter().map(f64::to_radians).collect()
        } else {
            values
        }
    }
}

/// Serializable configuration for a `BeamGrid`, so that sensor layouts used by tests can live in
/// fixture files next to the scenes they are run against.
///
/// # Examples
///
/// ```
/// use lidar_sim::BeamGridConfig;
/// let text = r#"{
///     "latitudes": { "linear": { "start": -15.0, "end": 15.0, "count": 16 } },
///     "longitudes": { "linear": { "start": -180.0, "end": 179.0, "count": 360 } },
///     "degrees": true
/// }"#;
/// let grid = BeamGridConfig::from_json(text).unwrap().to_grid().unwrap();
/// assert_eq!(grid.height(), 16);
/// assert_eq!(grid.width(), 360);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamGridConfig {
    pub latitudes: AngleSpec,
    pub longitudes: AngleSpec,

    /// If true, all angles in the config are given in degrees rather than radians
    #[serde(default)]
    pub degrees: bool,
}

impl BeamGridConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_grid(&self) -> Result<BeamGrid> {
        BeamGrid::try_new(
            self.latitudes.angles(self.degrees),
            self.longitudes.angles(self.degrees),
        )
    }
}

impl TryFrom<&BeamGridConfig> for BeamGrid {
    type Error = Box<dyn std::error::Error>;

    fn try_from(config: &BeamGridConfig) -> Result<Self> {
        config.to_grid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn grid_error(latitudes: Vec<f64>, longitudes: Vec<f64>) -> InvalidBeamGrid {
        let e = BeamGrid::try_new(latitudes, longitudes).unwrap_err();
        e.downcast_ref::<InvalidBeamGrid>().unwrap().clone()
    }

    #[test]
    fn test_empty_latitudes_rejected() {
        assert_eq!(grid_error(vec![], vec![0.0]), InvalidBeamGrid::EmptyLatitudes);
    }

    #[test]
    fn test_empty_longitudes_rejected() {
        assert_eq!(grid_error(vec![0.0], vec![]), InvalidBeamGrid::EmptyLongitudes);
    }

    #[test_case(FRAC_PI_2 + 0.002)]
    #[test_case(-FRAC_PI_2 - 0.002)]
    #[test_case(3.0)]
    #[test_case(f64::NAN)]
    #[test_case(f64::INFINITY)]
    fn test_latitude_out_of_range(value: f64) {
        match grid_error(vec![0.0, value], vec![0.0]) {
            InvalidBeamGrid::LatitudeOutOfRange { index, .. } => assert_eq!(index, 1),
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test_case(PI + 0.002)]
    #[test_case(-PI - 0.002)]
    #[test_case(2.0 * PI)]
    #[test_case(f64::NAN)]
    fn test_longitude_out_of_range(value: f64) {
        match grid_error(vec![0.0], vec![value, 0.0]) {
            InvalidBeamGrid::LongitudeOutOfRange { index, .. } => assert_eq!(index, 0),
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test_case(FRAC_PI_2, PI)]
    #[test_case(-FRAC_PI_2, -PI)]
    #[test_case(FRAC_PI_2 + 0.0009, PI + 0.0009)]
    #[test_case(-FRAC_PI_2 - 0.0009, -PI - 0.0009)]
    fn test_boundary_within_tolerance(lat: f64, lon: f64) {
        assert!(BeamGrid::try_new(vec![lat], vec![lon]).is_ok());
    }

    #[test]
    fn test_slices_and_arrays_accepted() {
        let lats = [0.0, 0.1];
        let grid = BeamGrid::try_new(&lats[..], [0.5]).unwrap();
        assert_eq!(grid.latitudes(), &[0.0, 0.1]);
        assert_eq!(grid.longitudes(), &[0.5]);
        assert_eq!(grid.beam_count(), 2);
    }

    #[test_case(0.0, 0.0, 1.0, 0.0, 0.0)]
    #[test_case(0.0, FRAC_PI_2, 0.0, 1.0, 0.0)]
    #[test_case(0.0, PI, -1.0, 0.0, 0.0)]
    #[test_case(FRAC_PI_2, 1.0, 0.0, 0.0, 1.0)]
    #[test_case(-FRAC_PI_2, -2.0, 0.0, 0.0, -1.0)]
    fn test_direction(lat: f64, lon: f64, x: f64, y: f64, z: f64) {
        let grid = BeamGrid::try_new(vec![lat], vec![lon]).unwrap();
        let d = grid.direction(0, 0);
        assert_relative_eq!(d, Vector3::new(x, y, z), epsilon = 1e-12);
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_linear_spaces() {
        let grid = BeamGrid::from_linear_spaces(-0.2, 0.2, 5, -PI, PI, 9).unwrap();
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.width(), 9);
        assert_relative_eq!(grid.latitudes()[2], 0.0, epsilon = 1e-12);
        assert_eq!(grid.longitudes()[8], PI);
    }

    #[test]
    fn test_from_linear_spaces_empty_rejected() {
        assert!(BeamGrid::from_linear_spaces(0.0, 0.0, 0, -PI, PI, 9).is_err());
    }

    #[test]
    fn test_config_degrees() {
        let text = r#"{
            "latitudes": { "explicit": [0.0, 45.0] },
            "longitudes": { "linear": { "start": -90.0, "end": 90.0, "count": 3 } },
            "degrees": true
        }"#;
        let grid = BeamGrid::try_from(&BeamGridConfig::from_json(text).unwrap()).unwrap();
        assert_relative_eq!(grid.latitudes()[1], PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(grid.longitudes()[0], -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(grid.longitudes()[2], FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_config_radians_default() {
        let text = r#"{
            "latitudes": { "explicit": [0.0] },
            "longitudes": { "explicit": [3.0] }
        }"#;
        let config = BeamGridConfig::from_json(text).unwrap();
        assert!(!config.degrees);
        assert_eq!(config.to_grid().unwrap().longitudes(), &[3.0]);
    }

    #[test]
    fn test_config_out_of_range_rejected() {
        let config = BeamGridConfig {
            latitudes: AngleSpec::Explicit(vec![100.0]),
            longitudes: AngleSpec::Explicit(vec![0.0]),
            degrees: true,
        };
        assert!(config.to_grid().is_err());
    }

    #[test]
    fn test_config_malformed_json() {
        assert!(BeamGridConfig::from_json("{ \"latitudes\": 3 }").is_err());
    }
}
