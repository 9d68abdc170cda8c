use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a set of beam angles cannot be turned into a valid beam grid.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidBeamGrid {
    EmptyLatitudes,
    EmptyLongitudes,
    LatitudeOutOfRange { index: usize, value: f64 },
    LongitudeOutOfRange { index: usize, value: f64 },
}

impl Display for InvalidBeamGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBeamGrid::EmptyLatitudes => write!(f, "at least one latitude is required"),
            InvalidBeamGrid::EmptyLongitudes => write!(f, "at least one longitude is required"),
            InvalidBeamGrid::LatitudeOutOfRange { index, value } => {
                write!(f, "latitude {} at index {} is outside [-pi/2, pi/2]", value, index)
            }
            InvalidBeamGrid::LongitudeOutOfRange { index, value } => {
                write!(f, "longitude {} at index {} is outside [-pi, pi]", value, index)
            }
        }
    }
}

impl Error for InvalidBeamGrid {}
