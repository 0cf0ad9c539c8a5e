use std::fmt;

use serde::{Deserialize, Serialize};

/// Unsigned EXIF rational. GPS angles are stored as three of these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Degrees/minutes/seconds magnitude of one coordinate axis. The hemisphere
/// is carried separately as a reference character ('N'/'S' or 'E'/'W').
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DmsCoordinate {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl DmsCoordinate {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }
}

/// The full set of GPS values written back to a file: both axes in DMS form
/// plus their reference characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GpsTags {
    pub latitude: DmsCoordinate,
    pub latitude_ref: char,
    pub longitude: DmsCoordinate,
    pub longitude_ref: char,
}
