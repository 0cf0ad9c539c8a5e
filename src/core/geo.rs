use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{DmsCoordinate, GpsTags, Rational};

#[derive(Debug)]
pub struct GpsFormatError(pub String);

impl fmt::Display for GpsFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid GPS input: {}", self.0)
    }
}

impl std::error::Error for GpsFormatError {}

// ---------------------------------------------------------------------------
// Coordinate codec
// ---------------------------------------------------------------------------

/// Convert signed decimal degrees to a DMS magnitude. Seconds are stored as
/// a rational over 100 to keep two decimal digits of sub-second precision.
/// The sign is not encoded here; callers derive the hemisphere reference
/// from the original signed value.
pub fn decimal_to_dms(value: f64) -> DmsCoordinate {
    let absolute = value.abs();
    let degrees = absolute as u32;
    let minutes = ((absolute - degrees as f64) * 60.0) as u32;
    let seconds = (absolute - degrees as f64 - minutes as f64 / 60.0) * 3600.0;

    DmsCoordinate::new(
        Rational::new(degrees, 1),
        Rational::new(minutes, 1),
        Rational::new((seconds * 100.0).round() as u32, 100),
    )
}

/// Hemisphere reference for a signed latitude. Exactly 0 maps to 'N'.
pub fn latitude_ref(value: f64) -> char {
    if value >= 0.0 {
        'N'
    } else {
        'S'
    }
}

/// Hemisphere reference for a signed longitude. Exactly 0 maps to 'E'.
pub fn longitude_ref(value: f64) -> char {
    if value >= 0.0 {
        'E'
    } else {
        'W'
    }
}

/// Decode a latitude DMS magnitude into signed decimal degrees. Any
/// reference other than "N" negates, not just "S".
pub fn dms_to_latitude(dms: &DmsCoordinate, reference: &str) -> f64 {
    let magnitude = dms_magnitude(dms);
    if reference == "N" {
        magnitude
    } else {
        -magnitude
    }
}

/// Decode a longitude DMS magnitude into signed decimal degrees. Any
/// reference other than "E" negates.
pub fn dms_to_longitude(dms: &DmsCoordinate, reference: &str) -> f64 {
    let magnitude = dms_magnitude(dms);
    if reference == "E" {
        magnitude
    } else {
        -magnitude
    }
}

fn dms_magnitude(dms: &DmsCoordinate) -> f64 {
    dms.degrees.to_f64() + dms.minutes.to_f64() / 60.0 + dms.seconds.to_f64() / 3600.0
}

// ---------------------------------------------------------------------------
// GPS input validation and formatting
// ---------------------------------------------------------------------------

fn gps_pattern() -> &'static Regex {
    static GPS_PATTERN: OnceLock<Regex> = OnceLock::new();
    GPS_PATTERN
        .get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?, -?\d+(\.\d+)?$").expect("valid GPS pattern"))
}

/// True iff the input is two optionally-signed decimal numbers separated by
/// a literal comma-space. Values outside ±90/±180 still pass; only the
/// shape of the string is checked.
pub fn is_valid_gps(input: &str) -> bool {
    gps_pattern().is_match(input)
}

/// Parse a "lat, lon" decimal-degree string into the tag set written back
/// to a file.
pub fn parse_gps_input(input: &str) -> Result<GpsTags, GpsFormatError> {
    let (lat_text, lon_text) = input
        .split_once(", ")
        .ok_or_else(|| GpsFormatError(input.to_string()))?;

    let lat: f64 = lat_text
        .parse()
        .map_err(|_| GpsFormatError(input.to_string()))?;
    let lon: f64 = lon_text
        .parse()
        .map_err(|_| GpsFormatError(input.to_string()))?;

    Ok(GpsTags {
        latitude: decimal_to_dms(lat),
        latitude_ref: latitude_ref(lat),
        longitude: decimal_to_dms(lon),
        longitude_ref: longitude_ref(lon),
    })
}

/// Labelled display line for the info panel, with fixed placeholders for
/// absent components.
pub fn format_gps_for_display(latitude: Option<f64>, longitude: Option<f64>) -> String {
    let lat = latitude
        .map(|value| value.to_string())
        .unwrap_or_else(|| String::from("No GPS Latitude Data"));
    let lon = longitude
        .map(|value| value.to_string())
        .unwrap_or_else(|| String::from("No GPS Longitude Data"));

    format!("Latitude: {lat}, Longitude: {lon}")
}

/// Unlabelled "lat, lon" text placed back into the GPS edit field. Absent
/// components are simply omitted.
pub fn format_gps_input(latitude: Option<f64>, longitude: Option<f64>) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
        (Some(lat), None) => lat.to_string(),
        (None, Some(lon)) => lon.to_string(),
        (None, None) => String::new(),
    }
}
