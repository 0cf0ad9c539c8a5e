use std::fmt;
use std::path::{Path, PathBuf};

use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata as ExifMetadata;

use crate::core::{dates, formats, geo};
use crate::models::{BatchEdit, CaptureMetadata, DmsCoordinate, GpsTags, Rational};

#[derive(Debug)]
pub enum MetadataError {
    FileNotFound(PathBuf),
    UnsupportedFormat(PathBuf),
    Write(PathBuf, String),
    Io(std::io::Error),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::UnsupportedFormat(path) => {
                write!(f, "format does not support EXIF: {}", path.display())
            }
            Self::Write(path, message) => {
                write!(f, "failed to write metadata to {}: {message}", path.display())
            }
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for MetadataError {}

impl From<std::io::Error> for MetadataError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;

pub struct MetadataEngine;

impl MetadataEngine {
    /// Extract the capture summary shown in the info panel: the original
    /// capture date in user-facing form and the GPS position in signed
    /// decimal degrees. Absent tags stay absent; a coordinate without its
    /// companion reference tag counts as absent too.
    pub fn read_summary(path: &Path) -> Result<CaptureMetadata> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.to_path_buf()));
        }

        let Ok(exif) = ExifMetadata::new_from_path(path) else {
            return Ok(CaptureMetadata::default());
        };

        let tags: Vec<&ExifTag> = (&exif).into_iter().collect();

        let mut date_raw: Option<String> = None;
        let mut lat_ref: Option<String> = None;
        let mut lat_dms: Option<DmsCoordinate> = None;
        let mut lon_ref: Option<String> = None;
        let mut lon_dms: Option<DmsCoordinate> = None;

        for tag in tags {
            match tag {
                ExifTag::DateTimeOriginal(value) => {
                    date_raw = Some(clean_string(value));
                }
                ExifTag::GPSLatitudeRef(value) => {
                    lat_ref = Some(clean_string(value));
                }
                ExifTag::GPSLatitude(rationals) if rationals.len() >= 3 => {
                    lat_dms = Some(dms_from_exif(rationals));
                }
                ExifTag::GPSLongitudeRef(value) => {
                    lon_ref = Some(clean_string(value));
                }
                ExifTag::GPSLongitude(rationals) if rationals.len() >= 3 => {
                    lon_dms = Some(dms_from_exif(rationals));
                }
                _ => {}
            }
        }

        let latitude = match (lat_dms, &lat_ref) {
            (Some(dms), Some(reference)) => Some(geo::dms_to_latitude(&dms, reference)),
            _ => None,
        };

        let longitude = match (lon_dms, &lon_ref) {
            (Some(dms), Some(reference)) => Some(geo::dms_to_longitude(&dms, reference)),
            _ => None,
        };

        Ok(CaptureMetadata {
            date_taken: date_raw.as_deref().and_then(dates::from_exif_date),
            latitude,
            longitude,
        })
    }

    /// Write a prepared batch edit into one file: DateTimeOriginal plus the
    /// four GPS tags. Existing unrelated tags are preserved by the codec.
    pub fn apply_edit(path: &Path, edit: &BatchEdit) -> Result<()> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.to_path_buf()));
        }

        if !formats::detect_format(path).supports_exif() {
            return Err(MetadataError::UnsupportedFormat(path.to_path_buf()));
        }

        let mut exif = match ExifMetadata::new_from_path(path) {
            Ok(existing) => existing,
            Err(_) => ExifMetadata::new(),
        };

        exif.set_tag(ExifTag::DateTimeOriginal(edit.exif_date.clone()));
        write_gps_tags(&mut exif, &edit.gps);

        exif.write_to_file(path)
            .map_err(|err| MetadataError::Write(path.to_path_buf(), err.to_string()))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EXIF tag conversion helpers
// ---------------------------------------------------------------------------

fn write_gps_tags(exif: &mut ExifMetadata, gps: &GpsTags) {
    exif.set_tag(ExifTag::GPSLatitudeRef(gps.latitude_ref.to_string()));
    exif.set_tag(ExifTag::GPSLatitude(dms_to_exif(&gps.latitude)));
    exif.set_tag(ExifTag::GPSLongitudeRef(gps.longitude_ref.to_string()));
    exif.set_tag(ExifTag::GPSLongitude(dms_to_exif(&gps.longitude)));
}

fn dms_to_exif(dms: &DmsCoordinate) -> Vec<little_exif::rational::uR64> {
    vec![ur64(dms.degrees), ur64(dms.minutes), ur64(dms.seconds)]
}

fn dms_from_exif(rationals: &[little_exif::rational::uR64]) -> DmsCoordinate {
    DmsCoordinate::new(
        Rational::new(rationals[0].nominator, rationals[0].denominator),
        Rational::new(rationals[1].nominator, rationals[1].denominator),
        Rational::new(rationals[2].nominator, rationals[2].denominator),
    )
}

fn ur64(value: Rational) -> little_exif::rational::uR64 {
    little_exif::rational::uR64 {
        nominator: value.numerator,
        denominator: value.denominator,
    }
}

fn clean_string(value: &str) -> String {
    value.trim_end_matches('\0').trim().to_string()
}
