use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub type PhotoId = u64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
    WebP,
    Unknown,
}

impl ImageFormat {
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    /// Formats the EXIF codec can write back to. BMP carries no EXIF block.
    pub fn supports_exif(self) -> bool {
        matches!(self, Self::Jpeg | Self::Png | Self::WebP)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Bmp => "BMP",
            Self::WebP => "WebP",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Capture summary extracted from a file's EXIF block. Absent tags stay
/// `None`; a coordinate without its companion reference tag counts as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    pub date_taken: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CaptureMetadata {
    pub fn has_gps(&self) -> bool {
        self.latitude.is_some() || self.longitude.is_some()
    }

    pub fn gps_pair(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhotoEntry {
    pub id: PhotoId,
    pub path: PathBuf,
    pub filename: String,
    pub file_size: u64,
    pub format: ImageFormat,
    pub thumbnail: Option<ThumbnailData>,
    pub metadata: CaptureMetadata,
    pub selected: bool,
}

impl PhotoEntry {
    pub fn from_path(id: PhotoId, path: PathBuf, format: ImageFormat) -> Self {
        let filename = path
            .file_name()
            .map(|value| value.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("unknown"));

        let file_size = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);

        Self {
            id,
            path,
            filename,
            file_size,
            format,
            thumbnail: None,
            metadata: CaptureMetadata::default(),
            selected: false,
        }
    }

    pub fn set_summary(&mut self, metadata: CaptureMetadata) {
        self.metadata = metadata;
    }
}
