mod coord;
mod operation;
mod photo;

pub use coord::{DmsCoordinate, GpsTags, Rational};
pub use operation::{BatchEdit, OperationResult, OperationSummary, ProgressEvent};
pub use photo::{CaptureMetadata, ImageFormat, PhotoEntry, PhotoId, ThumbnailData};
