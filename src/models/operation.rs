use std::path::PathBuf;

use crate::models::{GpsTags, PhotoId};

/// A fully validated and converted batch edit. Constructing one is the only
/// way input strings reach the write path, so no file is touched until both
/// values have passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchEdit {
    pub exif_date: String,
    pub gps: GpsTags,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationResult {
    pub photo_id: PhotoId,
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

impl OperationResult {
    pub fn success(photo_id: PhotoId, path: PathBuf) -> Self {
        Self {
            photo_id,
            path,
            success: true,
            error: None,
        }
    }

    pub fn failure(photo_id: PhotoId, path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            photo_id,
            path,
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgressEvent {
    pub current: usize,
    pub total: usize,
    pub filename: String,
    pub success: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl OperationSummary {
    pub fn from_results(expected_total: usize, results: &[OperationResult]) -> Self {
        let succeeded = results.iter().filter(|result| result.success).count();
        let failed = results.len().saturating_sub(succeeded);
        let cancelled = expected_total.saturating_sub(results.len());

        Self {
            total: expected_total,
            succeeded,
            failed,
            cancelled,
        }
    }
}
