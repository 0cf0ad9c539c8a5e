use std::fmt;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    mpsc::Sender,
};

use rayon::prelude::*;

use crate::core::metadata::MetadataEngine;
use crate::core::{dates, geo};
use crate::models::{BatchEdit, OperationResult, PhotoEntry, ProgressEvent};

#[derive(Debug)]
pub enum EditError {
    InvalidDate(String),
    InvalidGps(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(input) => {
                write!(f, "invalid date {input:?}, expected YYYY-MM-DD")
            }
            Self::InvalidGps(input) => {
                write!(f, "invalid GPS {input:?}, expected decimal degrees (lat, long)")
            }
        }
    }
}

impl std::error::Error for EditError {}

pub struct BatchProcessor;

impl BatchProcessor {
    /// Validate and convert the two input strings. This is the only way a
    /// `BatchEdit` comes into existence, so no file is touched until both
    /// values have passed.
    pub fn prepare(date_input: &str, gps_input: &str) -> Result<BatchEdit, EditError> {
        if !dates::is_valid_date(date_input) {
            return Err(EditError::InvalidDate(date_input.to_string()));
        }

        if !geo::is_valid_gps(gps_input) {
            return Err(EditError::InvalidGps(gps_input.to_string()));
        }

        let exif_date = dates::to_exif_date(date_input)
            .map_err(|_| EditError::InvalidDate(date_input.to_string()))?;
        let gps = geo::parse_gps_input(gps_input)
            .map_err(|_| EditError::InvalidGps(gps_input.to_string()))?;

        Ok(BatchEdit { exif_date, gps })
    }

    pub fn apply(
        photos: &[PhotoEntry],
        edit: &BatchEdit,
        progress_tx: Sender<ProgressEvent>,
    ) -> Vec<OperationResult> {
        Self::apply_with_cancel(photos, edit, progress_tx, None)
    }

    /// Apply one prepared edit to every entry. Failures are isolated per
    /// file; a raised cancel flag skips the files not yet started.
    pub fn apply_with_cancel(
        photos: &[PhotoEntry],
        edit: &BatchEdit,
        progress_tx: Sender<ProgressEvent>,
        cancel_flag: Option<&AtomicBool>,
    ) -> Vec<OperationResult> {
        let total = photos.len();
        let progress_counter = AtomicUsize::new(0);

        let mut indexed: Vec<(usize, OperationResult)> = photos
            .par_iter()
            .enumerate()
            .filter_map(|(index, photo)| {
                if let Some(flag) = cancel_flag {
                    if flag.load(Ordering::Relaxed) {
                        return None;
                    }
                }

                let result = match MetadataEngine::apply_edit(&photo.path, edit) {
                    Ok(()) => OperationResult::success(photo.id, photo.path.clone()),
                    Err(err) => {
                        OperationResult::failure(photo.id, photo.path.clone(), err.to_string())
                    }
                };

                let current = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                let _ = progress_tx.send(ProgressEvent {
                    current,
                    total,
                    filename: photo.filename.clone(),
                    success: result.success,
                });

                Some((index, result))
            })
            .collect();

        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, result)| result).collect()
    }
}
