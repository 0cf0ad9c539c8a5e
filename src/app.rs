use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::core::batch::{BatchProcessor, EditError};
use crate::core::geo;
use crate::core::loader::{
    DirectoryLoader, LoadError, LoadEvent, LoaderHandle, DEFAULT_THUMBNAIL_EDGE,
    MAX_THUMBNAIL_EDGE, MIN_THUMBNAIL_EDGE,
};
use crate::core::metadata::{MetadataEngine, MetadataError};
use crate::models::{OperationResult, OperationSummary, PhotoEntry, ProgressEvent};

#[derive(Debug)]
pub enum AppError {
    NoSelection,
    InvalidPhotoIndex(usize),
    Edit(EditError),
    Load(LoadError),
    Metadata(MetadataError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => write!(f, "no images selected"),
            Self::InvalidPhotoIndex(index) => write!(f, "invalid photo index: {index}"),
            Self::Edit(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Metadata(err) => write!(f, "metadata error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<EditError> for AppError {
    fn from(value: EditError) -> Self {
        Self::Edit(value)
    }
}

impl From<LoadError> for AppError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<MetadataError> for AppError {
    fn from(value: MetadataError) -> Self {
        Self::Metadata(value)
    }
}

/// Info-panel content and edit-field prefills for a single selected photo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhotoDetails {
    pub filename: String,
    pub summary_lines: Vec<String>,
    pub date_input: String,
    pub gps_input: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectionDetails {
    Empty,
    Single(PhotoDetails),
    Multiple { count: usize },
}

/// Everything the GUI shell binds to. Holds no widget references; the shell
/// renders from this state and calls back into it.
#[derive(Debug)]
pub struct AppState {
    pub current_directory: Option<PathBuf>,
    pub photos: Vec<PhotoEntry>,
    pub selected_indices: HashSet<usize>,
    pub thumbnail_edge: u32,
    pub is_loading: bool,
    pub load_progress: Option<(usize, usize)>,
    pub is_processing: bool,
    pub progress: Option<ProgressEvent>,
    pub operation_results: Vec<OperationResult>,
    pub last_summary: Option<OperationSummary>,
    pub status: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_directory: None,
            photos: Vec::new(),
            selected_indices: HashSet::new(),
            thumbnail_edge: DEFAULT_THUMBNAIL_EDGE,
            is_loading: false,
            load_progress: None,
            is_processing: false,
            progress: None,
            operation_results: Vec::new(),
            last_summary: None,
            status: None,
        }
    }
}

impl AppState {
    /// Start loading a directory in the background. The previous photo list
    /// and selection are discarded immediately; entries arrive through
    /// `handle_load_event`.
    pub fn begin_loading(&mut self, dir: PathBuf) -> Result<LoaderHandle, AppError> {
        let handle = DirectoryLoader::spawn(dir.clone(), self.thumbnail_edge)?;

        self.current_directory = Some(dir);
        self.photos.clear();
        self.selected_indices.clear();
        self.is_loading = true;
        self.load_progress = None;
        Ok(handle)
    }

    pub fn handle_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Progress { current, total, .. } => {
                self.load_progress = Some((current, total));
            }
            LoadEvent::Finished(entries) => {
                let directory = self
                    .current_directory
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_default();

                self.status = Some(format!("Loaded {} images from {directory}", entries.len()));
                self.photos = entries;
                self.is_loading = false;
                self.load_progress = None;
            }
        }
    }

    pub fn set_thumbnail_edge(&mut self, edge: u32) {
        self.thumbnail_edge = edge.clamp(MIN_THUMBNAIL_EDGE, MAX_THUMBNAIL_EDGE);
    }

    pub fn select_photo(&mut self, index: usize, additive: bool) {
        if index >= self.photos.len() {
            return;
        }

        if !additive {
            self.selected_indices.clear();
        }

        self.selected_indices.insert(index);
        self.sync_selection_flags();
    }

    pub fn toggle_photo_selection(&mut self, index: usize) {
        if index >= self.photos.len() {
            return;
        }

        if self.selected_indices.contains(&index) {
            self.selected_indices.remove(&index);
        } else {
            self.selected_indices.insert(index);
        }

        self.sync_selection_flags();
    }

    pub fn clear_selection(&mut self) {
        self.selected_indices.clear();
        self.sync_selection_flags();
    }

    pub fn selected_photos(&self) -> Vec<&PhotoEntry> {
        self.selected_indices_sorted()
            .into_iter()
            .filter_map(|index| self.photos.get(index))
            .collect()
    }

    /// What the info panel shows for the current selection. A single photo
    /// is re-read from disk so the panel reflects what is actually stored;
    /// read errors become a panel line rather than a failure.
    pub fn selection_details(&self) -> SelectionDetails {
        let indices = self.selected_indices_sorted();

        match indices.as_slice() {
            [] => SelectionDetails::Empty,
            [index] => {
                let Some(photo) = self.photos.get(*index) else {
                    return SelectionDetails::Empty;
                };
                SelectionDetails::Single(describe_photo(photo))
            }
            _ => SelectionDetails::Multiple {
                count: indices.len(),
            },
        }
    }

    /// Validate the two edit fields and apply them to every selected photo.
    /// Invalid input fails here, before any file is touched.
    pub fn apply_batch_edit(
        &mut self,
        date_input: &str,
        gps_input: &str,
    ) -> Result<OperationSummary, AppError> {
        let edit = BatchProcessor::prepare(date_input, gps_input)?;

        let selected_indices = self.selected_indices_sorted();
        if selected_indices.is_empty() {
            return Err(AppError::NoSelection);
        }

        let selected_photos = selected_indices
            .iter()
            .filter_map(|&index| self.photos.get(index).cloned())
            .collect::<Vec<_>>();

        let (progress_tx, progress_rx) = mpsc::channel();

        self.is_processing = true;
        let results = BatchProcessor::apply(&selected_photos, &edit, progress_tx);

        for event in progress_rx.try_iter() {
            self.progress = Some(event);
        }

        self.is_processing = false;
        self.operation_results = results.clone();
        let summary = OperationSummary::from_results(selected_photos.len(), &results);
        self.last_summary = Some(summary.clone());

        for &index in &selected_indices {
            let _ = self.refresh_photo(index);
        }

        self.status = Some(if summary.failed == 0 {
            String::from("Changes applied successfully")
        } else {
            format!("{} of {} files failed", summary.failed, summary.total)
        });

        Ok(summary)
    }

    /// Re-read one photo's capture summary from disk.
    pub fn refresh_photo(&mut self, index: usize) -> Result<(), AppError> {
        let photo = self
            .photos
            .get_mut(index)
            .ok_or(AppError::InvalidPhotoIndex(index))?;

        let summary = MetadataEngine::read_summary(&photo.path)?;
        photo.set_summary(summary);
        Ok(())
    }

    fn selected_indices_sorted(&self) -> Vec<usize> {
        let mut indices = self.selected_indices.iter().copied().collect::<Vec<_>>();
        indices.sort_unstable();
        indices
    }

    fn sync_selection_flags(&mut self) {
        for (index, photo) in self.photos.iter_mut().enumerate() {
            photo.selected = self.selected_indices.contains(&index);
        }
    }
}

fn describe_photo(photo: &PhotoEntry) -> PhotoDetails {
    let summary = match MetadataEngine::read_summary(&photo.path) {
        Ok(summary) => summary,
        Err(err) => {
            return PhotoDetails {
                filename: photo.filename.clone(),
                summary_lines: vec![format!(
                    "{}: error reading EXIF data: {err}",
                    photo.filename
                )],
                date_input: String::new(),
                gps_input: String::new(),
            };
        }
    };

    let mut lines = vec![format!("File: {}", photo.filename)];

    if let Some(date) = &summary.date_taken {
        lines.push(format!("Original Creation Date: {date}"));
    }

    let gps_input = geo::format_gps_input(summary.latitude, summary.longitude);
    if summary.has_gps() {
        lines.push(format!("GPS Coordinates: {gps_input}"));
    }

    PhotoDetails {
        filename: photo.filename.clone(),
        summary_lines: lines,
        date_input: summary.date_taken.unwrap_or_default(),
        gps_input,
    }
}
