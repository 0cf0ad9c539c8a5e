use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rayon::prelude::*;

use crate::core::formats;
use crate::core::metadata::MetadataEngine;
use crate::models::{PhotoEntry, ThumbnailData};

pub const MIN_THUMBNAIL_EDGE: u32 = 50;
pub const MAX_THUMBNAIL_EDGE: u32 = 200;
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 100;

#[derive(Debug)]
pub enum LoadError {
    DirectoryNotFound(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryNotFound(path) => {
                write!(f, "directory not found: {}", path.display())
            }
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Events emitted by the worker: one progress event per file, then a single
/// terminal `Finished` carrying the entries in scan order.
#[derive(Clone, Debug)]
pub enum LoadEvent {
    Progress {
        current: usize,
        total: usize,
        filename: String,
    },
    Finished(Vec<PhotoEntry>),
}

/// Enumerate the image files in a directory, sorted by file name.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && formats::is_supported(path))
        .collect();

    paths.sort();
    Ok(paths)
}

pub struct DirectoryLoader;

impl DirectoryLoader {
    /// Start a worker thread that decodes a thumbnail and reads the capture
    /// summary for every image in the directory. The handle's channel first
    /// carries per-file progress, then the terminal result; cancelling stops
    /// further decoding and the terminal event carries whatever completed.
    pub fn spawn(dir: PathBuf, thumbnail_edge: u32) -> Result<LoaderHandle, LoadError> {
        let paths = scan_directory(&dir)?;
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_worker = Arc::clone(&cancel);

        let thread = thread::spawn(move || {
            let entries = load_entries(&paths, thumbnail_edge, &tx, &cancel_worker);
            let _ = tx.send(LoadEvent::Finished(entries));
        });

        Ok(LoaderHandle {
            events: rx,
            cancel,
            thread: Some(thread),
        })
    }
}

pub struct LoaderHandle {
    events: Receiver<LoadEvent>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl LoaderHandle {
    pub fn events(&self) -> &Receiver<LoadEvent> {
        &self.events
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn load_entries(
    paths: &[PathBuf],
    thumbnail_edge: u32,
    progress_tx: &Sender<LoadEvent>,
    cancel_flag: &AtomicBool,
) -> Vec<PhotoEntry> {
    let total = paths.len();
    let progress_counter = AtomicUsize::new(0);

    let mut indexed: Vec<(usize, PhotoEntry)> = paths
        .par_iter()
        .enumerate()
        .filter_map(|(index, path)| {
            if cancel_flag.load(Ordering::Relaxed) {
                return None;
            }

            let format = formats::detect_format(path);
            let mut entry = PhotoEntry::from_path(index as u64 + 1, path.clone(), format);
            entry.thumbnail = decode_thumbnail(path, thumbnail_edge);
            if let Ok(summary) = MetadataEngine::read_summary(path) {
                entry.set_summary(summary);
            }

            let current = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
            let _ = progress_tx.send(LoadEvent::Progress {
                current,
                total,
                filename: entry.filename.clone(),
            });

            Some((index, entry))
        })
        .collect();

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, entry)| entry).collect()
}

fn decode_thumbnail(path: &Path, edge: u32) -> Option<ThumbnailData> {
    let image = image::open(path).ok()?;
    let thumbnail = image.thumbnail(edge, edge).to_rgba8();

    Some(ThumbnailData {
        width: thumbnail.width(),
        height: thumbnail.height(),
        pixels: thumbnail.into_raw(),
    })
}
