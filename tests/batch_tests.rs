use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use exif_dategeo::core::batch::{BatchProcessor, EditError};
use exif_dategeo::core::metadata::MetadataEngine;
use exif_dategeo::models::{ImageFormat, OperationSummary, PhotoEntry};

const TOLERANCE: f64 = 1.0 / 360_000.0;

fn unique_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("exif_dategeo_{name}_{stamp}.{ext}"));
    path
}

fn write_sample_image(path: &Path) {
    let mut img = image::RgbImage::new(8, 8);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Rgb([(x * 30) as u8, (y * 30) as u8, 120]);
    }
    img.save(path).expect("should write sample image");
}

#[test]
fn prepare_rejects_invalid_date() {
    let result = BatchProcessor::prepare("2024-02-30", "1.0, 2.0");
    assert!(matches!(result, Err(EditError::InvalidDate(_))));
}

#[test]
fn prepare_rejects_invalid_gps() {
    let result = BatchProcessor::prepare("2024-03-05", "40.7128,-74.0060");
    assert!(matches!(result, Err(EditError::InvalidGps(_))));
}

#[test]
fn prepare_converts_both_values() {
    let edit = BatchProcessor::prepare("2024-03-05", "-33.8688, 151.2093")
        .expect("valid input should prepare");

    assert_eq!(edit.exif_date, "2024:03:05 00:00:00");
    assert_eq!(edit.gps.latitude_ref, 'S');
    assert_eq!(edit.gps.longitude_ref, 'E');
}

#[test]
fn apply_updates_every_selected_file() {
    let file_a = unique_path("apply_a", "jpg");
    let file_b = unique_path("apply_b", "jpg");
    write_sample_image(&file_a);
    write_sample_image(&file_b);

    let photos = vec![
        PhotoEntry::from_path(1, file_a.clone(), ImageFormat::Jpeg),
        PhotoEntry::from_path(2, file_b.clone(), ImageFormat::Jpeg),
    ];

    let edit = BatchProcessor::prepare("2024-03-05", "40.7128, -74.0060")
        .expect("valid input should prepare");

    let (tx, rx) = mpsc::channel();
    let results = BatchProcessor::apply(&photos, &edit, tx);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|result| result.success));

    let events = rx.try_iter().collect::<Vec<_>>();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| event.total == 2 && event.success));

    for path in [&file_a, &file_b] {
        let summary = MetadataEngine::read_summary(path).expect("summary should read back");
        assert_eq!(summary.date_taken, Some(String::from("2024-03-05")));

        let (lat, lon) = summary.gps_pair().expect("GPS should be present");
        assert!((lat - 40.7128).abs() <= TOLERANCE);
        assert!((lon - -74.0060).abs() <= TOLERANCE);
    }

    let _ = fs::remove_file(&file_a);
    let _ = fs::remove_file(&file_b);
}

#[test]
fn one_failing_file_does_not_block_the_rest() {
    let real = unique_path("isolated_real", "jpg");
    write_sample_image(&real);
    let ghost = unique_path("isolated_ghost", "jpg");

    let photos = vec![
        PhotoEntry::from_path(1, ghost.clone(), ImageFormat::Jpeg),
        PhotoEntry::from_path(2, real.clone(), ImageFormat::Jpeg),
    ];

    let edit =
        BatchProcessor::prepare("2024-03-05", "1.0, 2.0").expect("valid input should prepare");

    let (tx, _rx) = mpsc::channel();
    let results = BatchProcessor::apply(&photos, &edit, tx);

    assert_eq!(results.len(), 2);
    assert!(!results[0].success);
    assert!(results[0].error.is_some());
    assert!(results[1].success);

    let summary = OperationSummary::from_results(2, &results);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.cancelled, 0);

    let _ = fs::remove_file(&real);
}

#[test]
fn formats_without_exif_are_rejected_per_file() {
    let file = unique_path("no_exif", "bmp");
    write_sample_image(&file);

    let photos = vec![PhotoEntry::from_path(1, file.clone(), ImageFormat::Bmp)];
    let edit =
        BatchProcessor::prepare("2024-03-05", "1.0, 2.0").expect("valid input should prepare");

    let (tx, _rx) = mpsc::channel();
    let results = BatchProcessor::apply(&photos, &edit, tx);

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);

    let _ = fs::remove_file(&file);
}

#[test]
fn raised_cancel_flag_skips_all_files() {
    let file_a = unique_path("cancel_a", "jpg");
    let file_b = unique_path("cancel_b", "jpg");
    write_sample_image(&file_a);
    write_sample_image(&file_b);

    let photos = vec![
        PhotoEntry::from_path(1, file_a.clone(), ImageFormat::Jpeg),
        PhotoEntry::from_path(2, file_b.clone(), ImageFormat::Jpeg),
    ];

    let edit =
        BatchProcessor::prepare("2024-03-05", "1.0, 2.0").expect("valid input should prepare");

    let cancel = AtomicBool::new(true);
    let (tx, _rx) = mpsc::channel();
    let results = BatchProcessor::apply_with_cancel(&photos, &edit, tx, Some(&cancel));

    assert!(results.is_empty());

    let summary = OperationSummary::from_results(2, &results);
    assert_eq!(summary.cancelled, 2);

    let _ = fs::remove_file(&file_a);
    let _ = fs::remove_file(&file_b);
}

#[test]
fn invalid_input_never_reaches_the_write_path() {
    let file = unique_path("untouched", "jpg");
    write_sample_image(&file);
    let before = fs::read(&file).expect("should read sample bytes");

    assert!(BatchProcessor::prepare("2024-02-30", "1.0, 2.0").is_err());
    assert!(BatchProcessor::prepare("2024-03-05", "not gps").is_err());

    let after = fs::read(&file).expect("should read sample bytes");
    assert_eq!(before, after);

    let _ = fs::remove_file(&file);
}
