//! Error handling integration tests.
//!
//! These tests verify that meaningful errors are returned for various
//! failure conditions, and that every fatal condition surfaces before any
//! worker starts.

use framesplit::{ExtractError, ExtractOptions, probe, run};

#[test]
fn run_rejects_zero_parallelism() {
    let result = run(
        "this_file_does_not_exist.mp4",
        0,
        10,
        "frames",
        &ExtractOptions::new(),
    );
    assert!(matches!(
        result,
        Err(ExtractError::InvalidConfiguration(_)),
    ));
}

#[test]
fn run_rejects_zero_stride() {
    let result = run(
        "this_file_does_not_exist.mp4",
        4,
        0,
        "frames",
        &ExtractOptions::new(),
    );
    assert!(matches!(
        result,
        Err(ExtractError::InvalidConfiguration(_)),
    ));
}

#[test]
fn run_rejects_missing_video() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let output_dir = temporary_directory.path().join("frames");

    let result = run(
        "this_file_does_not_exist.mp4",
        4,
        10,
        &output_dir,
        &ExtractOptions::new(),
    );
    assert!(matches!(
        result,
        Err(ExtractError::InvalidConfiguration(_)),
    ));
    assert!(!output_dir.exists(), "no directory should be created");
}

#[test]
fn probe_rejects_garbage_media() {
    // A file with garbage content is not a media file.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = probe(&invalid_file_path);
    assert!(
        matches!(
            result,
            Err(ExtractError::UnreadableMedia { .. }) | Err(ExtractError::NoVideoStream),
        ),
        "Expected a media error for garbage content",
    );
}

#[test]
fn overwrite_gate_fires_before_the_probe() {
    // The output directory exists and holds a prior run's file. With
    // overwrite unset the run must halt at the consent gate — before even
    // touching the (garbage) video — leaving the directory untouched.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video_path = temporary_directory.path().join("video.mp4");
    std::fs::write(&video_path, b"garbage").expect("Failed to write video file");

    let output_dir = temporary_directory.path().join("frames");
    std::fs::create_dir(&output_dir).expect("Failed to create output dir");
    let prior_file = output_dir.join("0_123.png");
    std::fs::write(&prior_file, b"prior run").expect("Failed to write prior file");

    let result = run(&video_path, 4, 10, &output_dir, &ExtractOptions::new());
    assert!(matches!(
        result,
        Err(ExtractError::OutputDirectoryExists { .. }),
    ));

    // Nothing written or modified.
    let entries: Vec<_> = std::fs::read_dir(&output_dir)
        .expect("Failed to list output dir")
        .collect();
    assert_eq!(entries.len(), 1, "output directory must be untouched");
    assert_eq!(
        std::fs::read(&prior_file).expect("Failed to read prior file"),
        b"prior run",
    );
}

#[test]
fn overwrite_consent_reaches_the_probe() {
    // Same setup, but with overwrite granted the gate passes and the next
    // failure is the unreadable media itself.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video_path = temporary_directory.path().join("video.mp4");
    std::fs::write(&video_path, b"garbage").expect("Failed to write video file");

    let output_dir = temporary_directory.path().join("frames");
    std::fs::create_dir(&output_dir).expect("Failed to create output dir");

    let options = ExtractOptions::new().with_overwrite(true);
    let result = run(&video_path, 4, 10, &output_dir, &options);
    assert!(matches!(
        result,
        Err(ExtractError::UnreadableMedia { .. }) | Err(ExtractError::NoVideoStream),
    ));
}

#[test]
fn fresh_output_directory_needs_no_consent() {
    // A non-existent output directory is created without the overwrite flag;
    // the garbage video then fails the probe, not the gate.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video_path = temporary_directory.path().join("video.mp4");
    std::fs::write(&video_path, b"garbage").expect("Failed to write video file");

    let output_dir = temporary_directory.path().join("frames");
    let result = run(&video_path, 4, 10, &output_dir, &ExtractOptions::new());
    assert!(matches!(
        result,
        Err(ExtractError::UnreadableMedia { .. }) | Err(ExtractError::NoVideoStream),
    ));
}
