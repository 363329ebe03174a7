//! Run report aggregation and output naming.
//!
//! These tests are pure — no media fixtures required.

use framesplit::{
    ExtractError, Job, RunReport, RunStatus, SegmentReport, SegmentStatus,
};

fn report(id: &str, frames_written: u64, status: SegmentStatus) -> SegmentReport {
    SegmentReport {
        segment_id: id.to_string(),
        start_frame: 0,
        end_frame: 100,
        frames_written,
        status,
        error: match status {
            SegmentStatus::Completed => None,
            _ => Some(ExtractError::Filesystem {
                path: "frames".into(),
                reason: "disk full".to_string(),
            }),
        },
    }
}

#[test]
fn all_completed_is_success() {
    let run = RunReport::from_segments(vec![
        report("1", 10, SegmentStatus::Completed),
        report("2", 10, SegmentStatus::Completed),
    ]);
    assert_eq!(run.status(), RunStatus::Success);
    assert_eq!(run.frames_written(), 20);
    assert!(run.failed_segment_ids().is_empty());
}

#[test]
fn one_failed_among_four_is_partial_failure() {
    let run = RunReport::from_segments(vec![
        report("1", 10, SegmentStatus::Completed),
        report("2", 10, SegmentStatus::Completed),
        report("3", 10, SegmentStatus::Completed),
        report("4", 0, SegmentStatus::Failed),
    ]);
    assert_eq!(run.status(), RunStatus::PartialFailure);
    assert_eq!(run.failed_segment_ids(), vec!["4"]);
}

#[test]
fn early_stopped_segment_is_partial_failure() {
    let run = RunReport::from_segments(vec![
        report("1", 10, SegmentStatus::Completed),
        report("2", 5, SegmentStatus::Partial),
    ]);
    assert_eq!(run.status(), RunStatus::PartialFailure);
    assert_eq!(run.failed_segment_ids(), vec!["2"]);
}

#[test]
fn all_failed_is_total_failure() {
    let run = RunReport::from_segments(vec![
        report("1", 0, SegmentStatus::Failed),
        report("2", 0, SegmentStatus::Failed),
    ]);
    assert_eq!(run.status(), RunStatus::TotalFailure);
    assert_eq!(run.frames_written(), 0);
}

// ── Output naming ────────────────────────────────────────────────

#[test]
fn filenames_embed_frame_index_and_segment_id() {
    let job = Job::new(0, 100, "12345");
    assert_eq!(job.output_file_name(10, "png"), "10_12345.png");
    assert_eq!(job.output_file_name(10, "jpg"), "10_12345.jpg");
}

/// Even a forced id collision cannot produce colliding filenames: segments
/// never overlap, so the frame-index component always differs.
#[test]
fn duplicate_segment_ids_still_disambiguate() {
    let first = Job::new(0, 50, "7");
    let second = Job::new(50, 100, "7");

    let first_names: Vec<String> = first
        .selected_frames(10)
        .map(|frame| first.output_file_name(frame, "png"))
        .collect();
    let second_names: Vec<String> = second
        .selected_frames(10)
        .map(|frame| second.output_file_name(frame, "png"))
        .collect();

    for name in &first_names {
        assert!(
            !second_names.contains(name),
            "filename {name} produced by both segments",
        );
    }
}

#[test]
fn filenames_are_deterministic() {
    let job = Job::new(0, 100, "999");
    assert_eq!(
        job.output_file_name(40, "png"),
        job.output_file_name(40, "png"),
    );
}
