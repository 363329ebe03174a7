//! Partition planner invariants.
//!
//! These tests are pure — no media fixtures required.

use std::collections::HashSet;

use framesplit::{ExtractError, plan};

/// Segments must be contiguous and gapless: first starts at 0, each end is
/// the next start, and every segment is well-formed.
fn assert_contiguous(total_frames: u64, n_parallel: usize) {
    let run = plan(total_frames, n_parallel).expect("plan should succeed");
    let jobs = run.jobs();

    assert_eq!(jobs.len(), n_parallel, "expected exactly n jobs");
    assert_eq!(jobs[0].start_frame, 0, "first segment must start at 0");

    for pair in jobs.windows(2) {
        assert_eq!(
            pair[0].end_frame, pair[1].start_frame,
            "segments must be gapless: {pair:?}",
        );
    }

    // Per-step rounding may leave the final end short of or beyond the true
    // total, by at most one rounding error per segment.
    let last_end = jobs.last().unwrap().end_frame;
    let drift = last_end.abs_diff(total_frames);
    assert!(
        drift <= n_parallel as u64,
        "last end {last_end} drifts more than {n_parallel} frames from {total_frames}",
    );
}

#[test]
fn produces_exactly_n_contiguous_jobs() {
    assert_contiguous(100, 1);
    assert_contiguous(100, 4);
    assert_contiguous(100, 7);
    assert_contiguous(1, 1);
    assert_contiguous(92_161, 12);
    assert_contiguous(3_000_000, 32);
}

#[test]
fn single_job_covers_whole_video() {
    let run = plan(100, 1).expect("plan should succeed");
    let job = &run.jobs()[0];
    assert_eq!(job.start_frame, 0);
    assert_eq!(job.end_frame, 100);
}

#[test]
fn zero_total_frames_is_invalid() {
    let result = plan(0, 4);
    assert!(matches!(
        result,
        Err(ExtractError::InvalidConfiguration(_)),
    ));
}

#[test]
fn zero_parallelism_is_invalid() {
    let result = plan(100, 0);
    assert!(matches!(
        result,
        Err(ExtractError::InvalidConfiguration(_)),
    ));
}

#[test]
fn segment_ids_are_small_decimal_strings() {
    let run = plan(5000, 8).expect("plan should succeed");
    for job in &run {
        assert!(
            job.segment_id.parse::<u16>().is_ok(),
            "segment id should be a 16-bit decimal string: {}",
            job.segment_id,
        );
    }
}

#[test]
fn segments_never_overlap() {
    let run = plan(977, 5).expect("plan should succeed");
    for job in &run {
        assert!(job.start_frame <= job.end_frame, "degenerate segment: {job:?}");
    }
    for pair in run.jobs().windows(2) {
        assert!(pair[0].end_frame <= pair[1].start_frame);
    }
}

/// Partitioning must not change which frames get sampled: the union of all
/// jobs' stride-aligned selections is the same for 1 worker as for 8, apart
/// from the tail where the two plans' rounding drift differs.
#[test]
fn coverage_is_independent_of_parallelism() {
    let total_frames = 1000;
    let stride = 13;

    let coverage = |n_parallel: usize| -> (HashSet<u64>, u64) {
        let run = plan(total_frames, n_parallel).expect("plan should succeed");
        let frames = run
            .jobs()
            .iter()
            .flat_map(|job| job.selected_frames(stride))
            .collect();
        (frames, run.jobs().last().unwrap().end_frame)
    };

    let (serial, serial_end) = coverage(1);
    let (parallel, parallel_end) = coverage(8);

    let common_end = serial_end.min(parallel_end);
    for frame in serial.symmetric_difference(&parallel) {
        assert!(
            *frame >= common_end,
            "frame {frame} sampled by one plan but not the other, below the \
             common end {common_end}",
        );
    }
}

#[test]
fn selected_frames_align_to_global_grid() {
    let run = plan(100, 4).expect("plan should succeed");
    for job in &run {
        for frame in job.selected_frames(10) {
            assert_eq!(frame % 10, 0, "frame {frame} off the stride grid");
            assert!(frame >= job.start_frame && frame < job.end_frame);
        }
    }

    // All multiples of 10 below 100, with no duplicates across segments.
    let all: Vec<u64> = run
        .jobs()
        .iter()
        .flat_map(|job| job.selected_frames(10))
        .collect();
    let distinct: HashSet<u64> = all.iter().copied().collect();
    assert_eq!(all.len(), distinct.len(), "duplicate frames across segments");
    assert_eq!(distinct, (0..100).step_by(10).collect::<HashSet<u64>>());
}
