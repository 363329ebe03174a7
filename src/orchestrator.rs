//! Run orchestration.
//!
//! [`run`] is the crate's top-level operation: validate the request, apply
//! the overwrite consent gate, probe the source for its frame count, plan
//! the partition, fan one worker per segment out across the rayon pool, and
//! aggregate the per-segment outcomes into a [`RunReport`].
//!
//! Configuration and media-open errors surface synchronously before any
//! concurrency begins. Per-worker errors never cross worker boundaries;
//! they come back as data in the report so a caller can re-run exactly the
//! segments that failed.

use std::path::Path;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    error::ExtractError,
    metadata::probe,
    options::ExtractOptions,
    plan::plan,
    worker::{SegmentReport, SegmentStatus, extract_segment},
};

/// Aggregate outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every segment completed fully.
    Success,
    /// At least one segment produced frames or completed, but not all did.
    PartialFailure,
    /// No segment wrote a single frame.
    TotalFailure,
}

/// Per-segment outcomes for one extraction run.
#[derive(Debug)]
#[must_use]
pub struct RunReport {
    segments: Vec<SegmentReport>,
}

impl RunReport {
    /// Build a report from per-segment outcomes.
    pub fn from_segments(segments: Vec<SegmentReport>) -> Self {
        Self { segments }
    }

    /// The per-segment reports, in segment order.
    pub fn segments(&self) -> &[SegmentReport] {
        &self.segments
    }

    /// Total number of image files written across all segments.
    pub fn frames_written(&self) -> u64 {
        self.segments.iter().map(|s| s.frames_written).sum()
    }

    /// Classify the run as a whole.
    pub fn status(&self) -> RunStatus {
        if self.segments.iter().all(SegmentReport::is_complete) {
            RunStatus::Success
        } else if self
            .segments
            .iter()
            .all(|s| s.status == SegmentStatus::Failed)
        {
            RunStatus::TotalFailure
        } else {
            RunStatus::PartialFailure
        }
    }

    /// Ids of every segment that did not complete fully.
    ///
    /// Suitable for re-running just the failed portion of a video.
    pub fn failed_segment_ids(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| !s.is_complete())
            .map(|s| s.segment_id.as_str())
            .collect()
    }
}

/// Extract every `nth_frame`-th frame of `video_path` into `output_dir`,
/// using `n_parallel` concurrent workers.
///
/// Order of operations: parameter validation, overwrite consent gate, media
/// probe, output directory creation, partition planning, parallel worker
/// execution. The gate runs before the probe so a refused run touches
/// neither the filesystem nor the decoder; the directory is created only
/// after a successful probe.
///
/// Workers run as rayon tasks, each with its own decoding handle. One
/// worker's failure does not cancel its siblings.
///
/// # Errors
///
/// - [`ExtractError::InvalidConfiguration`] for a zero parallelism degree,
///   a zero stride, or a missing source file.
/// - [`ExtractError::OutputDirectoryExists`] if `output_dir` exists and
///   `options.overwrite` is false. Nothing has been written at this point.
/// - [`ExtractError::UnreadableMedia`] if the source cannot be opened or
///   its frame count cannot be derived.
/// - [`ExtractError::Filesystem`] if the output directory cannot be created.
///
/// Per-segment failures do not produce an `Err`; inspect the returned
/// [`RunReport`].
///
/// # Example
///
/// ```no_run
/// use framesplit::{ExtractOptions, RunStatus};
///
/// let options = ExtractOptions::new().with_overwrite(true);
/// let report = framesplit::run("match.mp4", 8, 10, "frames", &options)?;
/// if report.status() != RunStatus::Success {
///     eprintln!("failed segments: {:?}", report.failed_segment_ids());
/// }
/// # Ok::<(), framesplit::ExtractError>(())
/// ```
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    video_path: P,
    n_parallel: usize,
    nth_frame: u64,
    output_dir: Q,
    options: &ExtractOptions,
) -> Result<RunReport, ExtractError> {
    let video_path = video_path.as_ref();
    let output_dir = output_dir.as_ref();

    if n_parallel == 0 {
        return Err(ExtractError::InvalidConfiguration(
            "parallelism degree must be at least 1".to_string(),
        ));
    }
    if nth_frame == 0 {
        return Err(ExtractError::InvalidConfiguration(
            "frame stride must be greater than zero".to_string(),
        ));
    }
    if !video_path.is_file() {
        return Err(ExtractError::InvalidConfiguration(format!(
            "video file not found: {}",
            video_path.display(),
        )));
    }

    // Consent gate: never silently write over a prior extraction run.
    if output_dir.exists() && !options.overwrite {
        return Err(ExtractError::OutputDirectoryExists {
            path: output_dir.to_path_buf(),
        });
    }

    let metadata = probe(video_path)?;

    std::fs::create_dir_all(output_dir).map_err(|error| ExtractError::Filesystem {
        path: output_dir.to_path_buf(),
        reason: error.to_string(),
    })?;

    let planning_run = plan(metadata.frame_count, n_parallel)?;

    log::info!(
        "Extracting {} into {}: {} segment(s), stride {nth_frame}, ~{} frames total",
        video_path.display(),
        output_dir.display(),
        planning_run.len(),
        metadata.frame_count,
    );

    let segments: Vec<SegmentReport> = planning_run
        .jobs()
        .par_iter()
        .map(|job| extract_segment(video_path, job, nth_frame, output_dir, options))
        .collect();

    let report = RunReport::from_segments(segments);

    log::info!(
        "Run finished: {:?}, {} frame(s) written, {} segment(s) incomplete",
        report.status(),
        report.frames_written(),
        report.failed_segment_ids().len(),
    );

    Ok(report)
}
