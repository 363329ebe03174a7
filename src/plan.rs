//! Partition planning.
//!
//! [`plan`] converts a total frame count and a parallelism degree into an
//! immutable table of [`Job`]s — contiguous, non-overlapping frame segments,
//! one per worker, each tagged with a random id that keeps concurrently
//! written output filenames from colliding.

use crate::error::ExtractError;

/// One unit of work: a half-open frame segment plus its output id.
///
/// Jobs are produced by [`plan`] and consumed by
/// [`extract_segment`](crate::extract_segment). The id disambiguates output
/// filenames between concurrently running workers; it carries no ordering
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Job {
    /// Inclusive start of this segment.
    pub start_frame: u64,
    /// Exclusive end of this segment. Always greater than `start_frame` for
    /// non-degenerate plans.
    pub end_frame: u64,
    /// Identifier unique-by-randomness across the jobs of one planning run.
    pub segment_id: String,
}

impl Job {
    /// Build a job with an explicit id.
    ///
    /// [`plan`] generates ids automatically; this constructor exists for
    /// callers that re-run individual segments or need deterministic ids.
    pub fn new(start_frame: u64, end_frame: u64, segment_id: impl Into<String>) -> Self {
        Self {
            start_frame,
            end_frame,
            segment_id: segment_id.into(),
        }
    }

    /// Deterministic output filename for one frame of this job.
    ///
    /// The scheme is `<frame_index>_<segment_id>.<ext>`. Because the frame
    /// index participates, two workers cannot collide even if their ids were
    /// somehow drawn equal — segments never overlap, so their frame indices
    /// differ.
    pub fn output_file_name(&self, frame_number: u64, extension: &str) -> String {
        format!("{frame_number}_{}.{extension}", self.segment_id)
    }

    /// Frame numbers this job selects for a given stride.
    ///
    /// Selection is aligned to the global stride grid (multiples of
    /// `nth_frame`), not to the segment start. That keeps the union of all
    /// jobs' selections independent of the parallelism degree: splitting a
    /// video eight ways samples the same frames as not splitting it at all.
    ///
    /// # Panics
    ///
    /// Panics if `nth_frame` is zero; callers validate the stride first.
    pub fn selected_frames(&self, nth_frame: u64) -> impl Iterator<Item = u64> + use<> {
        let first = self.start_frame.div_ceil(nth_frame) * nth_frame;
        (first..self.end_frame).step_by(nth_frame as usize)
    }
}

/// The complete, immutable job table for one extraction request.
///
/// Produced once by [`plan`], owned by the caller for the lifetime of the
/// run, and never mutated after planning.
#[derive(Debug, Clone)]
#[must_use]
pub struct PlanningRun {
    jobs: Vec<Job>,
}

impl PlanningRun {
    /// The planned jobs, in segment order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Number of planned segments.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// `true` if the plan holds no jobs. Never the case for a plan returned
    /// by [`plan`].
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlanningRun {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

/// Partition `total_frames` into `n_parallel` contiguous segments.
///
/// Segment length is `round(total_frames / n_parallel)`, applied per step:
/// an integer cursor walks from 0, each segment spanning
/// `[cursor, round(cursor + T/n))`. The repeated rounding means the final
/// segment's end can miss the true total by up to `n_parallel` frames in
/// either direction; that slack is accepted rather than forcing the last
/// segment to absorb the remainder, and workers treat running off the end of
/// the stream as a clean early stop.
///
/// Each job receives a random 16-bit id formatted as a decimal string. Ids
/// are not deduplicated — at practical parallelism degrees a collision is
/// birthday-bounded and harmless, since the frame-index component of output
/// filenames disambiguates regardless.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidConfiguration`] if `total_frames` is zero
/// or `n_parallel` is zero.
pub fn plan(total_frames: u64, n_parallel: usize) -> Result<PlanningRun, ExtractError> {
    if total_frames == 0 {
        return Err(ExtractError::InvalidConfiguration(
            "total frame count must be greater than zero".to_string(),
        ));
    }
    if n_parallel == 0 {
        return Err(ExtractError::InvalidConfiguration(
            "parallelism degree must be at least 1".to_string(),
        ));
    }

    let step = total_frames as f64 / n_parallel as f64;
    let mut beginning: u64 = 0;
    let mut jobs = Vec::with_capacity(n_parallel);

    for _ in 0..n_parallel {
        let start_frame = beginning;
        let end_frame = (beginning as f64 + step).round() as u64;
        jobs.push(Job {
            start_frame,
            end_frame,
            segment_id: generate_segment_id(),
        });
        beginning += step.round() as u64;
    }

    log::debug!(
        "Planned {n_parallel} segment(s) over {total_frames} frame(s), last end at {}",
        jobs.last().map(|job| job.end_frame).unwrap_or(0),
    );

    Ok(PlanningRun { jobs })
}

/// Draw a 16-bit random id and format it as a decimal string.
fn generate_segment_id() -> String {
    rand::random::<u16>().to_string()
}
