//! Segment workers.
//!
//! [`extract_segment`] materializes one [`Job`]'s frames to disk: it opens
//! its own [`VideoHandle`] on the source file, seeks and decodes every
//! `nth_frame`-th frame within `[start_frame, end_frame)`, and writes each
//! as an image file. All failure is returned as data in a
//! [`SegmentReport`] — a worker never panics across the pool boundary and
//! never affects its siblings.

use std::{path::Path, time::Instant};

use crate::{
    error::ExtractError, options::ExtractOptions, plan::Job, video::VideoHandle,
};

/// How far a segment worker got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    /// Every selected frame in the segment was written.
    Completed,
    /// The worker wrote some frames, then stopped early (decode fault past
    /// the true end of stream, write failure, cancellation, or timeout).
    Partial,
    /// The worker failed before writing anything.
    Failed,
}

/// The outcome of one segment worker.
///
/// Reports carry enough detail for a caller to re-run only the segments
/// that did not complete.
#[derive(Debug)]
#[must_use]
pub struct SegmentReport {
    /// Id of the job this report describes.
    pub segment_id: String,
    /// Inclusive start of the segment.
    pub start_frame: u64,
    /// Exclusive end of the segment.
    pub end_frame: u64,
    /// Number of image files successfully written.
    pub frames_written: u64,
    /// Final status of the worker.
    pub status: SegmentStatus,
    /// The error that stopped the worker, if any.
    pub error: Option<ExtractError>,
}

impl SegmentReport {
    /// Classify an outcome from the frames written and the stopping error.
    pub(crate) fn classify(job: &Job, frames_written: u64, error: Option<ExtractError>) -> Self {
        let status = match (&error, frames_written) {
            (None, _) => SegmentStatus::Completed,
            (Some(_), 0) => SegmentStatus::Failed,
            (Some(_), _) => SegmentStatus::Partial,
        };

        Self {
            segment_id: job.segment_id.clone(),
            start_frame: job.start_frame,
            end_frame: job.end_frame,
            frames_written,
            status,
            error,
        }
    }

    /// `true` if the segment completed fully.
    pub fn is_complete(&self) -> bool {
        self.status == SegmentStatus::Completed
    }
}

/// Extract one job's frames to `output_dir`.
///
/// Opens an independent [`VideoHandle`] on `video_path`, then walks the
/// stride-aligned frames of the segment (see [`Job::selected_frames`]),
/// seeking and decoding each and saving it under the deterministic name
/// `<frame_index>_<segment_id>.<ext>`. The handle is released on every exit
/// path.
///
/// A decode failure is not treated as fatal — segment boundaries are
/// estimates derived from container metadata, so running off the end of the
/// stream simply ends the segment with a [`SegmentStatus::Partial`] report.
/// Filesystem failures stop this worker only; sibling segments keep running.
pub fn extract_segment(
    video_path: &Path,
    job: &Job,
    nth_frame: u64,
    output_dir: &Path,
    options: &ExtractOptions,
) -> SegmentReport {
    if nth_frame == 0 {
        return SegmentReport::classify(
            job,
            0,
            Some(ExtractError::InvalidConfiguration(
                "frame stride must be greater than zero".to_string(),
            )),
        );
    }

    if !video_path.is_file() {
        return SegmentReport::classify(
            job,
            0,
            Some(ExtractError::InvalidConfiguration(format!(
                "video file not found: {}",
                video_path.display(),
            ))),
        );
    }

    if let Err(error) = std::fs::create_dir_all(output_dir) {
        return SegmentReport::classify(
            job,
            0,
            Some(ExtractError::Filesystem {
                path: output_dir.to_path_buf(),
                reason: error.to_string(),
            }),
        );
    }

    // Each worker opens its own handle; sharing one across workers would
    // interleave seeks.
    let mut handle = match VideoHandle::open(video_path) {
        Ok(handle) => handle,
        Err(error) => return SegmentReport::classify(job, 0, Some(error)),
    };

    log::info!(
        "Segment {} started: frames [{}, {}) every {nth_frame}",
        job.segment_id,
        job.start_frame,
        job.end_frame,
    );

    let extension = options.image_format.extension();
    let started = Instant::now();
    let mut frames_written: u64 = 0;
    let mut stop_error: Option<ExtractError> = None;

    for frame in job.selected_frames(nth_frame) {
        if options.is_cancelled() {
            log::info!("Segment {} cancelled at frame {frame}", job.segment_id);
            stop_error = Some(ExtractError::Cancelled);
            break;
        }

        if let Some(budget) = options.worker_budget {
            if started.elapsed() > budget {
                log::warn!(
                    "Segment {} exceeded its {budget:?} budget at frame {frame}",
                    job.segment_id,
                );
                stop_error = Some(ExtractError::Timeout {
                    segment_id: job.segment_id.clone(),
                });
                break;
            }
        }

        let image = match handle.read_frame_at(frame) {
            Ok(image) => image,
            Err(error) => {
                // Expected near the end of the stream: planned segment ends
                // are estimates, not guarantees.
                log::warn!(
                    "Segment {} stopping early at frame {frame}: {error}",
                    job.segment_id,
                );
                stop_error = Some(error);
                break;
            }
        };

        let output_path = output_dir.join(job.output_file_name(frame, extension));
        if let Err(error) = image.save(&output_path) {
            log::error!(
                "Segment {} failed to write {}: {error}",
                job.segment_id,
                output_path.display(),
            );
            stop_error = Some(ExtractError::Filesystem {
                path: output_path,
                reason: error.to_string(),
            });
            break;
        }

        frames_written += 1;
    }

    let report = SegmentReport::classify(job, frames_written, stop_error);
    log::info!(
        "Segment {} finished: {:?}, {} frame(s) written in {:.2?}",
        report.segment_id,
        report.status,
        report.frames_written,
        started.elapsed(),
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job::new(0, 100, "7")
    }

    #[test]
    fn classify_no_error_is_completed() {
        let report = SegmentReport::classify(&job(), 10, None);
        assert_eq!(report.status, SegmentStatus::Completed);
        assert!(report.is_complete());
    }

    #[test]
    fn classify_error_after_writes_is_partial() {
        let report = SegmentReport::classify(
            &job(),
            5,
            Some(ExtractError::DecodeFault {
                frame_number: 50,
                reason: "end of stream".to_string(),
            }),
        );
        assert_eq!(report.status, SegmentStatus::Partial);
        assert_eq!(report.frames_written, 5);
    }

    #[test]
    fn classify_error_before_writes_is_failed() {
        let report = SegmentReport::classify(&job(), 0, Some(ExtractError::Cancelled));
        assert_eq!(report.status, SegmentStatus::Failed);
    }
}
