//! # framesplit
//!
//! Parallel video frame extraction — partition a video's frame range into
//! contiguous segments and write every Nth frame to disk as independently
//! named image files, one concurrent worker per segment.
//!
//! `framesplit` decodes via FFmpeg through the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate. Each worker
//! owns its own demuxer and decoder, so no handle, cursor, or buffer is
//! ever shared between workers; the only shared inputs are the read-only
//! source path and output directory, and filenames embed both the frame
//! index and a per-segment id so concurrent writers cannot collide.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framesplit::{ExtractOptions, RunStatus};
//!
//! // Eight workers, every 10th frame, PNG output.
//! let report = framesplit::run(
//!     "input.mp4",
//!     8,
//!     10,
//!     "frames",
//!     &ExtractOptions::new(),
//! )?;
//!
//! assert_eq!(report.status(), RunStatus::Success);
//! println!("{} frames written", report.frames_written());
//! # Ok::<(), framesplit::ExtractError>(())
//! ```
//!
//! ## Planning without running
//!
//! ```
//! let planning_run = framesplit::plan(3000, 4)?;
//! for job in &planning_run {
//!     println!("[{}, {}) -> id {}", job.start_frame, job.end_frame, job.segment_id);
//! }
//! # Ok::<(), framesplit::ExtractError>(())
//! ```
//!
//! ## Failure isolation
//!
//! One worker's failure never cancels its siblings. The [`RunReport`]
//! records, per segment, whether it completed fully, stopped early, or
//! failed to start — enough for a caller to re-run only the failed
//! segments. Fatal conditions (bad parameters, unreadable media, a refused
//! overwrite) surface synchronously before any worker launches.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod cancellation;
pub mod error;
pub mod ffmpeg;
pub mod metadata;
pub mod options;
pub mod orchestrator;
pub mod plan;
mod utilities;
pub mod video;
pub mod worker;

pub use cancellation::CancellationToken;
pub use error::ExtractError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use metadata::{VideoMetadata, probe};
pub use options::{ExtractOptions, ImageFormat};
pub use orchestrator::{RunReport, RunStatus, run};
pub use plan::{Job, PlanningRun, plan};
pub use video::VideoHandle;
pub use worker::{SegmentReport, SegmentStatus, extract_segment};
