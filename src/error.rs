//! Error types for the `framesplit` crate.
//!
//! This module defines [`ExtractError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context to
//! diagnose the problem — file paths, frame numbers, and upstream error
//! messages — without additional logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framesplit` operations.
///
/// Every public method that can fail returns `Result<T, ExtractError>`.
/// Per-worker errors are additionally captured inside
/// [`SegmentReport`](crate::SegmentReport) rather than raised across worker
/// boundaries, so one segment's failure never aborts its siblings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// A caller-supplied parameter is invalid. Raised before any work starts.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The source video could not be opened, or its frame count could not be
    /// determined from the container. Fatal to the whole run — the planner
    /// cannot partition a video of unknown length.
    #[error("Unreadable media at {path}: {reason}")]
    UnreadableMedia {
        /// Path to the offending media file.
        path: PathBuf,
        /// Underlying reason reported by the demuxer.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A frame within a segment could not be decoded. Non-fatal: the owning
    /// worker stops early and reports a partial segment, since segment
    /// boundaries are estimates rather than guarantees.
    #[error("Failed to decode frame {frame_number}: {reason}")]
    DecodeFault {
        /// The absolute frame number that failed to decode.
        frame_number: u64,
        /// Underlying decoder error.
        reason: String,
    },

    /// The output directory could not be created, or an image write failed.
    /// Fatal to the individual worker, non-fatal to siblings.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem {
        /// Path of the failed create or write.
        path: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// The output directory already exists and `overwrite` was not set.
    /// Replaces the original interactive y/n consent prompt.
    #[error("Output directory already exists: {path} (set overwrite to write into it)")]
    OutputDirectoryExists {
        /// The pre-existing output directory.
        path: PathBuf,
    },

    /// A worker exceeded its wall-clock budget, most likely a stalled decoder.
    #[error("Worker exceeded its time budget in segment {segment_id}")]
    Timeout {
        /// Id of the segment whose worker stalled.
        segment_id: String,
    },

    /// The operation was cancelled via a
    /// [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding an output frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for ExtractError {
    fn from(error: FfmpegError) -> Self {
        ExtractError::FfmpegError(error.to_string())
    }
}
