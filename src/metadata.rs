//! Source video metadata and probing.
//!
//! The partition planner needs one fact before it can do anything: the total
//! frame count of the source video. [`probe`] opens the file, reads the
//! container-reported duration and the stream frame rate, derives the frame
//! count, and immediately closes the demuxer — extraction workers open their
//! own handles later.

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::media::Type;

use crate::error::ExtractError;

/// Metadata for the video stream of a source file.
///
/// Extracted once per run by [`probe`]; the `frame_count` field is the `T`
/// that the partition planner divides among workers.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated total number of frames, computed from duration and frame
    /// rate. Always greater than zero — a zero estimate fails the probe.
    pub frame_count: u64,
    /// Total container duration.
    pub duration: Duration,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}

/// Probe a video file and return its metadata.
///
/// Opens the file, locates the best video stream, computes the frame count
/// from `duration × fps`, and closes the demuxer. The returned
/// [`VideoMetadata`] is owned and fully independent of any file handle.
///
/// # Errors
///
/// - [`ExtractError::UnreadableMedia`] if the file cannot be opened, or if
///   the container reports a zero or unreadable duration / frame rate (the
///   frame count cannot be derived).
/// - [`ExtractError::NoVideoStream`] if the file has no video stream.
pub fn probe<P: AsRef<Path>>(path: P) -> Result<VideoMetadata, ExtractError> {
    let path = path.as_ref();
    let canonical_path = path.to_path_buf();

    log::debug!("Probing media file: {}", canonical_path.display());

    // Initialise ffmpeg (safe to call multiple times).
    ffmpeg_next::init().map_err(|error| ExtractError::UnreadableMedia {
        path: canonical_path.clone(),
        reason: format!("FFmpeg initialisation failed: {error}"),
    })?;

    let input_context =
        ffmpeg_next::format::input(&path).map_err(|error| ExtractError::UnreadableMedia {
            path: canonical_path.clone(),
            reason: error.to_string(),
        })?;

    let stream = input_context
        .streams()
        .best(Type::Video)
        .ok_or(ExtractError::NoVideoStream)?;

    let duration_microseconds = input_context.duration();
    let duration = if duration_microseconds > 0 {
        Duration::from_micros(duration_microseconds as u64)
    } else {
        Duration::ZERO
    };

    // Average frame rate, falling back to the stream's nominal rate.
    let frame_rate = stream.avg_frame_rate();
    let frames_per_second = if frame_rate.denominator() != 0 {
        frame_rate.numerator() as f64 / frame_rate.denominator() as f64
    } else {
        let rate = stream.rate();
        if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        }
    };

    let frame_count = if frames_per_second > 0.0 {
        (duration.as_secs_f64() * frames_per_second) as u64
    } else {
        0
    };

    if frame_count == 0 {
        return Err(ExtractError::UnreadableMedia {
            path: canonical_path,
            reason: format!(
                "cannot derive frame count (duration={:.3}s, fps={frames_per_second:.3})",
                duration.as_secs_f64(),
            ),
        });
    }

    let codec_parameters = stream.parameters();
    let decoder_context = ffmpeg_next::codec::context::Context::from_parameters(codec_parameters)
        .map_err(|error| ExtractError::UnreadableMedia {
        path: canonical_path.clone(),
        reason: format!("Failed to read video codec parameters: {error}"),
    })?;
    let video_decoder =
        decoder_context
            .decoder()
            .video()
            .map_err(|error| ExtractError::UnreadableMedia {
                path: canonical_path.clone(),
                reason: format!("Failed to create video decoder: {error}"),
            })?;

    let codec = video_decoder
        .codec()
        .map(|codec| codec.name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let metadata = VideoMetadata {
        width: video_decoder.width(),
        height: video_decoder.height(),
        frames_per_second,
        frame_count,
        duration,
        codec,
    };

    log::debug!(
        "Probed {}: {}x{}, {:.2} fps, ~{} frames, codec={}",
        canonical_path.display(),
        metadata.width,
        metadata.height,
        metadata.frames_per_second,
        metadata.frame_count,
        metadata.codec,
    );

    Ok(metadata)
}
