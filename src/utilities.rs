//! Internal utility functions.
//!
//! Helpers for pixel-data copying and frame/timestamp conversion shared by
//! the probe and the decoding handle.

use std::time::Duration;

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an FFmpeg video frame into a tightly-packed RGB buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3).
/// This function strips that padding so the result can be passed directly to
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        // No padding — fast path: copy the entire plane at once.
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        // Stride includes padding bytes — copy row by row.
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Convert a frame number to a timestamp in the stream's time base.
///
/// The result is suitable for passing to FFmpeg seeking functions.
pub(crate) fn frame_number_to_stream_timestamp(
    frame_number: u64,
    frames_per_second: f64,
    time_base: Rational,
) -> i64 {
    let seconds = frame_number as f64 / frames_per_second;
    let duration = Duration::from_secs_f64(seconds);
    let numerator = time_base.numerator() as f64;
    let denominator = time_base.denominator() as f64;
    (duration.as_secs_f64() * denominator / numerator) as i64
}

/// Rescale a PTS value from stream time base to seconds.
pub(crate) fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// Rescale a PTS value to a frame number.
pub(crate) fn pts_to_frame_number(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let seconds = pts_to_seconds(pts, time_base);
    (seconds * frames_per_second) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pts_round_trips_through_frame_number() {
        // 30 fps stream with a 1/15360 time base (typical for mp4).
        let time_base = Rational::new(1, 15360);
        let ts = frame_number_to_stream_timestamp(90, 30.0, time_base);
        assert_eq!(pts_to_frame_number(ts, time_base, 30.0), 90);
    }

    #[test]
    fn frame_zero_maps_to_timestamp_zero() {
        let time_base = Rational::new(1, 90000);
        assert_eq!(frame_number_to_stream_timestamp(0, 25.0, time_base), 0);
    }
}
