//! The decoding handle owned by each segment worker.
//!
//! [`VideoHandle`] bundles a demuxer, a video decoder, and an RGB24 scaler
//! into one owned session over a source file. Concurrent seeks on a single
//! demuxer interleave unpredictably, so handles are never shared: every
//! worker opens its own, and the handle is released by `Drop` on every exit
//! path — completion, error, or cancellation alike.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::error::ExtractError;

/// An opaque decoding session bound to a file path.
///
/// Supports seek-to-frame plus forward decode via
/// [`read_frame_at`](VideoHandle::read_frame_at). Frames come back as
/// [`image::DynamicImage`] in RGB8 at the source resolution.
pub struct VideoHandle {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    stream_index: usize,
    time_base: Rational,
    frames_per_second: f64,
    width: u32,
    height: u32,
    file_path: PathBuf,
}

impl Debug for VideoHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoHandle")
            .field("file_path", &self.file_path)
            .field("stream_index", &self.stream_index)
            .field("frames_per_second", &self.frames_per_second)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl VideoHandle {
    /// Open an independent decoding session on `path`.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and builds a decoder plus a pixel-format converter
    /// (source format → RGB24).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnreadableMedia`] if the file cannot be opened
    /// or its frame rate cannot be determined, and
    /// [`ExtractError::NoVideoStream`] if it has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let canonical_path = path.to_path_buf();

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

        let stream_index = stream.index();
        let time_base = stream.time_base();

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

        if frames_per_second <= 0.0 {
            return Err(ExtractError::UnreadableMedia {
                path: canonical_path,
                reason: "stream reports no usable frame rate".to_string(),
            });
        }

        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters).map_err(|error| {
            ExtractError::UnreadableMedia {
                path: canonical_path.clone(),
                reason: format!("Failed to read video codec parameters: {error}"),
            }
        })?;
        let decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| ExtractError::UnreadableMedia {
                    path: canonical_path.clone(),
                    reason: format!("Failed to create video decoder: {error}"),
                })?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        log::debug!(
            "Opened decoding handle on {} (stream {stream_index}, {width}x{height}, {frames_per_second:.2} fps)",
            canonical_path.display(),
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            stream_index,
            time_base,
            frames_per_second,
            width,
            height,
            file_path: canonical_path,
        })
    }

    /// Source frame rate, as reported by the stream.
    pub fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    /// Source frame dimensions, `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Seek to absolute frame `frame_number` and decode it.
    ///
    /// Seeks to the nearest keyframe before the target, then decodes forward
    /// until the requested frame is reached. If the seek lands past the
    /// target (sparse keyframes), the first decoded frame at or after the
    /// target is returned instead — seek accuracy is the decoder's, not ours.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::DecodeFault`] if the frame cannot be decoded,
    /// including the ordinary case of running off the end of the stream when
    /// a planned segment overshoots the true frame count.
    pub fn read_frame_at(&mut self, frame_number: u64) -> Result<DynamicImage, ExtractError> {
        let target_timestamp = crate::utilities::frame_number_to_stream_timestamp(
            frame_number,
            self.frames_per_second,
            self.time_base,
        );

        self.input_context
            .seek(target_timestamp, ..target_timestamp)
            .map_err(|error| ExtractError::DecodeFault {
                frame_number,
                reason: format!("seek failed: {error}"),
            })?;

        // Discard decoder state carried over from before the seek.
        self.decoder.flush();

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != self.stream_index {
                continue;
            }

            self.decoder
                .send_packet(&packet)
                .map_err(|error| ExtractError::DecodeFault {
                    frame_number,
                    reason: error.to_string(),
                })?;

            while self.decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let current_frame_number = crate::utilities::pts_to_frame_number(
                    pts,
                    self.time_base,
                    self.frames_per_second,
                );

                if current_frame_number >= frame_number {
                    self.scaler.run(&decoded_frame, &mut rgb_frame)?;
                    return convert_frame_to_image(&rgb_frame, self.width, self.height, frame_number);
                }
            }
        }

        // Flush the decoder for frames buffered near end of stream.
        self.decoder
            .send_eof()
            .map_err(|error| ExtractError::DecodeFault {
                frame_number,
                reason: error.to_string(),
            })?;
        while self.decoder.receive_frame(&mut decoded_frame).is_ok() {
            let pts = decoded_frame.pts().unwrap_or(0);
            let current_frame_number = crate::utilities::pts_to_frame_number(
                pts,
                self.time_base,
                self.frames_per_second,
            );

            if current_frame_number >= frame_number {
                self.scaler.run(&decoded_frame, &mut rgb_frame)?;
                return convert_frame_to_image(&rgb_frame, self.width, self.height, frame_number);
            }
        }

        Err(ExtractError::DecodeFault {
            frame_number,
            reason: "end of stream reached before target frame".to_string(),
        })
    }
}

/// Convert a scaled RGB24 video frame to an [`image::DynamicImage`].
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
    frame_number: u64,
) -> Result<DynamicImage, ExtractError> {
    let buffer = crate::utilities::frame_to_rgb_buffer(rgb_frame, width, height);
    let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        ExtractError::DecodeFault {
            frame_number,
            reason: "Failed to construct RGB image from decoded frame data".to_string(),
        }
    })?;
    Ok(DynamicImage::ImageRgb8(rgb_image))
}
