//! Extraction options.
//!
//! [`ExtractOptions`] is a builder that threads the overwrite consent flag,
//! the output image format, cancellation, and an optional per-worker time
//! budget through [`run`](crate::run) and
//! [`extract_segment`](crate::extract_segment) without polluting every
//! function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use framesplit::{CancellationToken, ExtractOptions, ImageFormat};
//!
//! let token = CancellationToken::new();
//! let options = ExtractOptions::new()
//!     .with_overwrite(true)
//!     .with_image_format(ImageFormat::Jpeg)
//!     .with_cancellation(token.clone())
//!     .with_worker_budget(Duration::from_secs(300));
//! ```

use std::time::Duration;

use crate::cancellation::CancellationToken;

/// Encoding format for extracted frame images.
///
/// The variant determines the file extension, which in turn tells the
/// `image` crate which encoder to use when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Lossless PNG. This is the default.
    #[default]
    Png,
    /// JPEG (smaller, lossy).
    Jpeg,
    /// Uncompressed BMP.
    Bmp,
    /// TIFF.
    Tiff,
}

impl ImageFormat {
    /// The file extension for this format, without a leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }

    /// Parse a user-supplied extension string.
    pub fn from_extension(value: &str) -> Option<Self> {
        match value.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "bmp" => Some(ImageFormat::Bmp),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }
}

/// Configuration for an extraction run.
///
/// All fields have conservative defaults: no overwriting, PNG output, no
/// cancellation, no time budget.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ExtractOptions {
    /// Consent to write into a pre-existing output directory. Replaces the
    /// original interactive y/n prompt. Defaults to `false`.
    pub(crate) overwrite: bool,
    /// Output image format. Defaults to PNG.
    pub(crate) image_format: ImageFormat,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
    /// Optional wall-clock budget per worker, guarding against a stalled
    /// decoder. `None` means unbounded.
    pub(crate) worker_budget: Option<Duration>,
}

impl ExtractOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow writing into a pre-existing output directory.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the output image format.
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, each worker stops before its next frame,
    /// releases its decoding handle, and reports
    /// [`ExtractError::Cancelled`](crate::ExtractError::Cancelled).
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set a wall-clock budget per worker.
    ///
    /// Checked at the top of each worker's loop iteration; a worker over
    /// budget stops with [`ExtractError::Timeout`](crate::ExtractError::Timeout).
    pub fn with_worker_budget(mut self, budget: Duration) -> Self {
        self.worker_budget = Some(budget);
        self
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
