//! Error types for templocate.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for templocate operations.
pub type LocateResult<T> = std::result::Result<T, LocateError>;

/// Errors that can occur while loading, matching, or annotating images.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocateError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The template does not fit inside the image at any placement.
    #[error(
        "template {tpl_width}x{tpl_height} does not fit in image {img_width}x{img_height}"
    )]
    TemplateTooLarge {
        tpl_width: usize,
        tpl_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// An input path does not exist; `what` names the input ("image", "template").
    #[error("{what} file not found at {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },
    /// Decoding or encoding through the image codecs failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
    /// The embedded label font could not be parsed.
    #[error("font error: {reason}")]
    Font { reason: String },
}
