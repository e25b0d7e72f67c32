//! Error types for circlehough.

use thiserror::Error;

/// Result alias for circlehough operations.
pub type CircleHoughResult<T> = std::result::Result<T, CircleHoughError>;

/// Errors that can occur when running the detection pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircleHoughError {
    /// An image or accumulator was constructed with a zero dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A raw buffer does not match the declared dimensions.
    #[error("buffer size mismatch: expected {expected} elements, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// A column crop reaches outside the source image.
    #[error("crop out of bounds: columns [{x0}, {x0}+{width}) of an image {image_width} wide")]
    CropOutOfBounds {
        x0: usize,
        width: usize,
        image_width: usize,
    },
    /// The accumulator would not fit in memory.
    #[error("accumulator allocation failed for {width}x{height}x{depth} cells")]
    AccumulatorTooLarge {
        width: usize,
        height: usize,
        depth: usize,
    },
    /// The worker thread pool could not be constructed.
    #[error("thread pool: {reason}")]
    ThreadPool { reason: String },
    /// The requested execution mode is not compiled in or not callable here.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
    /// A distributed send, receive, or worker process failed. Fatal to the run.
    #[error("worker communication: {reason}")]
    Comm { reason: String },
    /// Image decoding or encoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
