//! Image handle trait and shared types.
//!
//! The [`ImageHandle`] trait defines the operations every backend must
//! support on a decoded image: geometry query, crop, resize, sharpen, quality
//! and encode. Handles are created by the loaders in the
//! [`registry`](super::registry).
//!
//! The production implementation is
//! [`RustHandle`](super::rust_backend::RustHandle), built on the `image` crate.

use super::params::{CropRect, Quality, Sharpening};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image owned by a backend.
///
/// Operations mutate the held buffer in place and must be applied in the
/// order the caller issues them. The quality set via
/// [`set_quality`](Self::set_quality) is used by the next
/// [`encode`](Self::encode). Handles never write files themselves.
pub trait ImageHandle: Send {
    /// Current dimensions of the held image.
    fn dimensions(&self) -> Dimensions;

    /// Keep only `rect`.
    fn crop(&mut self, rect: CropRect) -> Result<(), BackendError>;

    /// Scale to exactly `width` x `height`, ignoring the current aspect ratio.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), BackendError>;

    /// Apply an unsharp mask.
    fn sharpen(&mut self, sharpening: Sharpening) -> Result<(), BackendError>;

    /// Set the compression quality for the next encode.
    fn set_quality(&mut self, quality: Quality) -> Result<(), BackendError>;

    /// Encode the image in the format named by `path`'s extension.
    ///
    /// Returns the encoded bytes; writing them is up to the caller (see
    /// [`SourceImage::save`](crate::source::SourceImage::save)).
    fn encode(&self, path: &Path) -> Result<Vec<u8>, BackendError>;
}
