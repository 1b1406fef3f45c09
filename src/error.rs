//! Crate-level error type.
//!
//! Module errors ([`BackendError`], [`ConfigError`]) wrap into [`CropError`],
//! and [`CropError::kind`] sorts every failure into one of five categories so
//! callers can react without matching individual variants.

use crate::config::ConfigError;
use crate::imaging::{BackendError, BackendKind, FocusPoint, PreferredSize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Backend '{0}' has no registered implementation")]
    UnsupportedBackend(BackendKind),

    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
    #[error("{} is not readable: {source}", .path.display())]
    NotReadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Focus point {point} lies outside the {width}x{height} image")]
    FocusPointOutOfBounds {
        point: FocusPoint,
        width: u32,
        height: u32,
    },
    #[error("Preferred size {0} must be at least 1x1")]
    InvalidPreferredSize(PreferredSize),
    #[error("Focus point must be set before processing")]
    MissingFocusPoint,
    #[error("Preferred size must be set before processing")]
    MissingPreferredSize,

    #[error("Codec error: {0}")]
    Codec(#[from] BackendError),

    #[error("Directory {} is not writable", .0.display())]
    DirectoryNotWritable(PathBuf),
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Broad category of a [`CropError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad quality or backend selection.
    InvalidConfig,
    /// Missing or unreadable source file.
    Input,
    /// Focus point or preferred size out of range, or unset when required.
    Validation,
    /// Failure reported by the codec backend.
    Codec,
    /// Destination cannot be written.
    Output,
}

impl CropError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CropError::InvalidConfig(_) | CropError::UnsupportedBackend(_) => {
                ErrorKind::InvalidConfig
            }
            CropError::NotAFile(_) | CropError::NotReadable { .. } => ErrorKind::Input,
            CropError::FocusPointOutOfBounds { .. }
            | CropError::InvalidPreferredSize(_)
            | CropError::MissingFocusPoint
            | CropError::MissingPreferredSize => ErrorKind::Validation,
            CropError::Codec(_) => ErrorKind::Codec,
            CropError::DirectoryNotWritable(_) | CropError::WriteFailed { .. } => {
                ErrorKind::Output
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CropError>;
