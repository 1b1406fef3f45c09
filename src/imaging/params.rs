//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the planner and pipeline (which decide the geometry) and
//! the [`backend`](super::backend) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (0–100, default 70). Validated on construction.
//! - [`Sharpening`] — Unsharp-mask sigma derived from an integer sharpen amount.
//! - [`FocusPoint`] — The `(x, y)` pixel that must stay anchored after cropping.
//! - [`PreferredSize`] — Exact output dimensions requested by the caller.
//! - [`CropRect`] — Region of the source to keep, produced by the planner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Quality value outside `0..=100`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quality must be in 0-100, got {0}")]
pub struct QualityOutOfRange(pub i64);

/// Failure to parse a CLI-style point or size.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected X,Y but got '{0}'")]
    FocusPoint(String),
    #[error("expected WIDTHxHEIGHT but got '{0}'")]
    Size(String),
}

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quality(u32);

impl Quality {
    pub const DEFAULT: u32 = 70;

    pub fn new(value: i64) -> Result<Self, QualityOutOfRange> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(QualityOutOfRange(value))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for Quality {
    type Error = QualityOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u32 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Sharpening parameters for unsharp mask.
///
/// - `sigma`: Standard deviation of the Gaussian blur (higher = more sharpening)
/// - `threshold`: Minimum brightness difference to sharpen (0 = sharpen all pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpening {
    pub sigma: f32,
    pub threshold: i32,
}

impl Sharpening {
    /// Amounts below this are raised to it; smaller sigmas have no visible effect.
    pub const MIN_AMOUNT: u32 = 5;

    /// Map an integer sharpen amount onto a blur sigma in `0.0..=3.0`.
    ///
    /// `amount` is a percentage: 100 maps to sigma 3.0, and anything below
    /// [`MIN_AMOUNT`](Self::MIN_AMOUNT) is treated as the minimum (sigma 0.15).
    pub fn from_amount(amount: u32) -> Self {
        let amount = amount.max(Self::MIN_AMOUNT);
        Self {
            sigma: amount as f32 * 3.0 / 100.0,
            threshold: 0,
        }
    }
}

/// A single pixel coordinate in source space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: u32,
    pub y: u32,
}

impl FocusPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl FromStr for FocusPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::FocusPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        Ok(Self {
            x: x.trim().parse().map_err(|_| err())?,
            y: y.trim().parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for FocusPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Output dimensions requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredSize {
    pub width: u32,
    pub height: u32,
}

impl PreferredSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl FromStr for PreferredSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Size(s.to_string());
        let (w, h) = s.split_once(['x', 'X']).ok_or_else(err)?;
        Ok(Self {
            width: w.trim().parse().map_err(|_| err())?,
            height: h.trim().parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for PreferredSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Region of the source image to keep: size plus top-left offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
