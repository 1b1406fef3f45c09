//! # focal-crop
//!
//! Crop and resize a single image around a focus point.
//!
//! Given a source image, the pixel that matters most, and the exact output
//! size wanted, focal-crop cuts the largest window with the output's aspect
//! ratio that keeps the focus point at the same *relative* position, scales it
//! to the output size, sharpens lightly and encodes at the configured quality.
//!
//! ```text
//! load → plan → crop → resize → sharpen → quality → save
//! ```
//!
//! ```no_run
//! use focal_crop::config::CropConfig;
//! use focal_crop::crop::CropPipeline;
//! use focal_crop::imaging::{FocusPoint, PreferredSize};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), focal_crop::error::CropError> {
//! let mut config = CropConfig::default();
//! config.set_quality(80)?;
//! let pipeline = CropPipeline::new(config);
//!
//! let mut image = pipeline.load(Path::new("in.jpg"))?;
//! image
//!     .set_focus_point(FocusPoint::new(1000, 1100))?
//!     .set_preferred_size(PreferredSize::new(1900, 200))?;
//! pipeline.process(&mut image)?;
//! image.save(Path::new("out.jpg"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Crop planner, parameter types, [`ImageHandle`](imaging::ImageHandle) trait, `image`-crate backend, backend registry |
//! | [`source`] | [`SourceImage`](source::SourceImage): a loaded handle plus focus point and preferred size |
//! | [`crop`] | [`CropPipeline`](crop::CropPipeline): runs the crop sequence with one configuration |
//! | [`config`] | [`CropConfig`](config::CropConfig), TOML loading and merging |
//! | [`error`] | [`CropError`](error::CropError) and its [`ErrorKind`](error::ErrorKind) categories |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Configuration Is a Value
//!
//! A pipeline owns its [`CropConfig`](config::CropConfig). Two pipelines with
//! different quality settings can run side by side; there is no global to
//! mutate between calls.
//!
//! ## Backends Behind a Trait
//!
//! The planner and pipeline only see [`ImageHandle`](imaging::ImageHandle).
//! Backends are looked up by [`BackendKind`](imaging::BackendKind) in a
//! [`BackendRegistry`](imaging::BackendRegistry), which is also how tests swap
//! in a recording mock.
//!
//! ## Crop Stays Inside the Source
//!
//! The window spans the full source width for landscape outputs and the full
//! height otherwise, flipping to the other dimension when that would not fit.
//! Offsets are clamped to the source bounds, so the backend never receives a
//! crop that reaches past an edge.

pub mod config;
pub mod crop;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod source;
