//! Image processing — pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `DynamicImage::width` / `height` after decode |
//! | **Plan** | [`plan_focus_crop`] (pure geometry) |
//! | **Crop → resize** | `crop_imm` + `resize_exact` (Lanczos3) |
//! | **Sharpen** | `DynamicImage::unsharpen` |
//! | **Encode** | JPEG / AVIF with quality, PNG / WebP / TIFF lossless |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageHandle`] trait + [`RustHandle`]
//! - **Registry**: [`BackendKind`] + [`BackendRegistry`] loader lookup

pub mod backend;
mod calculations;
mod params;
pub mod registry;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageHandle};
pub use calculations::plan_focus_crop;
pub use params::{
    CropRect, FocusPoint, ParseError, PreferredSize, Quality, QualityOutOfRange, Sharpening,
};
pub use registry::{BackendKind, BackendRegistry, Loader, UnknownBackend};
pub use rust_backend::RustHandle;
