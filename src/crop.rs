//! Focus-aware crop pipeline.
//!
//! ```text
//! load → plan → crop → resize → sharpen → quality → save
//! ```
//!
//! [`CropPipeline::process`] runs the middle of that sequence on an already
//! loaded [`SourceImage`]; [`CropPipeline::run`] drives the whole thing for one
//! [`CropJob`]. The order is fixed: sharpening before the resize, or setting
//! quality before the crop, produces different output.

use crate::config::CropConfig;
use crate::error::{CropError, Result};
use crate::imaging::{
    BackendRegistry, CropRect, Dimensions, FocusPoint, PreferredSize, Sharpening,
    plan_focus_crop,
};
use crate::source::SourceImage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Sharpen amount applied after every resize.
pub const SHARPEN_AMOUNT: u32 = 1;

/// One image to crop: where it comes from, where it goes, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct CropJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub focus: FocusPoint,
    pub size: PreferredSize,
}

/// What a finished [`CropJob`] did, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub focus: FocusPoint,
    pub crop: CropRect,
    pub size: PreferredSize,
    pub quality: u32,
    pub backend: String,
}

/// Applies focus crops with one fixed configuration.
#[derive(Debug, Clone)]
pub struct CropPipeline {
    config: CropConfig,
    registry: BackendRegistry,
}

impl CropPipeline {
    /// Pipeline over the built-in backends.
    pub fn new(config: CropConfig) -> Self {
        Self::with_registry(config, BackendRegistry::builtin())
    }

    pub fn with_registry(config: CropConfig, registry: BackendRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Load `path` with the configured backend.
    pub fn load(&self, path: &Path) -> Result<SourceImage> {
        SourceImage::load(path, self.config.backend, &self.registry)
    }

    /// Crop `image` around its focus point and scale it to its preferred size.
    ///
    /// Both the focus point and preferred size must be set; nothing is sent to
    /// the backend otherwise. Returns the crop that was applied.
    #[instrument(skip_all, fields(path = %image.path().display()))]
    pub fn process(&self, image: &mut SourceImage) -> Result<CropRect> {
        let focus = image.focus_point().ok_or(CropError::MissingFocusPoint)?;
        let size = image
            .preferred_size()
            .ok_or(CropError::MissingPreferredSize)?;
        let source = image.dimensions();

        let rect = plan_focus_crop(source, focus, size);
        debug!(
            source = %format_args!("{}x{}", source.width, source.height),
            %focus,
            %size,
            crop = %rect,
            "planned focus crop"
        );

        let handle = image.handle_mut();
        handle.crop(rect)?;
        handle.resize(size.width, size.height)?;
        handle.sharpen(Sharpening::from_amount(SHARPEN_AMOUNT))?;
        handle.set_quality(self.config.quality)?;

        Ok(rect)
    }

    /// Load, crop and save one image.
    pub fn run(&self, job: &CropJob) -> Result<CropReport> {
        let mut image = self.load(&job.input)?;
        let Dimensions { width, height } = image.dimensions();

        image
            .set_focus_point(job.focus)?
            .set_preferred_size(job.size)?;
        let crop = self.process(&mut image)?;
        image.save(&job.output)?;

        info!(
            input = %job.input.display(),
            output = %job.output.display(),
            crop = %crop,
            "cropped image"
        );

        Ok(CropReport {
            input: job.input.clone(),
            output: job.output.clone(),
            source_width: width,
            source_height: height,
            focus: job.focus,
            crop,
            size: job.size,
            quality: self.config.quality.value(),
            backend: self.config.backend.to_string(),
        })
    }
}

impl Default for CropPipeline {
    fn default() -> Self {
        Self::new(CropConfig::default())
    }
}
