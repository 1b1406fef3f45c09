//! A loaded image plus the caller's crop request.
//!
//! [`SourceImage`] owns one backend [`ImageHandle`] and carries the focus
//! point and preferred size the pipeline needs. Both are validated when set,
//! so [`CropPipeline::process`](crate::crop::CropPipeline::process) only has
//! to check that they are present.

use crate::error::{CropError, Result};
use crate::imaging::{
    BackendKind, BackendRegistry, Dimensions, FocusPoint, ImageHandle, PreferredSize,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct SourceImage {
    handle: Box<dyn ImageHandle>,
    path: PathBuf,
    focus: Option<FocusPoint>,
    preferred: Option<PreferredSize>,
}

impl SourceImage {
    /// Decode `path` with the loader registered for `backend`.
    ///
    /// The path must be a readable regular file; this is checked before any
    /// handle is constructed.
    pub fn load(path: &Path, backend: BackendKind, registry: &BackendRegistry) -> Result<Self> {
        check_readable(path)?;
        let loader = registry
            .loader(backend)
            .ok_or(CropError::UnsupportedBackend(backend))?;
        let handle = loader(path)?;
        debug!(path = %path.display(), %backend, "loaded source image");
        Ok(Self::from_handle(handle, path))
    }

    /// Wrap an already-decoded handle.
    pub fn from_handle(handle: Box<dyn ImageHandle>, path: impl Into<PathBuf>) -> Self {
        Self {
            handle,
            path: path.into(),
            focus: None,
            preferred: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current dimensions of the held image.
    pub fn dimensions(&self) -> Dimensions {
        self.handle.dimensions()
    }

    /// Set the pixel to keep anchored. Must lie within the image, edges included.
    pub fn set_focus_point(&mut self, point: FocusPoint) -> Result<&mut Self> {
        let Dimensions { width, height } = self.dimensions();
        if point.x > width || point.y > height {
            return Err(CropError::FocusPointOutOfBounds {
                point,
                width,
                height,
            });
        }
        self.focus = Some(point);
        Ok(self)
    }

    /// Set the exact output dimensions. Both must be at least 1.
    pub fn set_preferred_size(&mut self, size: PreferredSize) -> Result<&mut Self> {
        if size.width == 0 || size.height == 0 {
            return Err(CropError::InvalidPreferredSize(size));
        }
        self.preferred = Some(size);
        Ok(self)
    }

    pub fn focus_point(&self) -> Option<FocusPoint> {
        self.focus
    }

    pub fn preferred_size(&self) -> Option<PreferredSize> {
        self.preferred
    }

    pub(crate) fn handle_mut(&mut self) -> &mut dyn ImageHandle {
        self.handle.as_mut()
    }

    /// Encode the current image and write it to `path`.
    ///
    /// Fails with [`CropError::DirectoryNotWritable`] before touching the
    /// codec if the destination directory cannot be written. The image is
    /// encoded fully in memory first, so a codec failure leaves no file; a
    /// failure of the write itself is [`CropError::WriteFailed`].
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_writable_parent(path)?;
        let bytes = self.handle.encode(path)?;
        fs::write(path, &bytes).map_err(|source| CropError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved image");
        Ok(())
    }
}

/// Fail unless `path` is a regular file that can be opened for reading.
pub fn check_readable(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(CropError::NotAFile(path.to_path_buf()));
    }
    fs::File::open(path).map_err(|source| CropError::NotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Fail unless the directory that would contain `path` exists and is writable.
///
/// A bare file name refers to the current directory. The directory must carry
/// at least one write bit and grant write access to the calling process, so a
/// directory with no write bit is rejected even for privileged users.
pub fn ensure_writable_parent(path: &Path) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let has_write_bit = fs::metadata(&dir)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false);
    if !has_write_bit || !process_can_write(&dir) {
        return Err(CropError::DirectoryNotWritable(dir));
    }
    Ok(dir)
}

#[cfg(unix)]
fn process_can_write(dir: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(dir, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn process_can_write(_dir: &Path) -> bool {
    true
}
