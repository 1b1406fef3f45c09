//! Pure Rust image backend built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format sniffing |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Sharpening | `image::DynamicImage::unsharpen` |
//! | Encode → JPEG / AVIF | `JpegEncoder` / `AvifEncoder` (rav1e, speed 6) with quality |
//! | Encode → PNG / WebP / TIFF | `DynamicImage::write_to` (lossless, quality ignored) |
//!
//! Encoding produces bytes in memory; the caller writes them out.

use super::backend::{BackendError, Dimensions, ImageHandle};
use super::params::{CropRect, Quality, Sharpening};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// AVIF encoding speed (1 = slowest/best, 10 = fastest).
const AVIF_SPEED: u8 = 6;

/// Decoded image held in memory, plus the quality for the next encode.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustHandle {
    image: DynamicImage,
    quality: Quality,
}

impl RustHandle {
    /// Load and decode an image from disk, sniffing the format from content.
    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "decoded source image"
        );
        Ok(Self::from_image(image))
    }

    /// Registry loader: decode `path` into a boxed handle.
    pub fn open(path: &Path) -> Result<Box<dyn ImageHandle>, BackendError> {
        Ok(Box::new(Self::load(path)?))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image,
            quality: Quality::default(),
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    fn encode_to_vec(&self, ext: &str) -> Result<Vec<u8>, BackendError> {
        let mut buf = Vec::new();
        let quality = self.quality.value() as u8;

        let result = match ext {
            // The JPEG encoder has no alpha channel and no quality 0.
            "jpg" | "jpeg" => DynamicImage::ImageRgb8(self.image.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.max(1))),
            "avif" => self.image.write_with_encoder(AvifEncoder::new_with_speed_quality(
                &mut buf, AVIF_SPEED, quality,
            )),
            "png" => self.image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png),
            "webp" => self.image.write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP),
            "tif" | "tiff" => self.image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Tiff),
            other => return Err(BackendError::UnsupportedFormat(other.to_string())),
        };

        result.map_err(|e| BackendError::ProcessingFailed(format!("{ext} encode failed: {e}")))?;
        Ok(buf)
    }
}

impl ImageHandle for RustHandle {
    fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    fn crop(&mut self, rect: CropRect) -> Result<(), BackendError> {
        let Dimensions { width, height } = self.dimensions();
        let fits = rect.width > 0
            && rect.height > 0
            && rect.x as u64 + rect.width as u64 <= width as u64
            && rect.y as u64 + rect.height as u64 <= height as u64;
        if !fits {
            return Err(BackendError::ProcessingFailed(format!(
                "Crop {rect} outside {width}x{height} image"
            )));
        }
        self.image = self.image.crop_imm(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot resize to {width}x{height}"
            )));
        }
        self.image = self.image.resize_exact(width, height, FilterType::Lanczos3);
        Ok(())
    }

    fn sharpen(&mut self, sharpening: Sharpening) -> Result<(), BackendError> {
        self.image = self.image.unsharpen(sharpening.sigma, sharpening.threshold);
        Ok(())
    }

    fn set_quality(&mut self, quality: Quality) -> Result<(), BackendError> {
        self.quality = quality;
        Ok(())
    }

    fn encode(&self, path: &Path) -> Result<Vec<u8>, BackendError> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Err(BackendError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            )));
        };
        self.encode_to_vec(&ext.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn encode_to(handle: &RustHandle, path: &Path) {
        std::fs::write(path, handle.encode(path).unwrap()).unwrap();
    }

    fn gradient(width: u32, height: u32) -> RustHandle {
        RustHandle::from_image(DynamicImage::ImageRgb8(RgbImage::from_fn(
            width,
            height,
            |x, y| image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8]),
        )))
    }

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_input_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn load_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let handle = RustHandle::load(&path).unwrap();
        assert_eq!(
            handle.dimensions(),
            Dimensions {
                width: 200,
                height: 150
            }
        );
        assert_eq!(handle.quality(), Quality::default());
    }

    #[test]
    fn load_sniffs_format_regardless_of_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.bin");
        create_test_jpeg(&path, 64, 32);

        let handle = RustHandle::load(&path).unwrap();
        assert_eq!(handle.dimensions().width, 64);
    }

    #[test]
    fn load_garbage_is_processing_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = RustHandle::load(&path);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn load_nonexistent_is_io_error() {
        let result = RustHandle::load(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn crop_keeps_requested_region() {
        let mut handle = gradient(100, 80);
        let expected = handle.image().to_rgb8().get_pixel(30, 20).0;

        handle
            .crop(CropRect {
                width: 40,
                height: 50,
                x: 30,
                y: 20,
            })
            .unwrap();

        assert_eq!(handle.dimensions(), Dimensions { width: 40, height: 50 });
        assert_eq!(handle.image().to_rgb8().get_pixel(0, 0).0, expected);
    }

    #[test]
    fn crop_outside_bounds_errors() {
        let mut handle = gradient(100, 80);
        let result = handle.crop(CropRect {
            width: 60,
            height: 10,
            x: 50,
            y: 0,
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert_eq!(handle.dimensions().width, 100);
    }

    #[test]
    fn resize_ignores_aspect_ratio() {
        let mut handle = gradient(300, 32);
        handle.resize(190, 20).unwrap();
        assert_eq!(handle.dimensions(), Dimensions { width: 190, height: 20 });
    }

    #[test]
    fn resize_to_zero_errors() {
        let mut handle = gradient(10, 10);
        assert!(handle.resize(0, 10).is_err());
    }

    #[test]
    fn sharpen_preserves_geometry_and_color_type() {
        let mut handle = gradient(64, 48);
        handle.sharpen(Sharpening::from_amount(1)).unwrap();
        assert_eq!(handle.dimensions(), Dimensions { width: 64, height: 48 });
        assert!(matches!(handle.image(), DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn encode_jpeg_round_trips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.jpg");
        let handle = gradient(120, 90);

        encode_to(&handle, &out);
        assert_eq!(image::image_dimensions(&out).unwrap(), (120, 90));
    }

    #[test]
    fn jpeg_quality_changes_output_size() {
        let path = Path::new("out.jpg");
        let mut handle = gradient(256, 256);
        handle.set_quality(Quality::new(10).unwrap()).unwrap();
        let low = handle.encode(path).unwrap();
        handle.set_quality(Quality::new(95).unwrap()).unwrap();
        let high = handle.encode(path).unwrap();

        assert!(low.len() < high.len(), "{} should be < {}", low.len(), high.len());
    }

    #[test]
    fn jpeg_quality_zero_still_encodes() {
        let mut handle = gradient(32, 32);
        handle.set_quality(Quality::new(0).unwrap()).unwrap();
        assert!(!handle.encode(Path::new("zero.jpg")).unwrap().is_empty());
    }

    #[test]
    fn encode_png_uppercase_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.PNG");
        encode_to(&gradient(16, 8), &out);
        assert_eq!(image::image_dimensions(&out).unwrap(), (16, 8));
    }

    #[test]
    fn encode_does_not_touch_the_filesystem() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.png");
        let bytes = gradient(16, 16).encode(&out).unwrap();
        assert!(!bytes.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn encode_unsupported_format_names_extension() {
        let result = gradient(16, 16).encode(Path::new("out.xyz"));
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(ext)) if ext == "xyz"));
    }

    #[test]
    fn encode_without_extension_names_path() {
        let err = gradient(16, 16).encode(Path::new("dir/output")).unwrap_err();
        assert!(matches!(err, BackendError::UnsupportedFormat(_)));
        assert_eq!(
            err.to_string(),
            "Unsupported output format: dir/output has no file extension"
        );
    }
}
