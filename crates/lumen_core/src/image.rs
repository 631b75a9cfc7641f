//! Decoded image rasters for image-mapped textures.
//!
//! Rasters are loaded from disk once, stored as 8-bit RGB, and shared
//! between textures through a filename-keyed cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while loading an image raster.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded image: width, height, and a row-major 8-bit RGB pixel buffer.
///
/// An empty raster (zero width or height) is valid and stands in for a
/// missing or corrupt file; lookups against it are the caller's concern.
#[derive(Clone, Debug, Default)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an already-decoded RGB buffer. `data` must hold
    /// `width * height * 3` bytes in row-major, top-to-bottom order.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// An empty raster, the stand-in for a failed decode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode an image file into an 8-bit RGB raster.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let img = image::open(path.as_ref())?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self::new(width, height, rgb.into_raw()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB bytes of the pixel at (x, y), clamped to the raster edges.
    /// Must not be called on an empty raster.
    pub fn pixel_data(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = ((y * self.width + x) * 3) as usize;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Convert an sRGB byte value to a linear float in [0, 1].
pub fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Cache of decoded rasters, keyed by file path.
///
/// Image textures referencing the same file share one `Arc<RasterImage>`.
pub struct TextureCache {
    rasters: HashMap<String, Arc<RasterImage>>,
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            rasters: HashMap::new(),
            base_dir: None,
        }
    }

    /// Cache resolving relative paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            rasters: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a raster, reusing the cached copy if present.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<RasterImage>> {
        if let Some(raster) = self.rasters.get(path) {
            return Ok(raster.clone());
        }

        let full_path = self.resolve_path(path);
        let raster = Arc::new(RasterImage::load(&full_path)?);
        self.rasters.insert(path.to_string(), raster.clone());

        log::debug!(
            "loaded raster {} ({}x{}, {:.1} KB)",
            path,
            raster.width(),
            raster.height(),
            raster.size_bytes() as f32 / 1024.0
        );

        Ok(raster)
    }

    pub fn get(&self, path: &str) -> Option<Arc<RasterImage>> {
        self.rasters.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }

    pub fn clear(&mut self) {
        self.rasters.clear();
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_data_clamps_to_edges() {
        // 2x2 raster: red, green / blue, white
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let raster = RasterImage::new(2, 2, data);

        assert_eq!(raster.pixel_data(0, 0), [255, 0, 0]);
        assert_eq!(raster.pixel_data(1, 0), [0, 255, 0]);
        assert_eq!(raster.pixel_data(9, 9), [255, 255, 255]);
    }

    #[test]
    fn test_empty_raster() {
        let raster = RasterImage::empty();
        assert_eq!(raster.width(), 0);
        assert_eq!(raster.height(), 0);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(RasterImage::load("/nonexistent/not_a_texture.png").is_err());
    }

    #[test]
    fn test_cache_starts_empty() {
        let cache = TextureCache::new();
        assert!(cache.is_empty());
        assert!(cache.get("anything.png").is_none());
    }

    #[test]
    fn test_srgb_to_linear() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 1e-4);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-4);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
