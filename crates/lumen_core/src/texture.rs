//! Texture trait and its variants.
//!
//! A texture maps a surface coordinate (u, v) plus the hit point to a
//! color. Textures are shared between materials through `Arc`, so one
//! checker or image instance can back many surfaces.

use std::sync::Arc;

use lumen_math::{Interval, Vec3};

use crate::image::{srgb_to_linear, RasterImage};
use crate::perlin::Perlin;

/// Maps a surface coordinate to a color.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3;
}

/// A single constant color everywhere.
pub struct SolidColor {
    albedo: Vec3,
}

impl SolidColor {
    pub fn new(albedo: Vec3) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Vec3::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Vec3 {
        self.albedo
    }
}

/// A 3D checker pattern alternating between two sub-textures.
///
/// The cell parity is the sum of the per-axis floors of the scaled hit
/// point, so adjacent cells always alternate along every axis.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, c1: Vec3, c2: Vec3) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(c1)),
            Arc::new(SolidColor::new(c2)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3 {
        let x = (self.inv_scale * p.x).floor() as i64;
        let y = (self.inv_scale * p.y).floor() as i64;
        let z = (self.inv_scale * p.z).floor() as i64;

        if (x + y + z) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Marble-like procedural texture driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f32) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Vec3 {
        let phase = self.scale * p.z + 10.0 * self.noise.turbulence(p, 7);
        Vec3::splat(0.5) * (1.0 + phase.sin())
    }
}

/// Sentinel returned for lookups against an empty raster.
const MISSING_TEXTURE_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// Image-mapped texture over a shared 8-bit RGB raster.
pub struct ImageTexture {
    image: Arc<RasterImage>,
}

impl ImageTexture {
    pub fn new(image: Arc<RasterImage>) -> Self {
        Self { image }
    }

    /// Load from a file, degrading to an empty raster (and the cyan
    /// sentinel color) if the image cannot be decoded.
    pub fn open(path: &str) -> Self {
        let image = match RasterImage::load(path) {
            Ok(raster) => raster,
            Err(err) => {
                log::warn!("texture {} unavailable ({}), using sentinel", path, err);
                RasterImage::empty()
            }
        };
        Self::new(Arc::new(image))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Vec3 {
        if self.image.width() == 0 || self.image.height() == 0 {
            return MISSING_TEXTURE_COLOR;
        }

        let u = Interval::new(0.0, 1.0).clamp(u);
        let v = 1.0 - Interval::new(0.0, 1.0).clamp(v); // image rows run top to bottom

        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;
        let pixel = self.image.pixel_data(i, j);

        Vec3::new(
            srgb_to_linear(pixel[0]),
            srgb_to_linear(pixel[1]),
            srgb_to_linear(pixel[2]),
        )
    }
}
