//! Lumen Core - textures and image rasters for the path tracer.
//!
//! This crate provides:
//!
//! - **Texture types**: the `Texture` trait and its `SolidColor`,
//!   `CheckerTexture`, `NoiseTexture` and `ImageTexture` variants
//! - **Perlin noise**: the gradient-noise generator backing `NoiseTexture`
//! - **Image rasters**: decoded 8-bit RGB pixel buffers with a
//!   filename-keyed cache, shared between image textures

pub mod image;
pub mod perlin;
pub mod texture;

// Re-export commonly used types
pub use crate::image::{RasterImage, TextureCache, TextureError, TextureResult};
pub use perlin::Perlin;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
