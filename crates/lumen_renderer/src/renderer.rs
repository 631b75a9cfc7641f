//! Core path tracing integrator and render loop.

use lumen_math::{Interval, Ray};
use rand::RngCore;

use crate::camera::{Background, Camera};
use crate::hittable::{HitRecord, Hittable};
use crate::material::Color;

/// Compute the radiance carried back along a ray.
///
/// Recursive Monte Carlo estimate of the rendering equation: a miss
/// contributes the background, a hit contributes the material's emission
/// plus the attenuated radiance of the scattered ray. A zero depth budget
/// contributes nothing, capping runtime with bias rather than variance.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Background,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
        return match background {
            Background::Color(color) => color,
            Background::SkyGradient => sky_gradient(ray),
        };
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// White-to-blue vertical gradient used as a daylight background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and quantize a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let r = (256.0 * intensity.clamp(linear_to_gamma(color.x))) as u8;
    let g = (256.0 * intensity.clamp(linear_to_gamma(color.y))) as u8;
    let b = (256.0 * intensity.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Render one pixel: average the integrator over the stratified
/// sub-pixel grid.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for s_j in 0..camera.sqrt_spp() {
        for s_i in 0..camera.sqrt_spp() {
            let ray = camera.get_ray(x, y, s_i, s_j, rng);
            pixel_color += ray_color(&ray, world, camera.max_depth, camera.background, rng);
        }
    }

    pixel_color * camera.samples_scale()
}

/// Render output: linear colors in row-major, top-to-bottom order.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Gamma-corrected 8-bit RGB bytes, ready for an image encoder.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render the whole image on the calling thread.
///
/// The tiled `render_parallel` driver is the usual entry point; this one
/// keeps a single deterministic sample stream.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height());

    log::info!(
        "rendering {}x{} at {} samples/pixel",
        image.width,
        image.height,
        camera.sqrt_spp() * camera.sqrt_spp()
    );

    for y in 0..image.height {
        for x in 0..image.width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    image
}
