//! Camera: view frustum derivation and per-pixel ray generation.

use lumen_math::{Ray, Vec3};
use rand::RngCore;
use thiserror::Error;

use crate::material::Color;
use crate::sampling::{gen_f32, random_in_unit_disk};

/// Configuration errors caught before any pixel is traced.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("image_width must be at least 1 pixel")]
    InvalidImageWidth,
    #[error("aspect_ratio must be positive and finite (got {0})")]
    InvalidAspectRatio(f32),
    #[error("samples_per_pixel must be at least 1")]
    InvalidSampleCount,
    #[error("vfov must lie strictly between 0 and 180 degrees (got {0})")]
    InvalidFov(f32),
    #[error("focus_dist must be positive (got {0})")]
    InvalidFocusDist(f32),
}

/// What a ray that escapes the scene contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A flat color; black for emissive-lit scenes.
    Color(Color),
    /// White-to-blue vertical gradient for daylight scenes.
    SkyGradient,
}

/// Camera for generating rays into the scene.
///
/// Configure with the builder methods, then call `initialize` once before
/// asking for rays; it validates the settings and derives the viewport
/// basis, pixel grid, stratification grid and defocus disk.
#[derive(Clone)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,          // Vertical field of view in degrees
    defocus_angle: f32, // Cone angle of origin variation per pixel
    focus_dist: f32,    // Distance to the plane of perfect focus

    pub background: Background,

    // Cached values, set by initialize()
    image_height: u32,
    sqrt_spp: u32,
    recip_sqrt_spp: f32,
    samples_scale: f32,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Background::Color(Color::ZERO),
            image_height: 0,
            sqrt_spp: 1,
            recip_sqrt_spp: 1.0,
            samples_scale: 1.0,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image width in pixels; height follows from the aspect ratio.
    pub fn with_resolution(mut self, width: u32, aspect_ratio: f32) -> Self {
        self.image_width = width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set sampling quality.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position and orientation.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings. A zero `defocus_angle` is a pinhole camera.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Validate the configuration and derive the cached viewport state.
    /// Must be called before `get_ray`.
    pub fn initialize(&mut self) -> Result<(), CameraError> {
        if self.image_width == 0 {
            return Err(CameraError::InvalidImageWidth);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::InvalidSampleCount);
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFov(self.vfov));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(CameraError::InvalidFocusDist(self.focus_dist));
        }

        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        // Stratify samples into a ceil(sqrt(S)) x ceil(sqrt(S)) sub-pixel
        // grid; the effective sample count is the full grid
        self.sqrt_spp = (self.samples_per_pixel as f32).sqrt().ceil() as u32;
        self.recip_sqrt_spp = 1.0 / self.sqrt_spp as f32;
        self.samples_scale = 1.0 / (self.sqrt_spp * self.sqrt_spp) as f32;

        self.center = self.look_from;

        // Viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera basis
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Pixel grid vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Defocus disk basis
        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        Ok(())
    }

    /// Generate a ray through pixel (i, j), jittered within sub-pixel
    /// stratum (s_i, s_j), with a random time stamp for motion blur.
    pub fn get_ray(&self, i: u32, j: u32, s_i: u32, s_j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = self.sample_square_stratified(s_i, s_j, rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f32(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Jittered offset within stratum (s_i, s_j) of the unit pixel square
    /// [-0.5, 0.5]^2.
    fn sample_square_stratified(&self, s_i: u32, s_j: u32, rng: &mut dyn RngCore) -> Vec3 {
        let px = (s_i as f32 + gen_f32(rng)) * self.recip_sqrt_spp - 0.5;
        let py = (s_j as f32 + gen_f32(rng)) * self.recip_sqrt_spp - 0.5;
        Vec3::new(px, py, 0.0)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Side length of the stratification grid.
    pub fn sqrt_spp(&self) -> u32 {
        self.sqrt_spp
    }

    /// 1 / effective sample count.
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults() {
        let camera = Camera::new();
        assert_eq!(camera.aspect_ratio, 1.0);
        assert_eq!(camera.image_width, 100);
        assert_eq!(camera.samples_per_pixel, 10);
        assert_eq!(camera.max_depth, 10);
        assert_eq!(camera.background, Background::Color(Color::ZERO));
    }

    #[test]
    fn test_initialize_derives_height_and_basis() {
        let mut camera = Camera::new()
            .with_resolution(800, 16.0 / 9.0)
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize().unwrap();

        assert_eq!(camera.image_height(), 450);
        assert!((camera.w - Vec3::Z).length() < 1e-4);
        assert!((camera.u - Vec3::X).length() < 1e-4);
        assert!((camera.v - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let mut camera = Camera::new().with_resolution(0, 1.0);
        assert_eq!(camera.initialize(), Err(CameraError::InvalidImageWidth));

        let mut camera = Camera::new().with_resolution(100, -2.0);
        assert_eq!(
            camera.initialize(),
            Err(CameraError::InvalidAspectRatio(-2.0))
        );

        let mut camera = Camera::new().with_quality(0, 10);
        assert_eq!(camera.initialize(), Err(CameraError::InvalidSampleCount));

        let mut camera = Camera::new().with_lens(0.0, 0.0, 10.0);
        assert_eq!(camera.initialize(), Err(CameraError::InvalidFov(0.0)));
    }

    #[test]
    fn test_height_is_at_least_one() {
        let mut camera = Camera::new().with_resolution(10, 100.0);
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_stratification_grid_covers_requested_samples() {
        let mut camera = Camera::new().with_quality(10, 10);
        camera.initialize().unwrap();

        // ceil(sqrt(10)) = 4, so the effective count is 16
        assert_eq!(camera.sqrt_spp(), 4);
        assert!((camera.samples_scale() - 1.0 / 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_center_ray_points_at_look_target() {
        let mut camera = Camera::new()
            .with_resolution(101, 1.0)
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let ray = camera.get_ray(50, 50, 0, 0, &mut rng);
        assert!(ray.direction().z < 0.0);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((0.0..=1.0).contains(&ray.time()));
    }
}
