//! Bucket-based tile rendering.
//!
//! The image is divided into square tiles (buckets), sorted center-out,
//! and rendered independently: no two buckets share pixels, so rayon can
//! fan them out across the thread pool with no locking. Each bucket owns
//! a generator seeded from the base seed and its index, which keeps a
//! fixed seed reproducible per tile regardless of scheduling.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::Hittable;
use crate::material::Color;
use crate::renderer::{render_pixel, ImageBuffer};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// Top-left corner
    pub x: u32,
    pub y: u32,
    /// Extent in pixels
    pub width: u32,
    pub height: u32,
    /// Position in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering the image, sorted center-out so the most
/// important region of the image completes first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_center_out(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance of their center from the image center.
fn sort_center_out(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        let a_dx = a.x as f32 + a.width as f32 / 2.0 - center_x;
        let a_dy = a.y as f32 + a.height as f32 / 2.0 - center_y;
        let b_dx = b.x as f32 + b.width as f32 / 2.0 - center_x;
        let b_dy = b.y as f32 + b.height as f32 / 2.0 - center_y;

        let a_dist = a_dx * a_dx + a_dy * a_dy;
        let b_dist = b_dx * b_dx + b_dy * b_dy;

        a_dist
            .partial_cmp(&b_dist)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Render one bucket into a pixel vector, row-major within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(camera, world, bucket.x + local_x, bucket.y + local_y, rng);
            pixels.push(color);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order within the bucket
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

/// Render the image across the rayon thread pool, one task per bucket.
pub fn render_parallel(camera: &Camera, world: &dyn Hittable, seed: u64) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);

    log::info!(
        "rendering {}x{} in {} buckets on {} threads",
        width,
        height,
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = bucket_rng(seed, bucket.index);
            BucketResult::new(*bucket, render_bucket(bucket, camera, world, &mut rng))
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, color);
        }
    }

    image
}

/// An independent generator per bucket: the base seed mixed with the
/// bucket index.
fn bucket_rng(seed: u64, index: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bvh::BvhNode;
    use crate::camera::Background;
    use crate::material::{Lambertian, Material};
    use crate::sphere::Sphere;
    use crate::Vec3;
    use std::sync::Arc;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_center_bucket_renders_first() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
    }

    #[test]
    fn test_bucket_rng_streams_differ() {
        let mut a = bucket_rng(7, 0);
        let mut b = bucket_rng(7, 1);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_render_parallel_is_reproducible() {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        let world = BvhNode::new(vec![Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            mat,
        ))]);

        let mut camera = Camera::new()
            .with_resolution(16, 1.0)
            .with_quality(4, 4)
            .with_lens(90.0, 0.0, 1.0)
            .with_background(Background::SkyGradient);
        camera.initialize().unwrap();

        let a = render_parallel(&camera, &world, 99);
        let b = render_parallel(&camera, &world, 99);

        assert_eq!(a.width, 16);
        assert_eq!(a.height, 16);
        assert_eq!(a.pixels, b.pixels, "same seed must reproduce the image");
    }
}
