//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a polymorphic hittable hierarchy,
//! accelerated by a bounding volume hierarchy and parallelized across
//! image tiles with rayon.

mod bucket;
mod bvh;
mod camera;
mod constant_medium;
mod hittable;
mod material;
mod quad;
mod renderer;
mod sampling;
mod sphere;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use bvh::BvhNode;
pub use camera::{Background, Camera, CameraError};
pub use constant_medium::ConstantMedium;
pub use hittable::{HitRecord, Hittable, HittableList, Rotate, Translate};
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use quad::{make_box, Quad};
pub use renderer::{color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer};
pub use sampling::{gen_f32, random_in_unit_disk, random_unit_vector};
pub use sphere::Sphere;

/// Re-export the math value types
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
