//! Constant-density participating medium (smoke, fog).

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Isotropic, Material};
use crate::Color;

/// A homogeneous volume bounded by another hittable.
///
/// A ray entering the boundary scatters after an exponentially distributed
/// free-flight distance; if that distance reaches past the exit point the
/// ray passes through unscattered. Works for any convex boundary, and for
/// non-convex ones as long as the ray crosses it only once.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::new(albedo)),
        }
    }

    pub fn with_texture(
        boundary: Arc<dyn Hittable>,
        density: f32,
        texture: Arc<dyn lumen_core::Texture>,
    ) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::from_texture(texture)),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Entry and exit of the boundary along the full ray line; the
        // second query starts just past the first so grazing hits are not
        // found twice.
        let mut rec1 = HitRecord::default();
        let mut rec2 = HitRecord::default();

        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut rec1) {
            return false;
        }
        if !self
            .boundary
            .hit(ray, Interval::new(rec1.t + 0.0001, f32::INFINITY), &mut rec2)
        {
            return false;
        }

        let mut t_enter = rec1.t.max(ray_t.min);
        let t_exit = rec2.t.min(ray_t.max);

        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        // Free flight: exponential with rate density along the ray
        let ray_length = ray.direction().length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * rand::random::<f32>().ln();

        if hit_distance > distance_inside {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        // Volumetric hits carry no meaningful surface orientation
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.material = self.phase_function.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;

    fn boundary() -> Arc<dyn Hittable> {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, mat))
    }

    #[test]
    fn test_dense_medium_scatters_near_entry() {
        // Effectively opaque: the free flight is always tiny
        let medium = ConstantMedium::new(boundary(), 1e7, Color::ONE);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);

        let mut rec = HitRecord::default();
        assert!(medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-3, "entered at t={}", rec.t);
    }

    #[test]
    fn test_ray_missing_boundary_misses_medium() {
        let medium = ConstantMedium::new(boundary(), 1.0, Color::ONE);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);

        let mut rec = HitRecord::default();
        assert!(!medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_acceptance_interval_clips_the_medium() {
        let medium = ConstantMedium::new(boundary(), 1e7, Color::ONE);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);

        // Acceptance window ends before the boundary entry at t=2
        let mut rec = HitRecord::default();
        assert!(!medium.hit(&ray, Interval::new(0.001, 1.5), &mut rec));
    }

    #[test]
    fn test_thin_medium_mostly_passes_through() {
        let medium = ConstantMedium::new(boundary(), 1e-6, Color::ONE);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);

        let mut misses = 0;
        for _ in 0..100 {
            let mut rec = HitRecord::default();
            if !medium.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
                misses += 1;
            }
        }
        assert!(misses > 90, "only {} misses through thin medium", misses);
    }
}
