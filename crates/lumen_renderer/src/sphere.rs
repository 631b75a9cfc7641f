//! Sphere primitive, static or moving linearly for motion blur.

use std::f32::consts::PI;
use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;

/// A sphere with an optionally moving center.
///
/// The center is stored as a ray: origin at the time-0 center, direction
/// toward the time-1 center. A static sphere has zero displacement, so the
/// same evaluation covers both cases.
pub struct Sphere {
    center: Ray,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// A stationary sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center: Ray::new_simple(center, Vec3::ZERO),
            radius,
            material,
            bbox,
        }
    }

    /// A sphere moving linearly from `center1` (time 0) to `center2`
    /// (time 1). Its box is the union of the boxes at both endpoints.
    pub fn moving(center1: Vec3, center2: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);
        let box2 = Aabb::from_points(center2 - rvec, center2 + rvec);

        Self {
            center: Ray::new_simple(center1, center2 - center1),
            radius,
            material,
            bbox: Aabb::surrounding(&box1, &box2),
        }
    }

    /// Texture coordinates for a point on the unit sphere at the origin:
    /// u from the azimuth, v from the polar angle, both in [0, 1].
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let current_center = self.center.at(ray.time());
        let oc = current_center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root inside the acceptance interval, else the far one
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - current_center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::Color;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_hit_point_lies_on_surface() {
        let center = Vec3::new(1.0, 2.0, -3.0);
        let radius = 0.75;
        let sphere = Sphere::new(center, radius, gray());

        let ray = Ray::new_simple(Vec3::ZERO, (center - Vec3::ZERO).normalize());
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        // |P - C| = r and the normal is (P - C) / r
        assert!(((rec.p - center).length() - radius).abs() < 1e-4);
        assert!((rec.normal - (rec.p - center) / radius).length() < 1e-4);
    }

    #[test]
    fn test_prefers_near_root_falls_back_to_far() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, gray());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);

        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-4);

        // Exclude the near root: the far root (t=3) must be reported
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(2.0, f32::INFINITY), &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-4);

        // Exclude both roots
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(4.0, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, gray());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);

        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_moving_sphere_follows_ray_time() {
        let sphere = Sphere::moving(
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(4.0, 0.0, -2.0),
            0.5,
            gray(),
        );

        // At time 0 the sphere sits at x=0
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.0);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        // At time 1 it has moved to x=4
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 1.0);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        let ray = Ray::new(Vec3::new(4.0, 0.0, 0.0), Vec3::NEG_Z, 1.0);
        let mut rec = HitRecord::default();
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Box covers both endpoints
        let bbox = sphere.bounding_box();
        assert!(bbox.x.contains(-0.5) && bbox.x.contains(4.5));
    }

    #[test]
    fn test_sphere_uv_poles_and_equator() {
        // +x on the equator
        let (u, v) = Sphere::get_sphere_uv(Vec3::X);
        assert!((u - 0.5).abs() < 1e-4);
        assert!((v - 0.5).abs() < 1e-4);

        // North pole
        let (_, v) = Sphere::get_sphere_uv(Vec3::Y);
        assert!((v - 1.0).abs() < 1e-4);

        // South pole
        let (_, v) = Sphere::get_sphere_uv(Vec3::NEG_Y);
        assert!(v.abs() < 1e-4);
    }
}
