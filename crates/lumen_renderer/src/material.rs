//! Material trait and surface scattering models.

use std::sync::Arc;

use lumen_core::{SolidColor, Texture};
use lumen_math::{Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_unit_vector};

/// Color type alias (RGB components, typically in [0, 1])
pub type Color = Vec3;

/// Attenuation and outgoing ray produced by a scatter event.
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Describes how light interacts with a surface.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray at the hit point.
    ///
    /// Returns None when the ray is absorbed (or the material only emits).
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Light emitted at the given surface coordinates. Black for
    /// everything but emissive materials.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material with a texture-valued albedo.
pub struct Lambertian {
    texture: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Degenerate when the random vector opposes the normal
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.texture.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Specular material with a roughness ("fuzz") factor.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// `fuzz` 0.0 is a perfect mirror; values are clamped to at most 1.
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Absorb rays the fuzz pushed below the surface
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir, ray_in.time()),
            })
        } else {
            None
        }
    }
}

/// Refractive material (glass, water, diamond).
pub struct Dielectric {
    /// Index of refraction of the enclosed medium relative to the
    /// enclosing one (1.0 = air, 1.5 = glass, 2.4 = diamond)
    ior: f32,
}

impl Dielectric {
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance.
    fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Emission-only material for area lights.
pub struct DiffuseLight {
    texture: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.texture.value(u, v, p)
    }
}

/// Phase function for participating media: scatters uniformly in all
/// directions.
pub struct Isotropic {
    texture: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.texture.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, random_unit_vector(rng), ray_in.time()),
        })
    }
}

/// Mirror reflection of v about the normal n.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Snell refraction of the unit vector uv through a surface with unit
/// normal n and relative index ratio etai_over_etat.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn head_on_record() -> HitRecord<'static> {
        let mut rec = HitRecord::default();
        rec.p = Vec3::ZERO;
        rec.normal = Vec3::Z;
        rec.front_face = true;
        rec
    }

    #[test]
    fn test_lambertian_scatters_into_upper_hemisphere() {
        let mat = Lambertian::new(Color::splat(0.8));
        let rec = head_on_record();
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("always scatters");
            // normal + unit vector can graze the horizon but never flip
            assert!(result.scattered.direction().dot(rec.normal) >= -1e-4);
            assert_eq!(result.attenuation, Color::splat(0.8));
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Metal::new(Color::ONE, 0.0);
        let rec = head_on_record();
        // 45 degree incidence in the xz plane
        let ray = Ray::new_simple(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
        let mut rng = StdRng::seed_from_u64(6);

        let result = mat.scatter(&ray, &rec, &mut rng).expect("reflects");
        let dir = result.scattered.direction().normalize();
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!((dir - expected).length() < 1e-4);
    }

    #[test]
    fn test_metal_absorbs_below_horizon() {
        // Maximum fuzz with a grazing reflection: some samples must be
        // rejected; with fuzz 1 and head-on they mostly survive
        let grazing = Metal::new(Color::ONE, 1.0);
        let rec = head_on_record();
        let ray = Ray::new_simple(Vec3::new(-10.0, 0.0, 0.01), Vec3::new(10.0, 0.0, -0.01));
        let mut rng = StdRng::seed_from_u64(7);

        let rejected = (0..200)
            .filter(|_| grazing.scatter(&ray, &rec, &mut rng).is_none())
            .count();
        assert!(rejected > 0, "grazing fuzzed reflection never rejected");
    }

    #[test]
    fn test_dielectric_always_scatters_white() {
        let mat = Dielectric::new(1.5);
        let rec = head_on_record();
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..50 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("never absorbs");
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Exiting glass at a grazing angle: must reflect, not refract
        let mat = Dielectric::new(1.5);
        let mut rec = head_on_record();
        rec.front_face = false;
        let incoming = Vec3::new(0.9, 0.0, -0.1).normalize();
        let ray = Ray::new_simple(Vec3::ZERO, incoming);
        let mut rng = StdRng::seed_from_u64(9);

        let result = mat.scatter(&ray, &rec, &mut rng).expect("reflects");
        let expected = reflect(incoming, rec.normal);
        assert!((result.scattered.direction() - expected).length() < 1e-4);
    }

    #[test]
    fn test_diffuse_light_emits_and_never_scatters() {
        let mat = DiffuseLight::new(Color::new(4.0, 4.0, 4.0));
        let rec = head_on_record();
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(10);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(0.0, 0.0, Vec3::ZERO), Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_default_emission_is_black() {
        let mat = Lambertian::new(Color::ONE);
        assert_eq!(mat.emitted(0.5, 0.5, Vec3::ONE), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_unit_direction() {
        let mat = Isotropic::new(Color::splat(0.9));
        let rec = head_on_record();
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(11);

        let result = mat.scatter(&ray, &rec, &mut rng).expect("always scatters");
        assert!((result.scattered.direction().length() - 1.0).abs() < 1e-4);
    }
}
