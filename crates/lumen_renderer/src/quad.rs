//! Planar primitives: parallelogram, triangle, ellipse, annulus.
//!
//! All four share one plane-intersection routine and differ only in the
//! interior test applied to the planar (alpha, beta) coordinates.

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Material;

/// Interior test selecting which part of the plane belongs to the shape.
enum Figure {
    /// Full parallelogram spanned by the edge vectors
    Parallelogram,
    /// Half of it: alpha, beta >= 0 and alpha + beta <= 1
    Triangle,
    /// Ellipse with semi-axes u and v around Q
    Ellipse,
    /// Ring between `inner` and the full ellipse radius
    Annulus { inner: f32 },
}

impl Figure {
    /// Membership test in planar coordinates; on success returns the
    /// surface (u, v) to report.
    fn interior(&self, alpha: f32, beta: f32) -> Option<(f32, f32)> {
        let unit = Interval::new(0.0, 1.0);
        match self {
            Figure::Parallelogram => {
                if unit.contains(alpha) && unit.contains(beta) {
                    Some((alpha, beta))
                } else {
                    None
                }
            }
            Figure::Triangle => {
                if alpha >= 0.0 && beta >= 0.0 && alpha + beta <= 1.0 {
                    Some((alpha, beta))
                } else {
                    None
                }
            }
            Figure::Ellipse => {
                if alpha * alpha + beta * beta <= 1.0 {
                    Some((alpha / 2.0 + 0.5, beta / 2.0 + 0.5))
                } else {
                    None
                }
            }
            Figure::Annulus { inner } => {
                let r = (alpha * alpha + beta * beta).sqrt();
                if r >= *inner && r <= 1.0 {
                    Some((alpha / 2.0 + 0.5, beta / 2.0 + 0.5))
                } else {
                    None
                }
            }
        }
    }

    /// Ellipse and annulus extend to Q +/- u +/- v rather than spanning
    /// corner to corner, so they need the wider box.
    fn symmetric_about_origin(&self) -> bool {
        matches!(self, Figure::Ellipse | Figure::Annulus { .. })
    }
}

/// A planar shape anchored at Q and spanned by edge vectors u and v.
///
/// The supporting plane's unit normal, its constant D (normal . P = D) and
/// the projection vector w = n / (n . n) are precomputed; a hit point is
/// mapped to planar coordinates via alpha = w . (p x v), beta = w . (u x p).
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    normal: Vec3,
    d: f32,
    material: Arc<dyn Material>,
    figure: Figure,
    bbox: Aabb,
}

impl Quad {
    /// Parallelogram with corners Q, Q+u, Q+v, Q+u+v.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::with_figure(q, u, v, material, Figure::Parallelogram)
    }

    /// Triangle with vertices Q, Q+u, Q+v.
    pub fn triangle(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::with_figure(q, u, v, material, Figure::Triangle)
    }

    /// Ellipse centered at Q with semi-axis vectors u and v.
    pub fn ellipse(center: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::with_figure(center, u, v, material, Figure::Ellipse)
    }

    /// Annulus centered at Q: the ring between `inner` (fraction of the
    /// outer radius, clamped to [0, 1]) and the full ellipse.
    pub fn annulus(center: Vec3, u: Vec3, v: Vec3, inner: f32, material: Arc<dyn Material>) -> Self {
        let inner = inner.clamp(0.0, 1.0);
        Self::with_figure(center, u, v, material, Figure::Annulus { inner })
    }

    fn with_figure(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>, figure: Figure) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        let bbox = if figure.symmetric_about_origin() {
            Aabb::surrounding(
                &Aabb::from_points(q - u - v, q + u + v),
                &Aabb::from_points(q - u + v, q + u - v),
            )
        } else {
            // Union of the parallelogram's two diagonals
            Aabb::surrounding(
                &Aabb::from_points(q, q + u + v),
                &Aabb::from_points(q + u, q + v),
            )
        };

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            figure,
            bbox,
        }
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Parallel to the plane: no hit
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let planar = intersection - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        let Some((u, v)) = self.figure.interior(alpha, beta) else {
            return false;
        };

        rec.t = t;
        rec.p = intersection;
        rec.u = u;
        rec.v = v;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// The axis-aligned box spanning two opposite corners, as six quads
/// sharing one material.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> HittableList {
    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let mut sides = HittableList::new();
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, min.y, max.z),
        dx,
        dy,
        material.clone(),
    ))); // front
    sides.add(Arc::new(Quad::new(
        Vec3::new(max.x, min.y, max.z),
        -dz,
        dy,
        material.clone(),
    ))); // right
    sides.add(Arc::new(Quad::new(
        Vec3::new(max.x, min.y, min.z),
        -dx,
        dy,
        material.clone(),
    ))); // back
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, min.y, min.z),
        dz,
        dy,
        material.clone(),
    ))); // left
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, max.y, max.z),
        dx,
        -dz,
        material.clone(),
    ))); // top
    sides.add(Arc::new(Quad::new(
        Vec3::new(min.x, min.y, min.z),
        dx,
        dz,
        material,
    ))); // bottom

    sides
}
