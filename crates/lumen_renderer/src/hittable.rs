//! Hittable trait, HitRecord, and the structural wrappers
//! (list, translation, rotation).

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::material::{Material, ScatterResult};

/// Material that absorbs everything; backs `HitRecord::default()`.
struct Absorber;

impl Material for Absorber {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

static ABSORBER: Absorber = Absorber;

/// Record of a ray-object intersection.
///
/// Filled in by the hittable on a successful query and read by the
/// integrator; never stored past the current bounce.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Surface texture coordinates
    pub u: f32,
    pub v: f32,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Whether the ray struck the outward-facing side
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &ABSORBER,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Store the normal so it opposes the ray direction, remembering which
    /// side was struck. `outward_normal` is assumed unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Objects a ray can intersect.
pub trait Hittable: Send + Sync {
    /// Test the ray against this object inside the acceptance interval.
    ///
    /// Returns true on a hit and fills in the record.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Axis-aligned box bounding this object over all ray times.
    fn bounding_box(&self) -> Aabb;
}

/// An ordered collection of hittables.
///
/// Doubles as the top-level scene container before BVH construction and as
/// the body of composite shapes (e.g. the six quads of a box). Queries are
/// an unaccelerated linear scan for the closest hit.
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Hand the children over, e.g. to a BVH builder.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Moves a child hittable by a fixed offset.
///
/// The ray is shifted into the child's local frame, the hit point shifted
/// back out; normals are unaffected by translation.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&offset_ray, ray_t, rec) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Rotates a child hittable about one of the coordinate axes.
///
/// The ray is rotated into the child's local frame (inverse rotation), the
/// hit point and normal rotated back out. The world-space box is re-fit
/// once at construction from the eight rotated corners of the child's box,
/// since a rotated axis-aligned box is generally not axis-aligned.
pub struct Rotate {
    object: Arc<dyn Hittable>,
    axis: Axis,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Aabb,
}

impl Rotate {
    pub fn about_x(object: Arc<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Axis::X, degrees)
    }

    pub fn about_y(object: Arc<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Axis::Y, degrees)
    }

    pub fn about_z(object: Arc<dyn Hittable>, degrees: f32) -> Self {
        Self::new(object, Axis::Z, degrees)
    }

    fn new(object: Arc<dyn Hittable>, axis: Axis, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let child_box = object.bounding_box();
        let corners = [
            Vec3::new(child_box.x.min, child_box.y.min, child_box.z.min),
            Vec3::new(child_box.x.max, child_box.y.min, child_box.z.min),
            Vec3::new(child_box.x.min, child_box.y.max, child_box.z.min),
            Vec3::new(child_box.x.max, child_box.y.max, child_box.z.min),
            Vec3::new(child_box.x.min, child_box.y.min, child_box.z.max),
            Vec3::new(child_box.x.max, child_box.y.min, child_box.z.max),
            Vec3::new(child_box.x.min, child_box.y.max, child_box.z.max),
            Vec3::new(child_box.x.max, child_box.y.max, child_box.z.max),
        ];

        let mut rotate = Self {
            object,
            axis,
            sin_theta,
            cos_theta,
            bbox: Aabb::EMPTY,
        };

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in corners {
            let rotated = rotate.to_world(corner);
            min = min.min(rotated);
            max = max.max(rotated);
        }
        rotate.bbox = Aabb::from_points(min, max);

        rotate
    }

    /// Forward rotation by theta about the axis.
    fn to_world(&self, p: Vec3) -> Vec3 {
        let (s, c) = (self.sin_theta, self.cos_theta);
        match self.axis {
            Axis::X => Vec3::new(p.x, c * p.y - s * p.z, s * p.y + c * p.z),
            Axis::Y => Vec3::new(c * p.x + s * p.z, p.y, -s * p.x + c * p.z),
            Axis::Z => Vec3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z),
        }
    }

    /// Inverse rotation, taking world coordinates into the child's frame.
    fn to_local(&self, p: Vec3) -> Vec3 {
        let (s, c) = (self.sin_theta, self.cos_theta);
        match self.axis {
            Axis::X => Vec3::new(p.x, c * p.y + s * p.z, -s * p.y + c * p.z),
            Axis::Y => Vec3::new(c * p.x - s * p.z, p.y, s * p.x + c * p.z),
            Axis::Z => Vec3::new(c * p.x + s * p.y, -s * p.x + c * p.y, p.z),
        }
    }
}

impl Hittable for Rotate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let local_ray = Ray::new(
            self.to_local(ray.origin()),
            self.to_local(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&local_ray, ray_t, rec) {
            return false;
        }

        rec.p = self.to_world(rec.p);
        rec.normal = self.to_world(rec.normal);
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
