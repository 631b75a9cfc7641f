use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box: three intervals, one per axis.
///
/// Constructed boxes are automatically ordered (min <= max per axis) and
/// padded so no axis is degenerately thin, which keeps planar primitives
/// hittable by the slab test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Box spanning two arbitrary corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// The smallest box enclosing both inputs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Interval for axis n (0=X, 1=Y, anything else=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Slab-method ray-box test: true iff the ray parameter range overlaps
    /// all three axis slabs at once.
    ///
    /// A zero direction component divides to +/-infinity, which IEEE-754
    /// ordering handles without a special case.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let ray_orig = r.origin;
        let ray_dir = r.direction;

        for axis in 0..3 {
            let ax = self.axis_interval(axis);
            let adinv = 1.0 / ray_dir[axis];

            let mut t0 = (ax.min - ray_orig[axis]) * adinv;
            let mut t1 = (ax.max - ray_orig[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Index of the axis with the largest extent.
    ///
    /// Ties resolve by strict comparison: x wins only when strictly larger
    /// than both y and z, y only when strictly larger than z, so equal sizes
    /// fall through to the later axis. The rule is fixed so BVH builds are
    /// reproducible.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            0
        } else if y_size > z_size {
            1
        } else {
            2
        }
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Box shifted by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb {
            x: self.x.add_scalar(offset.x),
            y: self.y.add_scalar(offset.y),
            z: self.z.add_scalar(offset.z),
        }
    }

    /// Pad near-zero axes so planar boxes still have volume.
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_orders_axes() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, -5.0));

        assert_eq!(aabb.x.min, 0.0);
        assert_eq!(aabb.x.max, 10.0);
        assert_eq!(aabb.y.min, 0.0);
        assert_eq!(aabb.y.max, 10.0);
        assert_eq!(aabb.z.min, -5.0);
        assert_eq!(aabb.z.max, 5.0);
    }

    #[test]
    fn test_surrounding() {
        let box0 = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let box1 = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let union = Aabb::surrounding(&box0, &box1);

        assert_eq!(union.x.min, 0.0);
        assert_eq!(union.x.max, 10.0);
    }

    #[test]
    fn test_slab_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Straight through the center
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray, Interval::UNIVERSE));

        // Pointing away: hit interval lies at negative t
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!aabb.hit(&ray, Interval::new(0.0, f32::INFINITY)));

        // Offset past the x slab
        let ray = Ray::new_simple(Vec3::new(10.0, 0.0, -5.0), Vec3::Z);
        assert!(!aabb.hit(&ray, Interval::UNIVERSE));
    }

    #[test]
    fn test_slab_hit_axis_parallel_ray() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Zero x and y direction components: inside the slabs, must hit
        let ray = Ray::new_simple(Vec3::new(0.5, 0.5, -5.0), Vec3::Z);
        assert!(aabb.hit(&ray, Interval::UNIVERSE));

        // Parallel but offset outside the x slab, must miss (no NaN panic)
        let ray = Ray::new_simple(Vec3::new(2.0, 0.5, -5.0), Vec3::Z);
        assert!(!aabb.hit(&ray, Interval::UNIVERSE));
    }

    #[test]
    fn test_empty_box_never_hits() {
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Z);
        assert!(!Aabb::EMPTY.hit(&ray, Interval::UNIVERSE));
    }

    #[test]
    fn test_longest_axis() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(aabb.longest_axis(), 0);

        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));
        assert_eq!(aabb.longest_axis(), 1);

        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0));
        assert_eq!(aabb.longest_axis(), 2);
    }

    #[test]
    fn test_longest_axis_ties_prefer_later_axis() {
        // Cube: all equal, z wins
        let cube = Aabb::from_points(Vec3::ZERO, Vec3::splat(1.0));
        assert_eq!(cube.longest_axis(), 2);

        // x-y tie above z: y wins
        let xy = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(xy.longest_axis(), 1);

        // Point box: padded but still tied, z wins
        let point = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(3.0));
        assert_eq!(point.longest_axis(), 2);
    }

    #[test]
    fn test_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE).translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(aabb.x.min, 5.0);
        assert_eq!(aabb.x.max, 6.0);
        assert_eq!(aabb.y.min, 0.0);
    }

    #[test]
    fn test_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }
}
