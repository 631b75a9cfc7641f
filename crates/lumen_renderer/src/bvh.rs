//! Bounding Volume Hierarchy acceleration structure.
//!
//! A binary tree over the scene's hittables, built by median split along
//! the longest axis of the set's centroid bounds. Queries prune whole
//! subtrees on a box miss, making nearest-hit lookups O(log n).

use std::sync::Arc;

use lumen_math::{Aabb, Interval, Ray};

use crate::hittable::{HitRecord, Hittable, HittableList};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node: a branch with two children, a leaf holding a few primitives,
/// or the empty tree.
pub enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        objects: Vec<Arc<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Result of building over no objects: a valid node that never hits.
    Empty,
}

impl BvhNode {
    /// Build a BVH over a set of hittables.
    pub fn new(objects: Vec<Arc<dyn Hittable>>) -> Self {
        let count = objects.len();
        if count == 0 {
            return BvhNode::Empty;
        }
        let root = Self::build(objects);
        log::info!("built BVH over {} objects", count);
        root
    }

    /// Consume a scene list into a BVH.
    pub fn from_list(list: HittableList) -> Self {
        Self::new(list.into_objects())
    }

    fn build(mut objects: Vec<Arc<dyn Hittable>>) -> Self {
        let n = objects.len();

        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects,
                bbox: bounds,
            };
        }

        // Split where the centroids spread the most
        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, obj| {
            let c = obj.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val
                .partial_cmp(&b_val)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Median split on count keeps the tree balanced regardless of the
        // input ordering
        let mid = n / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        BvhNode::Branch {
            left: Box::new(Self::build(left_objects)),
            right: Box::new(Self::build(right_objects)),
            bbox: bounds,
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut hit_anything = false;
                let mut closest = ray_t.max;

                for obj in objects {
                    let interval = Interval::new(ray_t.min, closest);
                    if obj.hit(ray, interval, rec) {
                        hit_anything = true;
                        closest = rec.t;
                    }
                }
                hit_anything
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // The right subtree only needs to beat the left's hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
