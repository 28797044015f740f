//! Analytic ray/primitive intersection in local space.
//!
//! Primitives are tested in their own frame, where the sphere is the
//! unit sphere at the origin and the box has half-extent 0.5 per axis.
//! The caller maps the ray into local space first (with a normalized
//! direction) and maps the resulting hit back out to world space.

use glint_math::{Ray, Vec3};

/// Parametric distances at or below this count as "behind the origin".
/// Also the threshold for treating a direction component as parallel
/// to a slab.
const T_EPSILON: f32 = 1e-6;

/// A ray/primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Parametric distance along the ray
    pub t: f32,
    /// Hit point
    pub point: Vec3,
    /// Unit surface normal at the hit point
    pub normal: Vec3,
}

impl Intersection {
    pub fn new(t: f32, point: Vec3, normal: Vec3) -> Self {
        Self { t, point, normal }
    }

    /// Strict ordering for closest-hit resolution: smaller positive t
    /// wins, equality keeps the prior winner.
    pub fn closer_than(&self, other: &Intersection) -> bool {
        self.t < other.t
    }
}

/// Intersect with the unit sphere centered at the origin.
///
/// Solves |o + t*d|^2 = 1 for t. With a unit direction the quadratic
/// reduces to t^2 + 2(o.d)t + (o.o - 1) = 0. Non-real roots (the ray
/// misses) and non-positive roots (the sphere is behind) are
/// discarded; the smaller positive root is the visible surface. A
/// near-zero discriminant grazes the silhouette and is treated as a
/// miss, not an error.
pub fn hit_unit_sphere(ray: &Ray) -> Option<Intersection> {
    let half_b = ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - 1.0;

    let discriminant = half_b * half_b - c;
    if discriminant < T_EPSILON {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    // Smaller positive root, or the far root if the origin is inside
    let mut t = -half_b - sqrtd;
    if t <= T_EPSILON {
        t = -half_b + sqrtd;
        if t <= T_EPSILON {
            return None;
        }
    }

    let point = ray.at(t);
    // On the unit sphere the hit point is its own normal
    Some(Intersection::new(t, point, point))
}

/// Intersect with the axis-aligned unit box centered at the origin
/// (half-extent 0.5 on each axis), via the slab method.
///
/// Each axis contributes an entry/exit interval against its two face
/// planes; the hit interval is their intersection. A hit exists iff
/// that interval is non-empty with a positive near bound. The normal
/// comes from the axis whose slab produced the tightest near bound,
/// signed by the face that was entered; `outside == false` flips it
/// for a viewer inside the box.
pub fn hit_unit_box(ray: &Ray, outside: bool) -> Option<Intersection> {
    const HALF: f32 = 0.5;

    let origin = ray.origin.to_array();
    let direction = ray.direction.to_array();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut near_axis = 0;
    let mut near_sign = 1.0f32;

    for axis in 0..3 {
        if direction[axis].abs() < T_EPSILON {
            // Parallel to this slab: either always inside it or never
            if origin[axis] < -HALF || origin[axis] > HALF {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction[axis];
        let mut t0 = (-HALF - origin[axis]) * inv;
        let mut t1 = (HALF - origin[axis]) * inv;
        // Entering through the -axis face unless the order flips
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }

        if t0 > t_near {
            t_near = t0;
            near_axis = axis;
            near_sign = sign;
        }
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_near <= T_EPSILON {
        return None;
    }

    let mut components = [0.0f32; 3];
    components[near_axis] = near_sign;
    let mut normal = Vec3::from_array(components);
    if !outside {
        normal = -normal;
    }

    Some(Intersection::new(t_near, ray.at(t_near), normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_head_on() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_unit_sphere(&ray).expect("should hit");

        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_unit_sphere(&ray).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        // Sphere entirely behind the ray: both roots negative
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(hit_unit_sphere(&ray).is_none());
    }

    #[test]
    fn test_sphere_from_inside_picks_far_root() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_unit_sphere(&ray).expect("should hit");
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_box_head_on() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_unit_box(&ray, true).expect("should hit");

        // Enters the +z face at z = 0.5
        assert!((hit.t - 4.5).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_box_miss() {
        let ray = Ray::new(Vec3::new(10.0, 10.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_unit_box(&ray, true).is_none());
    }

    #[test]
    fn test_box_parallel_ray_outside_slab() {
        // Parallel to the x slabs, offset outside them
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_unit_box(&ray, true).is_none());
    }

    #[test]
    fn test_box_entering_negative_x_face() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = hit_unit_box(&ray, true).expect("should hit");

        assert!((hit.t - 4.5).abs() < 1e-5);
        assert!((hit.normal - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_box_inside_flips_normal() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_unit_box(&ray, false).expect("should hit");
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_box_behind_origin() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(hit_unit_box(&ray, true).is_none());
    }

    #[test]
    fn test_closer_than_is_strict() {
        let a = Intersection::new(2.0, Vec3::ZERO, Vec3::Z);
        let b = Intersection::new(5.0, Vec3::ZERO, Vec3::Z);
        let b2 = Intersection::new(5.0, Vec3::ZERO, Vec3::Z);

        assert!(a.closer_than(&b));
        assert!(!b.closer_than(&a));
        // Equal distance: neither is closer, prior winner keeps
        assert!(!b.closer_than(&b2));
    }
}
